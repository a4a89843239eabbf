use super::aggregator::Aggregator;
use super::config::Config;
use super::report::Report;
use super::tally::MemoryTallies;
use super::tally::TallyStore;
use super::worker::Worker;
use crate::scoring::Memo;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

/// Run a configuration to completion, with position tallies loaded
/// from and saved to `config.tallies` when given.
pub fn simulate_games(config: &Config) -> anyhow::Result<Report> {
    let store = match config.tallies {
        Some(ref path) => MemoryTallies::open(path)?,
        None => MemoryTallies::new(),
    };
    let report = simulate_with(config, &store)?;
    store.save()?;
    Ok(report)
}

/// Fan the target game count out over `config.workers` rayon tasks.
/// Each owns its generator and its cache; they share only the
/// aggregator and the tally store.
pub fn simulate_with(config: &Config, store: &dyn TallyStore) -> anyhow::Result<Report> {
    config.validate()?;
    log::info!(
        "simulating {} games over {} candidates on {} workers",
        config.games,
        config.candidates().len(),
        config.workers
    );
    let ref aggregator = Aggregator::new(config);
    (0..config.workers)
        .into_par_iter()
        .map(|i| {
            let ref mut rng = match config.seed {
                Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(i as u64)),
                None => SmallRng::from_os_rng(),
            };
            let ref mut memo = Memo::new();
            let quota = quota(config.games, config.workers, i);
            let result = Worker::new(config, aggregator, store).work(quota, memo, rng);
            memo.log_usage();
            result
        })
        .collect::<anyhow::Result<Vec<()>>>()?;
    let report = aggregator.report();
    log::info!("{}", report);
    Ok(report)
}

/// Run a configuration on the calling thread with the caller's cache
/// and generator. Used by look-ahead policies; nothing is tallied.
pub fn simulate_inline<R: Rng>(config: &Config, memo: &mut Memo, rng: &mut R) -> anyhow::Result<Report> {
    config.validate()?;
    let ref store = MemoryTallies::new();
    let ref aggregator = Aggregator::new(config);
    Worker::new(config, aggregator, store).work(config.games, memo, rng)?;
    Ok(aggregator.report())
}

/// worker i's share of the games, remainder to the first workers
fn quota(games: usize, workers: usize, i: usize) -> usize {
    games / workers + usize::from(i < games % workers)
}
