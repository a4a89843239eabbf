use super::aggregator::Aggregator;
use super::config::Config;
use super::metrics::Metrics;
use super::metrics::Sample;
use super::tally::Tallies;
use super::tally::TallyStore;
use crate::gameplay::Game;
use crate::gameplay::NextAction;
use crate::gameplay::Outcome;
use crate::gameplay::Position;
use crate::scoring::Memo;
use rand::Rng;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Worker plays its share of a run's games on one thread. It rotates
/// through the live candidates, resamples void games, and hands its
/// batch to the aggregator every `config.batch` valid games.
pub struct Worker<'a> {
    config: &'a Config,
    aggregator: &'a Aggregator,
    store: &'a dyn TallyStore,
    candidates: Vec<NextAction>,
    eliminated: BTreeSet<NextAction>,
    batch: BTreeMap<NextAction, Metrics>,
    tallies: HashMap<Position, Tallies>,
    resamples: usize,
    next: usize,
}

impl<'a> Worker<'a> {
    pub fn new(config: &'a Config, aggregator: &'a Aggregator, store: &'a dyn TallyStore) -> Self {
        Self {
            config,
            aggregator,
            store,
            candidates: config.candidates(),
            eliminated: BTreeSet::new(),
            batch: BTreeMap::new(),
            tallies: HashMap::new(),
            resamples: 0,
            next: 0,
        }
    }

    /// Play up to `quota` valid games, stopping early when the race is
    /// decided or an interrupt arrives between games.
    pub fn work<R: Rng>(mut self, quota: usize, memo: &mut Memo, rng: &mut R) -> anyhow::Result<()> {
        let mut played = 0;
        let mut voids = 0;
        while played < quota && !crate::interrupted() {
            let Some(choice) = self.rotate() else {
                break;
            };
            let outcome = Game::new(&self.config.setup, choice).play(memo, rng)?;
            if outcome.is_void() {
                voids += 1;
                self.resamples += 1;
                anyhow::ensure!(
                    voids < self.config.voids,
                    "{} consecutive void games: the fixed cards cannot be satisfied",
                    voids
                );
                continue;
            }
            voids = 0;
            played += 1;
            self.record(&outcome);
            if played % self.config.batch == 0 && self.flush() {
                break;
            }
        }
        self.flush();
        Ok(())
    }

    /// the next live candidate, round robin
    fn rotate(&mut self) -> Option<NextAction> {
        let live = self
            .candidates
            .iter()
            .filter(|c| !self.eliminated.contains(*c))
            .collect::<Vec<_>>();
        match live.len() {
            0 => None,
            n => {
                let choice = *live[self.next % n];
                self.next += 1;
                Some(choice)
            }
        }
    }

    fn record(&mut self, outcome: &Outcome) {
        if self.config.tally {
            if let Some(result) = Tallies::from_outcome(outcome) {
                for position in outcome.positions.iter() {
                    self.tallies.entry(*position).or_default().add(&result);
                }
            }
        }
        let tallied = match self.config.estimate {
            true => outcome.next_position().and_then(|p| self.store.get(&p)),
            false => None,
        };
        let samples = match tallied {
            Some(ref tallies) => Sample::estimated(outcome, tallies),
            None => Sample::pair(outcome),
        };
        self.batch.entry(outcome.action).or_default().push(samples);
    }

    /// Hand the batch over and learn what was eliminated.
    /// Returns whether the run is decided.
    fn flush(&mut self) -> bool {
        for (position, tallies) in self.tallies.drain() {
            self.store.add(&position, &tallies);
        }
        let batch = std::mem::take(&mut self.batch);
        let resamples = std::mem::take(&mut self.resamples);
        let snapshot = self.aggregator.absorb(batch, resamples);
        self.eliminated = snapshot.eliminated;
        snapshot.decided
    }
}
