use super::config::Config;
use super::metrics::Metrics;
use super::racing::Secondary;
use super::racing::eliminate;
use super::racing::standings;
use super::report::Report;
use super::report::Standing;
use crate::Confidence;
use crate::PROGRESS_LOG_INTERVAL;
use crate::gameplay::NextAction;
use crate::gameplay::Player;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Instant;

/// What a worker learns back from a merge.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub eliminated: BTreeSet<NextAction>,
    pub games: usize,
    /// at most one candidate is left in a race between several
    pub decided: bool,
}

#[derive(Debug, Default)]
struct State {
    metrics: BTreeMap<NextAction, Metrics>,
    eliminated: BTreeSet<NextAction>,
    games: usize,
    resamples: usize,
}

/// Aggregator owns the merged statistics of a run. Workers hand it
/// batch-local metrics by value; it holds its one lock only for the
/// merge and the racing check.
pub struct Aggregator {
    state: Mutex<State>,
    candidates: usize,
    evaluating: Player,
    confidence: Confidence,
    secondary: Secondary,
    racing: bool,
    started: Instant,
    checked: Mutex<Instant>,
}

impl Aggregator {
    pub fn new(config: &Config) -> Self {
        let candidates = config.candidates();
        let metrics = candidates
            .iter()
            .map(|c| (*c, Metrics::default()))
            .collect();
        Self {
            state: Mutex::new(State {
                metrics,
                ..State::default()
            }),
            candidates: candidates.len(),
            evaluating: config.evaluating(),
            confidence: config.confidence,
            secondary: config.secondary,
            racing: config.racing,
            started: Instant::now(),
            checked: Mutex::new(Instant::now()),
        }
    }

    /// Merge one worker's batch, race, and report back.
    pub fn absorb(&self, batch: BTreeMap<NextAction, Metrics>, resamples: usize) -> Snapshot {
        let snapshot = {
            let mut guard = self.lock();
            let state = &mut *guard;
            for (action, metrics) in batch.iter() {
                state.games += metrics.count();
                state.metrics.entry(*action).or_default().merge(metrics);
            }
            state.resamples += resamples;
            if self.racing {
                self.race(state);
            }
            Snapshot {
                eliminated: state.eliminated.clone(),
                games: state.games,
                decided: self.candidates > 1 && self.candidates - state.eliminated.len() <= 1,
            }
        };
        self.checkpoint(&snapshot);
        snapshot
    }

    fn race(&self, state: &mut State) {
        let live = state
            .metrics
            .iter()
            .filter(|(action, _)| !state.eliminated.contains(*action));
        let standings = standings(live, self.evaluating, self.secondary);
        let dropped = eliminate(&standings, self.confidence, self.secondary);
        for action in dropped {
            log::debug!("eliminated {} after {} games", action, state.games);
            state.eliminated.insert(action);
        }
    }

    fn checkpoint(&self, snapshot: &Snapshot) {
        let mut last = self.checked.lock().unwrap_or_else(|e| e.into_inner());
        if last.elapsed() >= PROGRESS_LOG_INTERVAL {
            *last = Instant::now();
            std::mem::drop(last);
            let elapsed = self.started.elapsed().as_secs_f64();
            log::info!(
                "{:>10} games {:>8.0} games/s {:>4} of {} candidates left",
                snapshot.games,
                snapshot.games as f64 / elapsed,
                self.candidates - snapshot.eliminated.len(),
                self.candidates
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Final standings, live candidates first, each group best-first.
    pub fn report(&self) -> Report {
        let state = self.lock();
        let ranked = standings(state.metrics.iter(), self.evaluating, self.secondary);
        let (live, dead): (Vec<_>, Vec<_>) = ranked
            .into_iter()
            .partition(|(action, _)| !state.eliminated.contains(action));
        let standings = live
            .into_iter()
            .chain(dead)
            .map(|(action, metrics)| {
                let eliminated = state.eliminated.contains(&action);
                Standing::new(action, metrics, eliminated, self.confidence)
            })
            .collect();
        let seconds = self.started.elapsed().as_secs_f64();
        Report {
            standings,
            games: state.games,
            resamples: state.resamples,
            seconds,
            games_per_second: state.games as f64 / seconds.max(f64::EPSILON),
        }
    }
}
