use super::interval::Interval;
use super::metrics::Line;
use super::metrics::Metrics;
use crate::Confidence;
use crate::gameplay::NextAction;
use serde::Serialize;

/// Confidence intervals for one line of statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    pub play: Interval,
    pub hand: Interval,
    pub crib: Interval,
    pub total: Interval,
    pub game_points: Interval,
    pub wins: Interval,
}

impl Summary {
    pub fn new(line: &Line, confidence: Confidence) -> Self {
        Self {
            play: Interval::new(&line.play, confidence),
            hand: Interval::new(&line.hand, confidence),
            crib: Interval::new(&line.crib, confidence),
            total: Interval::new(&line.total, confidence),
            game_points: Interval::new(&line.game_points, confidence),
            wins: Interval::new(&line.wins, confidence),
        }
    }
}

/// Where one candidate finished.
#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    #[serde(skip)]
    pub action: NextAction,
    pub label: String,
    pub games: usize,
    pub eliminated: bool,
    pub first_pone: Summary,
    pub first_dealer: Summary,
    pub difference: Summary,
}

impl Standing {
    pub fn new(action: NextAction, metrics: &Metrics, eliminated: bool, confidence: Confidence) -> Self {
        Self {
            action,
            label: action.to_string(),
            games: metrics.count(),
            eliminated,
            first_pone: Summary::new(&metrics.first_pone, confidence),
            first_dealer: Summary::new(&metrics.first_dealer, confidence),
            difference: Summary::new(&metrics.difference, confidence),
        }
    }
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<28} {:>8} games  Δ game points {:<20} Δ points {:<20} Δ play {:<20} Δ wins {}{}",
            self.label,
            self.games,
            self.difference.game_points.to_string(),
            self.difference.total.to_string(),
            self.difference.play.to_string(),
            self.difference.wins,
            if self.eliminated { "  (eliminated)" } else { "" }
        )
    }
}

/// The result of a run: standings best-first, live candidates ahead
/// of eliminated ones.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub standings: Vec<Standing>,
    pub games: usize,
    pub resamples: usize,
    pub seconds: f64,
    pub games_per_second: f64,
}

impl Report {
    /// the leading live candidate
    pub fn best(&self) -> Option<&Standing> {
        self.standings.iter().find(|s| !s.eliminated && s.games > 0)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for standing in self.standings.iter() {
            writeln!(f, "{}", standing)?;
        }
        write!(
            f,
            "{} games, {} resampled, {:.1}s, {:.0} games/s",
            self.games, self.resamples, self.seconds, self.games_per_second
        )
    }
}
