pub mod context;
pub use context::*;

pub mod discard;
pub use discard::*;

pub mod expectation;
pub use expectation::*;

pub mod heuristic;
pub use heuristic::*;

pub mod play;
pub use play::*;

use crate::gameplay::Seat;

/// One player's policies. The discard depends on the seat, since
/// the crib counts for the dealer and against the pone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub pone: Discard,
    pub dealer: Discard,
    pub play: Play,
}

impl Strategy {
    pub fn discard(&self, seat: Seat) -> &Discard {
        match seat {
            Seat::Pone => &self.pone,
            Seat::Dealer => &self.dealer,
        }
    }
    /// Whether any decision of this strategy runs nested simulations.
    pub fn simulates(&self) -> bool {
        matches!(self.pone, Discard::Simulated(_))
            || matches!(self.dealer, Discard::Simulated(_))
            || matches!(self.play, Play::Simulated(_))
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            pone: Discard::pone(),
            dealer: Discard::dealer(),
            play: Play::default(),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "pone {} / dealer {} / play {}",
            self.pone, self.dealer, self.play
        )
    }
}
