use crate::Points;
use crate::scoring::pair_points;

/// A scoring event during the play. All of them are booked as play points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peg {
    /// the starter is a jack, for the dealer
    Heels,
    /// the nth consecutive card of one rank
    Pair(usize),
    Fifteen,
    ThirtyOne,
    Run(usize),
    /// both players said go in a row
    Go,
    LastCard,
}

impl Peg {
    pub fn points(&self) -> Points {
        match self {
            Peg::Heels => 2,
            Peg::Pair(n) => pair_points(*n),
            Peg::Fifteen => 2,
            Peg::ThirtyOne => 1,
            Peg::Run(n) => *n as Points,
            Peg::Go => 1,
            Peg::LastCard => 1,
        }
    }
}

impl std::fmt::Display for Peg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Peg::Heels => write!(f, "his heels for {}", self.points()),
            Peg::Pair(2) => write!(f, "pair for {}", self.points()),
            Peg::Pair(3) => write!(f, "pairs royale for {}", self.points()),
            Peg::Pair(_) => write!(f, "double pairs royale for {}", self.points()),
            Peg::Fifteen => write!(f, "fifteen for {}", self.points()),
            Peg::ThirtyOne => write!(f, "thirty-one for {}", self.points()),
            Peg::Run(n) => write!(f, "run of {} for {}", n, self.points()),
            Peg::Go => write!(f, "go for {}", self.points()),
            Peg::LastCard => write!(f, "last card for {}", self.points()),
        }
    }
}
