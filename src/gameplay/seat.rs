/// A player's role within a single hand. The pone leads the play
/// and counts first; the dealer owns the crib.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Seat {
    Pone = 0,
    Dealer = 1,
}

impl Seat {
    pub fn other(&self) -> Self {
        match self {
            Seat::Pone => Seat::Dealer,
            Seat::Dealer => Seat::Pone,
        }
    }
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl From<usize> for Seat {
    fn from(n: usize) -> Self {
        match n % 2 {
            0 => Seat::Pone,
            _ => Seat::Dealer,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Seat::Pone => write!(f, "Pone"),
            Seat::Dealer => write!(f, "Dealer"),
        }
    }
}
