use super::seat::Seat;

/// A player's identity for the whole game, named by the role it held
/// in the first hand. Roles alternate every hand, so the first pone
/// deals the second hand, the fourth, and so on.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Player {
    FirstPone = 0,
    FirstDealer = 1,
}

impl Player {
    pub const fn both() -> [Self; 2] {
        [Player::FirstPone, Player::FirstDealer]
    }
    pub fn other(&self) -> Self {
        match self {
            Player::FirstPone => Player::FirstDealer,
            Player::FirstDealer => Player::FirstPone,
        }
    }
    /// the player sitting in this seat during the given hand (0-indexed)
    pub fn at(seat: Seat, hand: usize) -> Self {
        Self::from((seat as usize + hand) % 2)
    }
    /// the seat this player holds during the given hand (0-indexed)
    pub fn seat(&self, hand: usize) -> Seat {
        Seat::from((*self as usize + hand) % 2)
    }
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl From<usize> for Player {
    fn from(n: usize) -> Self {
        match n % 2 {
            0 => Player::FirstPone,
            _ => Player::FirstDealer,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Player::FirstPone => write!(f, "first pone"),
            Player::FirstDealer => write!(f, "first dealer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_alternate() {
        assert_eq!(Player::at(Seat::Pone, 0), Player::FirstPone);
        assert_eq!(Player::at(Seat::Dealer, 0), Player::FirstDealer);
        assert_eq!(Player::at(Seat::Pone, 1), Player::FirstDealer);
        assert_eq!(Player::at(Seat::Dealer, 1), Player::FirstPone);
        assert!((0..6).all(|h| Player::both().iter().all(|p| Player::at(p.seat(h), h) == *p)));
    }
}
