use super::player::Player;
use super::score::GameScore;
use crate::Points;

/// The score at the start of a hand, plus who deals it.
/// Rendered as "12[D]-30" with the [D] marker on the dealer's side,
/// first pone on the left; this string is the tally store key.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    pub first_pone: Points,
    pub first_dealer: Points,
    pub dealer: Player,
}

impl Position {
    pub fn new(score: &GameScore, dealer: Player) -> Self {
        Self {
            first_pone: score.total(Player::FirstPone),
            first_dealer: score.total(Player::FirstDealer),
            dealer,
        }
    }
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (pone, dealer) = match self.dealer {
            Player::FirstPone => ("[D]", ""),
            Player::FirstDealer => ("", "[D]"),
        };
        write!(f, "{}{}-{}{}", self.first_pone, pone, self.first_dealer, dealer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealer_marker() {
        let score = GameScore::new(12, 30);
        assert_eq!(Position::new(&score, Player::FirstPone).key(), "12[D]-30");
        assert_eq!(Position::new(&score, Player::FirstDealer).key(), "12-30[D]");
    }
}
