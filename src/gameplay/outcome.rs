use super::action::Action;
use super::player::Player;
use super::position::Position;
use super::score::GameScore;
use crate::cards::Card;
use crate::cards::Hand;

/// The decision under evaluation: a keep for the enumerated player,
/// a play right after the fixed actions, or both. Games are bucketed
/// by it. Neither is set when only whole strategies are compared.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NextAction {
    pub keep: Option<Hand>,
    pub play: Option<Card>,
}

impl std::fmt::Display for NextAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.keep, self.play) {
            (None, None) => write!(f, "as configured"),
            (Some(keep), None) => write!(f, "keep {}", keep),
            (None, Some(play)) => write!(f, "play {}", play),
            (Some(keep), Some(play)) => write!(f, "keep {} play {}", keep, play),
        }
    }
}

/// Why a simulated game broke a caller's constraint. A void game
/// is thrown away and resampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Void {
    /// the player's discard policy threw away a fixed card
    Unkept(Player),
    /// a forced card was not in the player's hand at its turn
    Unheld(Card),
    /// a forced action broke the rules at its turn
    Illegal(Action),
}

impl std::fmt::Display for Void {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Void::Unkept(player) => write!(f, "{} discarded a fixed card", player),
            Void::Unheld(card) => write!(f, "{} not held at its turn", card),
            Void::Illegal(action) => write!(f, "{} illegal at its turn", action),
        }
    }
}

/// What one simulated game produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub action: NextAction,
    pub score: GameScore,
    /// the score at the start of every hand played
    pub positions: Vec<Position>,
    pub void: Option<Void>,
    pub hands: usize,
}

impl Outcome {
    pub fn is_void(&self) -> bool {
        self.void.is_some()
    }
    /// where the next hand would have started, if the game is unfinished
    pub fn next_position(&self) -> Option<Position> {
        match self.score.over() {
            true => None,
            false => Some(Position::new(&self.score, Player::from(self.hands + 1))),
        }
    }
}
