use crate::cards::Card;
use std::fmt::{Display, Formatter, Result};

/// One turn of the play to 31.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Action {
    Play(Card),
    Go,
}

impl Action {
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play(card) => Some(*card),
            Action::Go => None,
        }
    }
    /// parse a comma separated list such as "5h, go, 5s"
    pub fn parse_many(s: &str) -> anyhow::Result<Vec<Self>> {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::try_from)
            .collect()
    }
}

impl From<Card> for Action {
    fn from(card: Card) -> Self {
        Action::Play(card)
    }
}

/// str isomorphism
impl TryFrom<&str> for Action {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s.trim() {
            go if go.eq_ignore_ascii_case("go") => Ok(Action::Go),
            card => Card::try_from(card).map(Action::Play),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Action::Play(card) => write!(f, "{}", card),
            Action::Go => write!(f, "Go"),
        }
    }
}
