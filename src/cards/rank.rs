use crate::Count;

/// Card index, ace low. Runs are consecutive ranks in this order,
/// so A-2-3 is a run and Q-K-A is not.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Rank {
    #[default]
    Ace = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
    Nine = 8,
    Ten = 9,
    Jack = 10,
    Queen = 11,
    King = 12,
}

impl Rank {
    pub const MIN: Self = Rank::Ace;
    pub const MAX: Self = Rank::King;
    pub const COUNT: usize = 13;
    const INDICES: &'static str = "A23456789TJQK";

    /// Counting value toward 15 and 31: pip value, with faces worth 10.
    pub const fn count(&self) -> Count {
        let pips = *self as u8 + 1;
        if pips < 10 { pips } else { 10 }
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self::from)
    }
}

/// u8 isomorphism
impl From<u8> for Rank {
    fn from(n: u8) -> Rank {
        match n {
            0 => Rank::Ace,
            1 => Rank::Two,
            2 => Rank::Three,
            3 => Rank::Four,
            4 => Rank::Five,
            5 => Rank::Six,
            6 => Rank::Seven,
            7 => Rank::Eight,
            8 => Rank::Nine,
            9 => Rank::Ten,
            10 => Rank::Jack,
            11 => Rank::Queen,
            12 => Rank::King,
            _ => panic!("Invalid rank u8: {}", n),
        }
    }
}
impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

/// char isomorphism
impl TryFrom<char> for Rank {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::INDICES
            .find(c.to_ascii_uppercase())
            .map(|i| Rank::from(i as u8))
            .ok_or_else(|| anyhow::anyhow!("invalid rank: {}", c))
    }
}
impl From<Rank> for char {
    fn from(r: Rank) -> char {
        Rank::INDICES.as_bytes()[r as usize] as char
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}
