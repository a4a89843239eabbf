use super::rank::Rank;
use super::suit::Suit;
use crate::Count;
use std::fmt::{Display, Formatter, Result};

/// Ordering is by (rank, suit), which is also the order of the
/// u8 encoding, so sorting cards and sorting their bits agree.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    pub fn count(&self) -> Count {
        self.rank.count()
    }
    /// parse a comma separated list such as "5h, 5S, J♣"
    pub fn parse_many(s: &str) -> anyhow::Result<Vec<Self>> {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::try_from)
            .collect()
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
/// 5♥
/// 18
/// 0b00010010
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.suit) + u8::from(c.rank) * 4
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 isomorphism
/// each card is just one bit turned on
/// 5♥
/// xxxxxxxxxxxx 0000000000000000000000000000000001000000000000000000
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self::from(n.trailing_zeros() as u8)
    }
}

/// str isomorphism
/// rank character then suit glyph or letter, any case
impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => Ok(Self {
                rank: Rank::try_from(r)?,
                suit: Suit::try_from(s)?,
            }),
            _ => Err(anyhow::anyhow!("card must be two characters: {:?}", s)),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        assert!((0..52u8).all(|n| u8::from(Card::from(n)) == n));
    }

    #[test]
    fn bijective_u64() {
        let card = Card::from((Rank::Jack, Suit::Diamond));
        assert_eq!(card, Card::from(u64::from(card)));
    }

    #[test]
    fn bijective_str() {
        for n in 0..52u8 {
            let card = Card::from(n);
            assert_eq!(Card::try_from(card.to_string().as_str()).unwrap(), card);
        }
    }

    #[test]
    fn parse_list() {
        let cards = Card::parse_many("5h, 5S,j♣").unwrap();
        assert_eq!(
            cards,
            vec![
                Card::from((Rank::Five, Suit::Heart)),
                Card::from((Rank::Five, Suit::Spade)),
                Card::from((Rank::Jack, Suit::Club)),
            ]
        );
        assert!(Card::parse_many("5h, 10s").is_err());
        assert!(Card::parse_many("").unwrap().is_empty());
    }

    #[test]
    fn ordered_by_rank_then_suit() {
        let a = Card::try_from("AS").unwrap();
        let b = Card::try_from("2C").unwrap();
        let c = Card::try_from("2D").unwrap();
        assert!(a < b && b < c);
    }
}
