use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// Hand represents an unordered set of Cards in a single word.
/// Only the 52 least significant bits are used, one per card, so
/// iteration always comes out sorted by (rank, suit) and no hand,
/// kept cards or crib ever touches the heap.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hand(u64);

impl Hand {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub const fn full() -> Self {
        Self(Self::mask())
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn insert(&mut self, card: Card) {
        self.0 |= u64::from(card);
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }
    pub fn minus(&self, other: &Self) -> Self {
        Self(self.0 & !other.0)
    }
    pub fn intersect(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }
    pub fn complement(&self) -> Self {
        Self(self.0 ^ Self::mask())
    }

    /// the cards of one suit
    pub fn of(&self, suit: Suit) -> Self {
        Self(self.0 & (0x1111111111111 << u8::from(suit)))
    }
    /// how many cards of this suit are held
    pub fn suited(&self, suit: Suit) -> usize {
        self.of(suit).size()
    }
    /// how many cards of this rank are held
    pub fn ranked(&self, rank: Rank) -> usize {
        let shift = u8::from(rank) * 4;
        ((self.0 >> shift) & 0xF).count_ones() as usize
    }

    /// every k-card subset, in a fixed order
    pub fn subsets(&self, k: usize) -> Vec<Hand> {
        let cards = Vec::<Card>::from(*self);
        let n = cards.len();
        (0u32..(1 << n))
            .filter(|bits| bits.count_ones() as usize == k)
            .map(|bits| {
                (0..n)
                    .filter(|i| bits & (1 << i) != 0)
                    .map(|i| cards[i])
                    .collect::<Hand>()
            })
            .collect()
    }

    const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// we can empty a hand from low to high
/// by removing the lowest card until the hand is empty
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let card = Card::from(self.0.trailing_zeros() as u8);
            self.remove(card);
            Some(card)
        }
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

/// Vec<Card> isomorphism (up to Vec permutation, this always comes out sorted)
impl From<Hand> for Vec<Card> {
    fn from(h: Hand) -> Self {
        h.into_iter().collect()
    }
}
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::from(cards.as_slice())
    }
}
impl From<&[Card]> for Hand {
    fn from(cards: &[Card]) -> Self {
        Self(cards.iter().map(|c| u64::from(*c)).fold(0u64, |a, b| a | b))
    }
}
impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().map(u64::from).fold(0u64, |a, b| a | b))
    }
}

/// str isomorphism
/// this follows from Vec<Card> isomorphism
impl TryFrom<&str> for Hand {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Card::parse_many(s).map(Self::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .into_iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_iteration() {
        let hand = Hand::try_from("KS, 2D, AH, 2C").unwrap();
        let cards = Vec::<Card>::from(hand);
        assert_eq!(hand.size(), 4);
        assert!(cards.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(hand.to_string(), "A♥ 2♣ 2♦ K♠");
    }

    #[test]
    fn rank_and_suit_counts() {
        let hand = Hand::try_from("5C, 5D, 5H, JH, 2H").unwrap();
        assert_eq!(hand.ranked(Rank::Five), 3);
        assert_eq!(hand.ranked(Rank::Jack), 1);
        assert_eq!(hand.ranked(Rank::King), 0);
        assert_eq!(hand.suited(Suit::Heart), 3);
    }

    #[test]
    fn six_choose_four() {
        let dealt = Hand::try_from("AC, 2C, 3C, 4C, 5C, 6C").unwrap();
        let keeps = dealt.subsets(4);
        assert_eq!(keeps.len(), crate::POSSIBLE_KEEPS);
        assert!(keeps.iter().all(|k| k.is_subset(&dealt) && k.size() == 4));
    }

    #[test]
    fn set_algebra() {
        let a = Hand::try_from("AC, 2C, 3C").unwrap();
        let b = Hand::try_from("3C, 4C").unwrap();
        assert_eq!(a.union(&b).size(), 4);
        assert_eq!(a.minus(&b), Hand::try_from("AC, 2C").unwrap());
        assert_eq!(a.intersect(&b).size(), 1);
        assert_eq!(Hand::full().size(), 52);
        assert_eq!(a.complement().size(), 49);
    }
}
