use crate::Points;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Rank;
use crate::FIFTEEN;

/// Ranks is a rank multiset packed as a histogram, three bits per rank.
/// It is the canonical key for every suit-independent score: fifteens,
/// pairs and runs only ever look at ranks, so any two hands with the
/// same Ranks share one cache entry.
///
/// Counts never exceed 7 in practice (a deck has 4 of each rank and
/// scoring looks at 5 cards at most), so plain integer addition and
/// subtraction of two histograms never carries across fields.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ranks(u64);

impl Ranks {
    const BITS: u8 = 3;
    const FIELD: u64 = 0b111;

    pub const fn empty() -> Self {
        Self(0)
    }
    pub fn count(&self, rank: Rank) -> usize {
        ((self.0 >> (u8::from(rank) * Self::BITS)) & Self::FIELD) as usize
    }
    pub fn size(&self) -> usize {
        Rank::all().map(|r| self.count(r)).sum()
    }
    pub fn with(&self, rank: Rank) -> Self {
        Self(self.0 + (1 << (u8::from(rank) * Self::BITS)))
    }
    pub fn plus(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }
    /// caller guarantees other is a sub-multiset of self
    pub fn minus(&self, other: &Self) -> Self {
        debug_assert!(Rank::all().all(|r| other.count(r) <= self.count(r)));
        Self(self.0 - other.0)
    }
    /// ranks with multiplicity, ascending
    pub fn iter(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::all().flat_map(move |r| std::iter::repeat_n(r, self.count(r)))
    }

    /// 2 points per subset summing to exactly 15.
    /// subset sums are counted with multiplicity: c copies of a rank
    /// can contribute k of them in C(c, k) ways.
    pub fn fifteens(&self) -> Points {
        let target = FIFTEEN as usize;
        let mut ways = [0u32; FIFTEEN as usize + 1];
        ways[0] = 1;
        for rank in Rank::all() {
            let copies = self.count(rank);
            let value = rank.count() as usize;
            if copies == 0 {
                continue;
            }
            let mut next = [0u32; FIFTEEN as usize + 1];
            for (sum, n) in ways.iter().enumerate().filter(|(_, n)| **n > 0) {
                for k in 0..=copies {
                    let total = sum + k * value;
                    if total <= target {
                        next[total] += n * choose(copies, k);
                    }
                }
            }
            ways = next;
        }
        2 * ways[target] as Points
    }

    /// 2 points per unordered pair of equal rank
    pub fn pairs(&self) -> Points {
        Rank::all()
            .map(|r| self.count(r) as Points)
            .map(|c| c * (c - 1))
            .sum()
    }

    /// the longest stretch of consecutive ranks, if at least three long,
    /// scores its length once per way of picking one card of each rank.
    pub fn runs(&self) -> Points {
        let mut best = 0;
        let mut length = 0;
        let mut multiplicity = 1;
        for rank in Rank::all() {
            match self.count(rank) {
                0 => {
                    best = best.max(Self::stretch(length, multiplicity));
                    length = 0;
                    multiplicity = 1;
                }
                c => {
                    length += 1;
                    multiplicity *= c as Points;
                }
            }
        }
        best.max(Self::stretch(length, multiplicity))
    }

    /// fifteens + pairs + runs
    pub fn points(&self) -> Points {
        self.fifteens() + self.pairs() + self.runs()
    }

    fn stretch(length: Points, multiplicity: Points) -> Points {
        if length >= 3 { length * multiplicity } else { 0 }
    }
}

fn choose(n: usize, k: usize) -> u32 {
    match (n, k) {
        (_, 0) => 1,
        (n, k) if k > n => 0,
        (n, k) => (1..=k).fold(1u32, |acc, i| acc * (n + 1 - i) as u32 / i as u32),
    }
}

impl From<Hand> for Ranks {
    fn from(hand: Hand) -> Self {
        hand.fold(Self::empty(), |ranks, card| ranks.with(card.rank()))
    }
}
impl From<&[Card]> for Ranks {
    fn from(cards: &[Card]) -> Self {
        cards
            .iter()
            .fold(Self::empty(), |ranks, card| ranks.with(card.rank()))
    }
}
impl From<&[Rank]> for Ranks {
    fn from(ranks: &[Rank]) -> Self {
        ranks.iter().fold(Self::empty(), |acc, r| acc.with(*r))
    }
}

impl std::fmt::Display for Ranks {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.iter().try_for_each(|r| write!(f, "{}", r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(s: &str) -> Ranks {
        s.chars()
            .map(|c| Rank::try_from(c).unwrap())
            .fold(Ranks::empty(), |acc, r| acc.with(r))
    }

    #[test]
    fn histogram_counts() {
        let r = ranks("55J5A");
        assert_eq!(r.count(Rank::Five), 3);
        assert_eq!(r.size(), 5);
        assert_eq!(r.to_string(), "A555J");
        assert_eq!(r.minus(&ranks("5J")), ranks("A55"));
    }

    #[test]
    fn fifteens_with_multiplicity() {
        assert_eq!(ranks("5555J").fifteens(), 16);
        assert_eq!(ranks("78").fifteens(), 2);
        assert_eq!(ranks("A2345").fifteens(), 2);
        assert_eq!(ranks("TJQK9").fifteens(), 0);
    }

    #[test]
    fn pairs_royale() {
        assert_eq!(ranks("55").pairs(), 2);
        assert_eq!(ranks("555").pairs(), 6);
        assert_eq!(ranks("5555").pairs(), 12);
        assert_eq!(ranks("5566").pairs(), 4);
    }

    #[test]
    fn runs_longest_only() {
        assert_eq!(ranks("A2345").runs(), 5);
        assert_eq!(ranks("3345").runs(), 6);
        assert_eq!(ranks("33455").runs(), 12);
        assert_eq!(ranks("3456").runs(), 4);
        assert_eq!(ranks("QKA23").runs(), 3);
        assert_eq!(ranks("QKA").runs(), 0);
        assert_eq!(ranks("2479").runs(), 0);
    }
}
