use crate::Count;
use crate::FIFTEEN;
use crate::THIRTY_ONE;
use crate::cards::Card;
use crate::scoring::run_length;

/// Counts a dump may leave: past 15, and too high for the opponent
/// to reach 31 with one ten-card.
const DUMP: std::ops::RangeInclusive<Count> = (FIFTEEN + 1)..=(THIRTY_ONE - 11);

/// One link in a play chain. Each either picks a card or has no opinion.
/// All of them are pure in (legal cards, count, segment cards), and
/// ties go to the earliest legal card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// opening a segment, lead the highest card counting under 5
    LowLead,
    /// make three or four of a kind
    PairsRoyale,
    /// extend the longest run
    Run,
    Fifteen,
    ThirtyOne,
    /// the first card reaching either 15 or 31
    FifteenOrThirtyOne,
    /// pair the last card
    Pair,
    /// leave the count between 16 and 20
    Dump,
    /// the highest counting card; always has an opinion
    Highest,
}

impl Heuristic {
    pub fn pick(&self, legal: &[Card], count: Count, played: &[Card]) -> Option<usize> {
        match self {
            Heuristic::LowLead => match count {
                0 => first_max(legal, |c| c.count() < 5),
                _ => None,
            },
            Heuristic::PairsRoyale => match played {
                [.., a, b] if a.rank() == b.rank() => {
                    legal.iter().position(|c| c.rank() == b.rank())
                }
                _ => None,
            },
            Heuristic::Run => legal
                .iter()
                .enumerate()
                .map(|(i, card)| (i, extended(played, *card)))
                .filter(|(_, length)| *length > 0)
                .fold(None, |best: Option<(usize, usize)>, (i, length)| match best {
                    Some((_, b)) if b >= length => best,
                    _ => Some((i, length)),
                })
                .map(|(i, _)| i),
            Heuristic::Fifteen => reach(legal, count, |n| n == FIFTEEN),
            Heuristic::ThirtyOne => reach(legal, count, |n| n == THIRTY_ONE),
            Heuristic::FifteenOrThirtyOne => {
                reach(legal, count, |n| n == FIFTEEN || n == THIRTY_ONE)
            }
            Heuristic::Pair => match played.last() {
                Some(last) => legal.iter().position(|c| c.rank() == last.rank()),
                None => None,
            },
            Heuristic::Dump => reach(legal, count, |n| DUMP.contains(&n)),
            Heuristic::Highest => first_max(legal, |_| true),
        }
    }
}

impl Heuristic {
    pub fn all() -> [Self; 9] {
        [
            Heuristic::LowLead,
            Heuristic::PairsRoyale,
            Heuristic::Run,
            Heuristic::Fifteen,
            Heuristic::ThirtyOne,
            Heuristic::FifteenOrThirtyOne,
            Heuristic::Pair,
            Heuristic::Dump,
            Heuristic::Highest,
        ]
    }
    fn name(&self) -> &'static str {
        match self {
            Heuristic::LowLead => "low-lead",
            Heuristic::PairsRoyale => "pairs-royale",
            Heuristic::Run => "run",
            Heuristic::Fifteen => "fifteen",
            Heuristic::ThirtyOne => "thirty-one",
            Heuristic::FifteenOrThirtyOne => "fifteen-or-thirty-one",
            Heuristic::Pair => "pair",
            Heuristic::Dump => "dump",
            Heuristic::Highest => "highest",
        }
    }
}

impl TryFrom<&str> for Heuristic {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::all()
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown play heuristic: {}", s))
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// run length made by playing this card next
fn extended(played: &[Card], card: Card) -> usize {
    let mut cards = played.to_vec();
    cards.push(card);
    run_length(&cards)
}

fn reach<F>(legal: &[Card], count: Count, target: F) -> Option<usize>
where
    F: Fn(Count) -> bool,
{
    legal.iter().position(|c| target(count + c.count()))
}

/// index of the first highest counting card passing the filter
fn first_max<F>(legal: &[Card], filter: F) -> Option<usize>
where
    F: Fn(&Card) -> bool,
{
    legal
        .iter()
        .enumerate()
        .filter(|(_, c)| filter(c))
        .fold(None, |best: Option<(usize, Count)>, (i, c)| match best {
            Some((_, b)) if b >= c.count() => best,
            _ => Some((i, c.count())),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        Card::parse_many(s).unwrap()
    }

    #[test]
    fn low_lead_only_on_empty_count() {
        let legal = cards("AC, 4D, 5H, KS");
        assert_eq!(Heuristic::LowLead.pick(&legal, 0, &[]), Some(1));
        assert_eq!(Heuristic::LowLead.pick(&legal, 10, &cards("KC")), None);
        assert_eq!(Heuristic::LowLead.pick(&cards("5H, KS"), 0, &[]), None);
    }

    #[test]
    fn pairs_royale_needs_a_pair_first() {
        let legal = cards("4D, 7H");
        assert_eq!(Heuristic::PairsRoyale.pick(&legal, 14, &cards("7C, 7S")), Some(1));
        assert_eq!(Heuristic::PairsRoyale.pick(&legal, 14, &cards("6C, 7S")), None);
        assert_eq!(Heuristic::Pair.pick(&legal, 13, &cards("6C, 7S")), Some(1));
    }

    #[test]
    fn run_prefers_longest() {
        let played = cards("4C, 5D");
        let legal = cards("3H, 6S, KD");
        assert_eq!(Heuristic::Run.pick(&legal, 9, &played), Some(0));
        let played = cards("4C, 5D, 6H");
        let legal = cards("8H, 7S, 3D");
        assert_eq!(Heuristic::Run.pick(&legal, 15, &played), Some(1));
        assert_eq!(Heuristic::Run.pick(&cards("KD"), 15, &played), None);
    }

    #[test]
    fn fixed_counts() {
        let legal = cards("2C, 5D, AH");
        assert_eq!(Heuristic::Fifteen.pick(&legal, 10, &[]), Some(1));
        assert_eq!(Heuristic::ThirtyOne.pick(&legal, 30, &[]), Some(2));
        assert_eq!(Heuristic::FifteenOrThirtyOne.pick(&legal, 29, &[]), Some(0));
        assert_eq!(Heuristic::Dump.pick(&legal, 14, &[]), Some(0));
        assert_eq!(Heuristic::Dump.pick(&legal, 20, &[]), None);
    }

    #[test]
    fn highest_takes_first_of_ties() {
        let legal = cards("TC, 5D, KH");
        assert_eq!(Heuristic::Highest.pick(&legal, 0, &[]), Some(0));
    }
}
