use super::hand::flush;
use super::hand::nobs;
use super::ranks::Ranks;
use crate::Points;
use crate::cards::Card;
use crate::cards::Hand;
use std::collections::HashMap;
use std::hash::Hash;

/// One memoised pure function. Entries are never evicted: every key
/// space here is a finite combinatorial domain.
#[derive(Debug)]
pub struct Table<K, V> {
    name: &'static str,
    map: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash,
    V: Copy,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            map: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(*v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }
    pub fn insert(&mut self, key: K, value: V) -> V {
        self.map.insert(key, value);
        value
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn hits(&self) -> usize {
        self.hits
    }
    pub fn misses(&self) -> usize {
        self.misses
    }
    fn log(&self) {
        let lookups = self.hits + self.misses;
        let rate = if lookups > 0 {
            self.hits as f64 / lookups as f64
        } else {
            0.
        };
        log::debug!(
            "{:<16} {:>8} entries {:>12} hits {:>10} misses {:>6.2}% hit rate",
            self.name,
            self.len(),
            self.hits,
            self.misses,
            rate * 100.
        );
    }
}

/// Memo is the explicit cache arena for every scoring and expectation
/// function. Each simulation worker owns one and threads it by `&mut`
/// through discard and play selection, so there is no process-wide
/// state and no locking on the hot path.
#[derive(Debug)]
pub struct Memo {
    /// fifteens + pairs + runs by rank multiset
    pub points: Table<Ranks, Points>,
    /// rank-only keep decisions by (dealt ranks, objective tag)
    pub keeps: Table<(Ranks, u8), Ranks>,
    /// rank-only expected crib by the two discarded ranks
    pub cribs: Table<Ranks, f64>,
    /// suit-aware expected crib by suit-normalised discard pair
    pub suited_cribs: Table<(Card, Card), f64>,
}

impl Memo {
    pub fn new() -> Self {
        Self {
            points: Table::new("points"),
            keeps: Table::new("keeps"),
            cribs: Table::new("cribs"),
            suited_cribs: Table::new("suited cribs"),
        }
    }

    /// memoised fifteens + pairs + runs
    pub fn points(&mut self, ranks: Ranks) -> Points {
        match self.points.get(&ranks) {
            Some(points) => points,
            None => self.points.insert(ranks, ranks.points()),
        }
    }

    /// memoised equivalent of [`super::score_hand`]
    pub fn score_hand(&mut self, kept: Hand, starter: Option<Card>, crib: bool) -> Points {
        let ranks = match starter {
            Some(s) => Ranks::from(kept).with(s.rank()),
            None => Ranks::from(kept),
        };
        self.points(ranks) + flush(kept, starter, crib) + nobs(kept, starter)
    }

    pub fn log_usage(&self) {
        self.points.log();
        self.keeps.log();
        self.cribs.log();
        self.suited_cribs.log();
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_hand;

    #[test]
    fn agrees_with_pure_scoring() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        let ref mut rng = SmallRng::seed_from_u64(17);
        let ref mut memo = Memo::new();
        for _ in 0..2_000 {
            let mut deck = crate::cards::Deck::new();
            let kept = deck.deal(4, rng);
            let starter = deck.draw(rng);
            assert_eq!(
                memo.score_hand(kept, Some(starter), true),
                score_hand(kept, Some(starter), true)
            );
        }
        assert!(memo.points.hits() > 0);
        assert_eq!(memo.points.misses(), memo.points.len());
    }
}
