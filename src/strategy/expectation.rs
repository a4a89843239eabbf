//! Expected hand and crib values, averaged over the unseen cards.
//!
//! The rank-only functions integrate over ranks weighted by how many
//! copies of each rank remain; they ignore flushes and nobs, which is
//! what lets them share cache entries across suits. The suit-aware
//! functions integrate over actual cards.
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Hand;
use crate::cards::Rank;
use crate::cards::Suit;
use crate::scoring::Memo;
use crate::scoring::Ranks;

/// copies of each rank in a deck
const COPIES: usize = Suit::COUNT;

/// Average fifteens, pairs and runs of the kept ranks over every
/// starter rank, weighted by the copies not already dealt.
pub fn post_cut_ranked(kept: Ranks, dealt: Ranks, memo: &mut Memo) -> f64 {
    let mut total = 0.;
    let mut weight = 0.;
    for rank in Rank::all() {
        let copies = (COPIES - dealt.count(rank)) as f64;
        if copies > 0. {
            total += copies * memo.points(kept.with(rank)) as f64;
            weight += copies;
        }
    }
    total / weight
}

/// Average score of the kept cards over every starter left in the deck.
pub fn post_cut_suited(kept: Hand, dealt: Hand, memo: &mut Memo) -> f64 {
    let starters = Deck::new().without(&dealt);
    let total = Hand::from(starters)
        .map(|starter| memo.score_hand(kept, Some(starter), false) as f64)
        .sum::<f64>();
    total / starters.size() as f64
}

/// Expected crib from two discarded ranks, if the opponent discards
/// two random cards. Integrates over the starter rank and both opponent
/// ranks, weighted by remaining copies.
pub fn crib_ranked(discard: Ranks, memo: &mut Memo) -> f64 {
    if let Some(expected) = memo.cribs.get(&discard) {
        return expected;
    }
    let mut total = 0.;
    let mut weight = 0.;
    for starter in Rank::all() {
        let a = COPIES - discard.count(starter);
        let seen = discard.with(starter);
        for first in Rank::all() {
            let b = COPIES.saturating_sub(seen.count(first));
            let seen = seen.with(first);
            for second in Rank::all() {
                let c = COPIES.saturating_sub(seen.count(second));
                let combos = (a * b * c) as f64;
                if combos > 0. {
                    total += combos * memo.points(seen.with(second)) as f64;
                    weight += combos;
                }
            }
        }
    }
    memo.cribs.insert(discard, total / weight)
}

/// Expected crib from two discarded cards, if the opponent discards two
/// random cards. Only the relative suit of the discards matters, so the
/// pair is normalised before the cache lookup: higher card first as a
/// club, the other a club if suited and a diamond if not.
pub fn crib_suited(a: Card, b: Card, memo: &mut Memo) -> f64 {
    let key = normalise(a, b);
    if let Some(expected) = memo.suited_cribs.get(&key) {
        return expected;
    }
    let discards = Hand::from(vec![key.0, key.1]);
    let remaining = Vec::<Card>::from(Hand::from(Deck::new().without(&discards)));
    let mut total = 0.;
    let mut count = 0usize;
    for starter in remaining.iter() {
        for (i, x) in remaining.iter().enumerate() {
            for y in remaining[i + 1..].iter() {
                if x == starter || y == starter {
                    continue;
                }
                let crib = discards.union(&Hand::from(vec![*x, *y]));
                total += memo.score_hand(crib, Some(*starter), true) as f64;
                count += 1;
            }
        }
    }
    log::debug!(
        "expected crib {}{} {}suited = {:.5}",
        key.0.rank(),
        key.1.rank(),
        if key.0.suit() == key.1.suit() { "" } else { "un" },
        total / count as f64
    );
    memo.suited_cribs.insert(key, total / count as f64)
}

fn normalise(a: Card, b: Card) -> (Card, Card) {
    let suited = a.suit() == b.suit();
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    (
        Card::from((hi.rank(), Suit::Club)),
        Card::from((lo.rank(), if suited { Suit::Club } else { Suit::Diamond })),
    )
}

/// Suits can only matter to a keep from this deal if it holds a jack
/// (nobs) or four cards of one suit (flush).
pub fn suits_matter(dealt: Hand) -> bool {
    dealt.ranked(Rank::Jack) > 0
        || Suit::all()
            .into_iter()
            .any(|s| dealt.suited(s) >= crate::KEPT_CARDS)
}
