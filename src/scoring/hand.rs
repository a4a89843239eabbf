use super::ranks::Ranks;
use crate::Points;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Rank;
use crate::cards::Suit;

/// Flush. Four kept cards of one suit score 4, or 5 when the starter
/// matches. A crib only scores the five-card flush.
pub fn flush(kept: Hand, starter: Option<Card>, crib: bool) -> Points {
    if kept.size() != crate::KEPT_CARDS {
        return 0;
    }
    let Some(suit) = Suit::all().into_iter().find(|s| kept.of(*s) == kept) else {
        return 0;
    };
    match starter {
        Some(s) if s.suit() == suit => 5,
        _ if crib => 0,
        _ => 4,
    }
}

/// Nobs. The kept jack of the starter's suit.
pub fn nobs(kept: Hand, starter: Option<Card>) -> Points {
    match starter {
        Some(s) if kept.contains(&Card::from((Rank::Jack, s.suit()))) => 1,
        _ => 0,
    }
}

/// Points for a kept hand (or crib) and an optional starter.
/// Without a starter this is the pre-cut value of the four cards.
pub fn score_hand(kept: Hand, starter: Option<Card>, crib: bool) -> Points {
    let ranks = match starter {
        Some(s) => Ranks::from(kept).with(s.rank()),
        None => Ranks::from(kept),
    };
    ranks.points() + flush(kept, starter, crib) + nobs(kept, starter)
}
