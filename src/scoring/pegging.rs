use crate::Count;
use crate::FIFTEEN;
use crate::Points;
use crate::THIRTY_ONE;
use crate::cards::Card;

/// Points for the nth consecutive card of one rank:
/// a pair, pairs royale, double pairs royale.
pub fn pair_points(in_a_row: usize) -> Points {
    match in_a_row {
        2 => 2,
        3 => 6,
        4 => 12,
        _ => 0,
    }
}

/// Points for landing the count exactly on 15 or 31.
pub fn count_points(count: Count) -> Points {
    match count {
        FIFTEEN => 2,
        THIRTY_ONE => 1,
        _ => 0,
    }
}

/// Length of the longest run formed by the trailing cards of a segment,
/// or 0. The trailing K cards form a run when their ranks, sorted, are
/// consecutive; K is tried from the segment length down to 3.
pub fn run_length(segment: &[Card]) -> usize {
    (3..=segment.len())
        .rev()
        .find(|k| is_run(&segment[segment.len() - k..]))
        .unwrap_or(0)
}

fn is_run(cards: &[Card]) -> bool {
    let mut ranks = cards.iter().map(|c| u8::from(c.rank())).collect::<Vec<_>>();
    ranks.sort_unstable();
    ranks.windows(2).all(|w| w[1] == w[0] + 1)
}
