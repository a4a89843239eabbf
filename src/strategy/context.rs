use crate::Points;
use crate::cards::Card;
use crate::cards::Hand;
use crate::gameplay::Action;
use crate::gameplay::Seat;

/// What a policy may know about the hand in progress when it decides.
/// Static policies only look at the cards in front of them; the
/// look-ahead policies use the rest to set up their simulations.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub seat: Seat,
    /// running totals indexed by seat
    pub scores: [Points; 2],
    pub dealt: Hand,
    /// empty until the discard is made
    pub kept: Hand,
    /// none until the cut
    pub starter: Option<Card>,
    /// every play action of this hand so far, pone first
    pub history: &'a [Action],
}

impl<'a> Context<'a> {
    /// a context for discarding from a fresh deal at an even score
    pub fn dealt(seat: Seat, dealt: Hand) -> Self {
        Self {
            seat,
            scores: [0, 0],
            dealt,
            kept: Hand::empty(),
            starter: None,
            history: &[],
        }
    }
}
