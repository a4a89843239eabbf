use super::action::Action;
use super::peg::Peg;
use crate::Count;
use crate::THIRTY_ONE;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Rank;
use crate::scoring::count_points;
use crate::scoring::run_length;

/// The actions since the count last reset to zero.
///
/// Pairs are tracked as a streak of the most recently played rank;
/// a Go between two equal cards does not break the streak. The
/// segment ends, and resets itself, on the second consecutive Go.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    actions: Vec<Action>,
    count: Count,
    streak: Option<(Rank, usize)>,
    gos: usize,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn count(&self) -> Count {
        self.count
    }
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
    /// cards played in this segment, Go markers skipped
    pub fn cards(&self) -> Vec<Card> {
        self.actions.iter().filter_map(Action::card).collect()
    }
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
    pub fn playable(&self, card: &Card) -> bool {
        self.count + card.count() <= THIRTY_ONE
    }
    /// cards from this hand that keep the count at or below 31
    pub fn legal(&self, hand: Hand) -> Vec<Card> {
        hand.filter(|c| self.playable(c)).collect()
    }

    /// Play a card and return the pegs it earns, in scoring order:
    /// pairs, then 15 or 31, then runs.
    pub fn play(&mut self, card: Card) -> Vec<Peg> {
        debug_assert!(self.playable(&card));
        self.actions.push(Action::Play(card));
        self.count += card.count();
        self.gos = 0;
        let in_a_row = match self.streak {
            Some((rank, n)) if rank == card.rank() => n + 1,
            _ => 1,
        };
        self.streak = Some((card.rank(), in_a_row));
        let mut pegs = Vec::new();
        if in_a_row >= 2 {
            pegs.push(Peg::Pair(in_a_row));
        }
        match count_points(self.count) {
            0 => {}
            _ if self.count == THIRTY_ONE => pegs.push(Peg::ThirtyOne),
            _ => pegs.push(Peg::Fifteen),
        }
        match run_length(&self.cards()) {
            0 => {}
            n => pegs.push(Peg::Run(n)),
        }
        pegs
    }

    /// Say Go. The second consecutive Go earns a point for the player
    /// saying it, who played the last card, and starts a new segment.
    pub fn go(&mut self) -> Option<Peg> {
        self.actions.push(Action::Go);
        self.gos += 1;
        if self.gos == 2 {
            *self = Self::new();
            Some(Peg::Go)
        } else {
            None
        }
    }
}

/// Replay a legal sequence of actions; only the last segment remains.
impl From<&[Action]> for Segment {
    fn from(actions: &[Action]) -> Self {
        let mut segment = Self::new();
        for action in actions {
            match action {
                Action::Play(card) => {
                    segment.play(*card);
                }
                Action::Go => {
                    segment.go();
                }
            }
        }
        segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    #[test]
    fn pairs_survive_a_go() {
        let mut segment = Segment::new();
        assert!(segment.play(card("KC")).is_empty());
        assert_eq!(segment.go(), None);
        assert_eq!(segment.play(card("KD")), vec![Peg::Pair(2)]);
        assert_eq!(segment.count(), 20);
        assert!(segment.play(card("AD")).is_empty());
    }

    #[test]
    fn three_of_a_kind_to_fifteen() {
        let mut segment = Segment::new();
        segment.play(card("5C"));
        assert_eq!(segment.play(card("5D")), vec![Peg::Pair(2)]);
        assert_eq!(segment.play(card("5H")), vec![Peg::Pair(3), Peg::Fifteen]);
        assert_eq!(segment.play(card("5S")), vec![Peg::Pair(4)]);
    }

    #[test]
    fn run_out_of_order() {
        let mut segment = Segment::new();
        segment.play(card("4C"));
        segment.play(card("6D"));
        assert_eq!(segment.play(card("5H")), vec![Peg::Fifteen, Peg::Run(3)]);
        assert_eq!(segment.play(card("3S")), vec![Peg::Run(4)]);
    }

    #[test]
    fn second_go_resets() {
        let mut segment = Segment::new();
        segment.play(card("KC"));
        segment.play(card("QC"));
        segment.play(card("9C"));
        assert!(!segment.playable(&card("3C")));
        assert_eq!(segment.go(), None);
        assert_eq!(segment.go(), Some(Peg::Go));
        assert!(segment.is_empty());
        assert_eq!(segment.count(), 0);
        assert!(segment.play(card("KD")).is_empty());
    }

    #[test]
    fn replay_keeps_the_last_segment() {
        let actions = Action::parse_many("KC, QC, 9C, go, go, 5D, 6H").unwrap();
        let segment = Segment::from(actions.as_slice());
        assert_eq!(segment.count(), 11);
        assert_eq!(segment.cards(), Card::parse_many("5D, 6H").unwrap());
    }

    #[test]
    fn legal_plays_respect_thirty_one() {
        let mut segment = Segment::new();
        segment.play(card("KC"));
        segment.play(card("QC"));
        segment.play(card("5C"));
        let hand = Hand::try_from("AS, 9H, TS, 2D").unwrap();
        assert_eq!(segment.legal(hand), Card::parse_many("AS, 2D").unwrap());
    }
}
