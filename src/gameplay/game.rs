use super::action::Action;
use super::fixed::Fixed;
use super::outcome::NextAction;
use super::outcome::Outcome;
use super::outcome::Void;
use super::player::Player;
use super::position::Position;
use super::score::GameScore;
use super::score::Phase;
use super::seat::Seat;
use super::segment::Segment;
use crate::DEALT_CARDS;
use crate::Points;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Hand;
use crate::cards::Rank;
use crate::scoring::Memo;
use crate::strategy::Context;
use crate::strategy::Strategy;
use rand::Rng;

/// Which decisions rotate through candidates instead of following
/// a strategy. Only the first hand is affected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enumerate {
    /// rotate every keep of this player's six fixed cards
    pub keeps: Option<Player>,
    /// rotate every card for the play after the fixed actions
    pub plays: bool,
}

/// Everything about a game that stays constant across simulations.
#[derive(Debug, Clone, Default)]
pub struct Setup {
    /// indexed by [`Player`]
    pub strategies: [Strategy; 2],
    pub fixed: Fixed,
    /// starting totals, indexed by [`Player`]
    pub initial: [Points; 2],
    /// stop after this many hands even if nobody has won
    pub hands: Option<usize>,
    pub enumerate: Enumerate,
}

/// Game sequences the hands of one game: deal, discard, cut, the play
/// to 31, then the pone's hand, the dealer's hand and the crib. Every
/// award goes through [`GameScore::add`], and the game stops the moment
/// either total reaches the maximum.
pub struct Game<'a> {
    setup: &'a Setup,
    choice: NextAction,
    score: GameScore,
    positions: Vec<Position>,
    hand: usize,
}

/// One hand's cards, indexed by [`Seat`].
struct Deal {
    dealt: [Vec<Card>; 2],
    kept: [Hand; 2],
    crib: Hand,
    starter: Card,
}

enum Ended {
    Void(Void),
    Over,
    Continue,
}

impl<'a> Game<'a> {
    pub fn new(setup: &'a Setup, choice: NextAction) -> Self {
        Self {
            setup,
            choice,
            score: GameScore::new(setup.initial[0], setup.initial[1]),
            positions: Vec::new(),
            hand: 0,
        }
    }

    /// Play hands until someone wins, the hand limit is reached, or a
    /// constraint is broken.
    pub fn play<R: Rng>(mut self, memo: &mut Memo, rng: &mut R) -> anyhow::Result<Outcome> {
        let mut void = None;
        while !self.score.over() && self.setup.hands.is_none_or(|h| self.hand < h) {
            self.positions.push(Position::new(&self.score, self.dealer()));
            log::debug!("hand {} from {}", self.hand + 1, self.positions[self.hand]);
            let ended = self.deal(memo, rng)?;
            self.hand += 1;
            match ended {
                Ended::Void(v) => {
                    log::debug!("void game: {}", v);
                    void = Some(v);
                    break;
                }
                Ended::Over => break,
                Ended::Continue => continue,
            }
        }
        log::debug!("game over after {} hands at {}", self.hand, self.score);
        Ok(Outcome {
            action: self.choice,
            score: self.score,
            positions: self.positions,
            void,
            hands: self.hand,
        })
    }

    fn dealer(&self) -> Player {
        Player::at(Seat::Dealer, self.hand)
    }
    fn player(&self, seat: Seat) -> Player {
        Player::at(seat, self.hand)
    }
    fn first(&self) -> bool {
        self.hand == 0
    }
    fn fixed(&self) -> Option<&'a Fixed> {
        match self.first() {
            true => Some(&self.setup.fixed),
            false => None,
        }
    }
    /// running totals, indexed by seat
    fn scores(&self) -> [Points; 2] {
        [
            self.score.total(self.player(Seat::Pone)),
            self.score.total(self.player(Seat::Dealer)),
        ]
    }
    fn award(&mut self, seat: Seat, phase: Phase, points: Points) -> bool {
        points > 0 && self.score.add(self.player(seat), phase, points)
    }

    fn deal<R: Rng>(&mut self, memo: &mut Memo, rng: &mut R) -> anyhow::Result<Ended> {
        let mut deck = match self.fixed() {
            Some(fixed) => Deck::new().without(&fixed.cards()),
            None => Deck::new(),
        };
        let mut dealt = [Vec::new(), Vec::new()];
        for seat in [Seat::Pone, Seat::Dealer] {
            let mut cards = match self.fixed() {
                Some(fixed) => fixed.hand(self.player(seat)),
                None => Vec::new(),
            };
            while cards.len() < DEALT_CARDS {
                cards.push(deck.draw(rng));
            }
            dealt[seat.index()] = cards;
        }
        let mut kept = [Hand::empty(); 2];
        for seat in [Seat::Pone, Seat::Dealer] {
            match self.discard(seat, &dealt[seat.index()], memo, rng)? {
                Ok(keep) => kept[seat.index()] = keep,
                Err(void) => return Ok(Ended::Void(void)),
            }
        }
        let crib = [Seat::Pone, Seat::Dealer]
            .iter()
            .map(|s| Hand::from(dealt[s.index()].as_slice()).minus(&kept[s.index()]))
            .fold(Hand::empty(), |crib, discard| crib.union(&discard));
        let starter = match self.fixed().and_then(|f| f.starter) {
            Some(starter) => starter,
            None => deck.draw(rng),
        };
        let ref deal = Deal {
            dealt,
            kept,
            crib,
            starter,
        };
        log::debug!(
            "pone [{}] dealer [{}] crib [{}] starter {}",
            deal.kept[0],
            deal.kept[1],
            deal.crib,
            deal.starter
        );
        if starter.rank() == Rank::Jack && self.award(Seat::Dealer, Phase::Play, 2) {
            return Ok(Ended::Over);
        }
        match self.peg(deal, memo, rng)? {
            Ended::Continue => {}
            ended => return Ok(ended),
        }
        Ok(self.show(deal, memo))
    }

    /// The keep for one seat, or the reason it broke a constraint.
    fn discard<R: Rng>(
        &self,
        seat: Seat,
        dealt: &[Card],
        memo: &mut Memo,
        rng: &mut R,
    ) -> anyhow::Result<Result<Hand, Void>> {
        let player = self.player(seat);
        let fixed = self
            .fixed()
            .map(|f| f.kept_including_played(player))
            .unwrap_or_default();
        if self.first() && self.setup.enumerate.keeps == Some(player) {
            let keep = self
                .choice
                .keep
                .ok_or_else(|| anyhow::anyhow!("no keep chosen for {}", player))?;
            anyhow::ensure!(
                keep.is_subset(&Hand::from(dealt)),
                "keep [{}] not dealt to {}",
                keep,
                player
            );
            return Ok(Ok(keep));
        }
        if fixed.size() == crate::KEPT_CARDS {
            return Ok(Ok(fixed));
        }
        let context = Context {
            seat,
            scores: self.scores(),
            dealt: Hand::from(dealt),
            kept: Hand::empty(),
            starter: None,
            history: &[],
        };
        let strategy = &self.setup.strategies[player.index()];
        let keep = strategy
            .discard(seat)
            .select_keep(dealt, &context, memo, rng)?;
        match fixed.is_subset(&keep) {
            true => Ok(Ok(keep)),
            false => Ok(Err(Void::Unkept(player))),
        }
    }

    /// The play to 31. Forced actions go first, then the chosen play,
    /// then each player's policy.
    fn peg<R: Rng>(&mut self, deal: &Deal, memo: &mut Memo, rng: &mut R) -> anyhow::Result<Ended> {
        let forced = match self.fixed() {
            Some(fixed) => fixed.actions.as_slice(),
            None => &[],
        };
        let chosen = self.choice.play.filter(|_| self.first());
        let mut hands = deal.kept;
        let mut history = Vec::<Action>::new();
        let mut segment = Segment::new();
        let mut seat = Seat::Pone;
        let mut last = None;
        while hands.iter().any(|h| !h.is_empty()) {
            let hand = hands[seat.index()];
            let legal = segment.legal(hand);
            let turn = history.len();
            let action = match (forced.get(turn), chosen) {
                (Some(action), _) => match check(*action, hand, &legal) {
                    Ok(action) => action,
                    Err(void) => return Ok(Ended::Void(void)),
                },
                (None, Some(card)) if turn == forced.len() => {
                    match check(Action::Play(card), hand, &legal) {
                        Ok(action) => action,
                        Err(void) => return Ok(Ended::Void(void)),
                    }
                }
                _ => match legal.len() {
                    0 => Action::Go,
                    1 => Action::Play(legal[0]),
                    _ => {
                        let player = self.player(seat);
                        let context = Context {
                            seat,
                            scores: self.scores(),
                            dealt: Hand::from(deal.dealt[seat.index()].as_slice()),
                            kept: deal.kept[seat.index()],
                            starter: Some(deal.starter),
                            history: &history,
                        };
                        let i = self.setup.strategies[player.index()]
                            .play
                            .select_play(&legal, &segment, &context, memo, rng)?;
                        Action::Play(legal[i])
                    }
                },
            };
            history.push(action);
            let pegs = match action {
                Action::Play(card) => {
                    hands[seat.index()].remove(card);
                    last = Some(seat);
                    segment.play(card)
                }
                Action::Go => segment.go().into_iter().collect(),
            };
            log::trace!("{} {} to {}", seat, action, segment.count());
            for peg in pegs {
                log::trace!("{} pegs {} for {}", seat, peg, peg.points());
                if self.award(seat, Phase::Play, peg.points()) {
                    return Ok(Ended::Over);
                }
            }
            seat = seat.other();
        }
        match last {
            Some(seat) if self.award(seat, Phase::Play, 1) => Ok(Ended::Over),
            _ => Ok(Ended::Continue),
        }
    }

    /// Count the pone's hand, then the dealer's, then the crib.
    fn show(&mut self, deal: &Deal, memo: &mut Memo) -> Ended {
        let starter = Some(deal.starter);
        let pone = memo.score_hand(deal.kept[Seat::Pone.index()], starter, false);
        let dealer = memo.score_hand(deal.kept[Seat::Dealer.index()], starter, false);
        let crib = memo.score_hand(deal.crib, starter, true);
        log::debug!("pone {} dealer {} crib {}", pone, dealer, crib);
        if self.award(Seat::Pone, Phase::Hand, pone)
            || self.award(Seat::Dealer, Phase::Hand, dealer)
            || self.award(Seat::Dealer, Phase::Crib, crib)
        {
            return Ended::Over;
        }
        Ended::Continue
    }
}

/// A forced action must be possible with the cards actually held.
fn check(action: Action, hand: Hand, legal: &[Card]) -> Result<Action, Void> {
    match action {
        Action::Play(card) if !hand.contains(&card) => Err(Void::Unheld(card)),
        Action::Play(card) if !legal.contains(&card) => Err(Void::Illegal(action)),
        Action::Go if !legal.is_empty() => Err(Void::Illegal(action)),
        _ => Ok(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_SCORE;
    use crate::strategy::Discard;
    use crate::strategy::Play;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn play(setup: &Setup, choice: NextAction, seed: u64) -> Outcome {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let ref mut memo = Memo::new();
        Game::new(setup, choice).play(memo, rng).unwrap()
    }

    #[test]
    fn games_end_at_the_cap() {
        let setup = Setup::default();
        for seed in 0..20 {
            let outcome = play(&setup, NextAction::default(), seed);
            assert!(outcome.void.is_none());
            assert!(outcome.score.over());
            let winner = outcome.score.winner().unwrap();
            assert_eq!(outcome.score.total(winner), MAX_SCORE);
            assert!(outcome.score.total(winner.other()) < MAX_SCORE);
            assert_eq!(outcome.positions.len(), outcome.hands);
            assert!(outcome.next_position().is_none());
        }
    }

    #[test]
    fn hand_limit_stops_early() {
        let setup = Setup {
            hands: Some(1),
            ..Setup::default()
        };
        let outcome = play(&setup, NextAction::default(), 7);
        assert_eq!(outcome.hands, 1);
        assert_eq!(outcome.positions[0].key(), "0-0[D]");
        assert_eq!(outcome.next_position().unwrap().dealer, Player::FirstPone);
        let pone = outcome.score.ledger(Player::FirstPone);
        let dealer = outcome.score.ledger(Player::FirstDealer);
        assert_eq!(pone.crib, 0);
        assert!((0..=29).contains(&pone.hand) && (0..=29).contains(&dealer.hand));
    }

    #[test]
    fn fixed_cards_are_dealt_and_kept() {
        let mut setup = Setup {
            hands: Some(1),
            ..Setup::default()
        };
        setup.fixed.dealt[0] = Card::parse_many("5S, 5D, 5C, JH, KC, QD").unwrap();
        setup.fixed.starter = Card::try_from("5H").ok();
        setup.strategies[0].pone = Discard::FirstFour;
        let outcome = play(&setup, NextAction::default(), 3);
        assert_eq!(outcome.score.ledger(Player::FirstPone).hand, 29);
    }

    #[test]
    fn enumerated_keep_is_used() {
        let mut setup = Setup {
            hands: Some(1),
            ..Setup::default()
        };
        setup.fixed.dealt[1] = Card::parse_many("AS, 2S, 3S, 4S, 9D, KC").unwrap();
        setup.fixed.starter = Card::try_from("7H").ok();
        setup.enumerate.keeps = Some(Player::FirstDealer);
        let keep = Hand::try_from("AS, 2S, 3S, 4S").unwrap();
        let choice = NextAction {
            keep: Some(keep),
            play: None,
        };
        let outcome = play(&setup, choice, 11);
        assert_eq!(outcome.action, choice);
        // one fifteen, a run of four and a flush
        assert_eq!(outcome.score.ledger(Player::FirstDealer).hand, 2 + 4 + 4);
    }

    #[test]
    fn heels_gos_and_last_card_peg() {
        let mut setup = Setup {
            hands: Some(1),
            ..Setup::default()
        };
        setup.fixed.starter = Card::try_from("JH").ok();
        setup.fixed.actions =
            Action::parse_many("TS, KH, 9S, go, go, QC, 8D, QD, go, go, 7C, KD").unwrap();
        assert!(setup.fixed.validate().is_ok());
        for seed in 0..5 {
            let outcome = play(&setup, NextAction::default(), seed);
            assert!(outcome.void.is_none());
            // one go for the pone at 29
            assert_eq!(outcome.score.ledger(Player::FirstPone).play, 1);
            // heels, one go at 28 and the last card at 17
            assert_eq!(outcome.score.ledger(Player::FirstDealer).play, 2 + 1 + 1);
        }
    }

    #[test]
    fn unheld_forced_play_is_void() {
        let mut setup = Setup {
            hands: Some(1),
            ..Setup::default()
        };
        setup.fixed.dealt[0] = Card::parse_many("2S, 3S, 4S, 6D, 9D, KC").unwrap();
        setup.fixed.kept[0] = Hand::try_from("2S, 3S, 4S, 6D").unwrap();
        setup.enumerate.plays = true;
        let choice = NextAction {
            keep: None,
            play: Card::try_from("KC").ok(),
        };
        let outcome = play(&setup, choice, 5);
        assert_eq!(outcome.void, Some(Void::Unheld(Card::try_from("KC").unwrap())));
    }

    #[test]
    fn discarded_fixed_card_is_void() {
        let mut setup = Setup {
            hands: Some(1),
            ..Setup::default()
        };
        setup.fixed.dealt[0] = Card::parse_many("2S, 3S, 4S, 6D, 9D").unwrap();
        setup.fixed.kept[0] = Hand::try_from("KC").unwrap();
        setup.strategies[0].pone = Discard::FirstFour;
        setup.strategies[0].play = Play::First;
        // KC is dealt sixth, and first-four never keeps it
        let outcome = play(&setup, NextAction::default(), 9);
        assert_eq!(outcome.void, Some(Void::Unkept(Player::FirstPone)));
    }
}
