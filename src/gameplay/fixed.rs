use super::action::Action;
use super::player::Player;
use super::segment::Segment;
use crate::DEALT_CARDS;
use crate::KEPT_CARDS;
use crate::cards::Card;
use crate::cards::Hand;

/// Cards and actions a caller holds constant across every simulated
/// game. They only constrain the first hand. Indexed by [`Player`].
///
/// Cards a player has played are kept by definition, so they count
/// toward that player's kept cards, which count toward the dealt ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixed {
    /// in deal order, which matters to order-sensitive discard policies
    pub dealt: [Vec<Card>; 2],
    pub kept: [Hand; 2],
    pub starter: Option<Card>,
    /// the play so far, alternating from the first pone
    pub actions: Vec<Action>,
}

impl Fixed {
    /// Reject constraints no deal could satisfy.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = Hand::empty();
        for player in Player::both() {
            let dealt = Hand::from(self.dealt[player.index()].as_slice());
            let kept = self.kept_including_played(player);
            let hand = self.hand(player);
            anyhow::ensure!(
                dealt.size() == self.dealt[player.index()].len(),
                "{} dealt a card twice",
                player
            );
            anyhow::ensure!(
                hand.len() <= DEALT_CARDS,
                "{} cannot be dealt {} cards",
                player,
                hand.len()
            );
            anyhow::ensure!(
                kept.size() <= KEPT_CARDS,
                "{} cannot keep [{}]",
                player,
                kept
            );
            anyhow::ensure!(
                dealt.size() < DEALT_CARDS || kept.is_subset(&dealt),
                "{} keeps [{}] from a full deal of [{}]",
                player,
                kept,
                dealt
            );
            let hand = Hand::from(hand);
            anyhow::ensure!(
                seen.intersect(&hand).is_empty(),
                "both players hold [{}]",
                seen.intersect(&hand)
            );
            seen = seen.union(&hand);
        }
        if let Some(starter) = self.starter {
            anyhow::ensure!(!seen.contains(&starter), "starter {} is also held", starter);
        }
        let ref mut segment = Segment::new();
        for action in self.actions.iter() {
            match action {
                Action::Play(card) if !segment.playable(card) => {
                    anyhow::bail!("{} would take the count past 31", card)
                }
                Action::Play(card) => {
                    segment.play(*card);
                }
                Action::Go => {
                    segment.go();
                }
            }
        }
        let plays = self.actions.iter().filter_map(Action::card).collect::<Vec<_>>();
        anyhow::ensure!(
            Hand::from(plays.as_slice()).size() == plays.len(),
            "a card is played twice"
        );
        Ok(())
    }

    /// cards this player has played, in order
    pub fn played(&self, player: Player) -> Vec<Card> {
        self.actions
            .iter()
            .enumerate()
            .filter(|(i, _)| Player::from(*i) == player)
            .filter_map(|(_, a)| a.card())
            .collect()
    }
    pub fn kept_including_played(&self, player: Player) -> Hand {
        self.played(player)
            .into_iter()
            .fold(self.kept[player.index()], |mut kept, card| {
                kept.insert(card);
                kept
            })
    }
    /// every card this player must be dealt, fixed deal order first
    pub fn hand(&self, player: Player) -> Vec<Card> {
        let ref dealt = self.dealt[player.index()];
        let extra = self
            .kept_including_played(player)
            .filter(|c| !dealt.contains(c));
        dealt.iter().copied().chain(extra).collect()
    }
    /// every card spoken for, starter included
    pub fn cards(&self) -> Hand {
        let held = Player::both()
            .into_iter()
            .flat_map(|p| self.hand(p))
            .collect::<Hand>();
        match self.starter {
            Some(starter) => held.union(&Hand::from(vec![starter])),
            None => held,
        }
    }
    /// who acts right after the fixed actions
    pub fn post_initial(&self) -> Player {
        Player::from(self.actions.len())
    }
}
