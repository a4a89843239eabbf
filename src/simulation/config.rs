use super::racing::Secondary;
use crate::CONFIDENCE;
use crate::Confidence;
use crate::DEALT_CARDS;
use crate::GAMES_PER_MERGE;
use crate::KEPT_CARDS;
use crate::MAX_CONSECUTIVE_VOIDS;
use crate::MAX_SCORE;
use crate::cards::Hand;
use crate::gameplay::NextAction;
use crate::gameplay::Player;
use crate::gameplay::Segment;
use crate::gameplay::Setup;
use std::path::PathBuf;

/// Everything a run needs. Built by the CLI or by a look-ahead policy.
#[derive(Debug, Clone)]
pub struct Config {
    pub setup: Setup,
    /// target number of valid games across all workers
    pub games: usize,
    /// games a worker plays between merges
    pub batch: usize,
    pub workers: usize,
    pub confidence: Confidence,
    /// worker i seeds its generator with seed + i
    pub seed: Option<u64>,
    /// drop candidates as soon as they are clearly beaten
    pub racing: bool,
    /// add finished games to the position tallies
    pub tally: bool,
    /// substitute tallied results for games cut short by the hand limit
    pub estimate: bool,
    pub secondary: Secondary,
    /// where the position tallies live
    pub tallies: Option<PathBuf>,
    /// consecutive void games tolerated before the run fails
    pub voids: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            setup: Setup::default(),
            games: 10_000,
            batch: GAMES_PER_MERGE,
            workers: 1,
            confidence: CONFIDENCE,
            seed: None,
            racing: true,
            tally: false,
            estimate: false,
            secondary: Secondary::Total,
            tallies: None,
            voids: MAX_CONSECUTIVE_VOIDS,
        }
    }
}

impl Config {
    /// Reject configurations no simulation could satisfy.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.games > 0, "at least one game is needed");
        anyhow::ensure!(self.batch > 0, "batches must hold at least one game");
        anyhow::ensure!(self.workers > 0, "at least one worker is needed");
        anyhow::ensure!(self.voids > 0, "at least one void game must be tolerated");
        anyhow::ensure!(
            self.confidence > 0. && self.confidence < 100.,
            "confidence {} is not a percentage strictly between 0 and 100",
            self.confidence
        );
        anyhow::ensure!(self.setup.hands != Some(0), "a game needs at least one hand");
        for (player, initial) in Player::both().into_iter().zip(self.setup.initial) {
            anyhow::ensure!(
                (0..MAX_SCORE).contains(&initial),
                "{} cannot start at {}",
                player,
                initial
            );
        }
        self.setup.fixed.validate()?;
        if let Some(player) = self.setup.enumerate.keeps {
            anyhow::ensure!(
                self.setup.fixed.dealt[player.index()].len() == DEALT_CARDS,
                "enumerating keeps needs all {} cards dealt to {}",
                DEALT_CARDS,
                player
            );
        }
        if self.setup.enumerate.plays {
            let player = self.setup.fixed.post_initial();
            anyhow::ensure!(
                self.setup.enumerate.keeps == Some(player)
                    || self.setup.fixed.kept_including_played(player).size() == KEPT_CARDS,
                "enumerating plays needs the cards kept by {}",
                player
            );
        }
        anyhow::ensure!(!self.candidates().is_empty(), "no candidate action to simulate");
        Ok(())
    }

    /// Every next action to rotate through: each keep of the enumerated
    /// player's six cards that retains its fixed cards, crossed with
    /// each card the next player could legally play.
    pub fn candidates(&self) -> Vec<NextAction> {
        let ref fixed = self.setup.fixed;
        let keeps = match self.setup.enumerate.keeps {
            Some(player) => Hand::from(fixed.dealt[player.index()].as_slice())
                .subsets(KEPT_CARDS)
                .into_iter()
                .filter(|keep| fixed.kept_including_played(player).is_subset(keep))
                .map(Some)
                .collect(),
            None => vec![None],
        };
        if !self.setup.enumerate.plays {
            return keeps
                .into_iter()
                .map(|keep| NextAction { keep, play: None })
                .collect();
        }
        let player = fixed.post_initial();
        let ref segment = Segment::from(fixed.actions.as_slice());
        let played = Hand::from(fixed.played(player));
        keeps
            .into_iter()
            .flat_map(|keep| {
                let kept = match (self.setup.enumerate.keeps == Some(player), keep) {
                    (true, Some(keep)) => keep,
                    _ => fixed.kept_including_played(player),
                };
                segment
                    .legal(kept.minus(&played))
                    .into_iter()
                    .map(move |card| NextAction {
                        keep,
                        play: Some(card),
                    })
            })
            .collect()
    }

    /// The player whose decision is being evaluated.
    pub fn evaluating(&self) -> Player {
        match (self.setup.enumerate.keeps, self.setup.enumerate.plays) {
            (Some(player), _) => player,
            (None, true) => self.setup.fixed.post_initial(),
            (None, false) => Player::FirstPone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::gameplay::Action;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.candidates(), vec![NextAction::default()]);
    }

    #[test]
    fn keeps_retain_fixed_cards() {
        let mut config = Config::default();
        config.setup.fixed.dealt[0] = Card::parse_many("5S, 5D, 6C, 4H, KC, QD").unwrap();
        config.setup.enumerate.keeps = Some(Player::FirstPone);
        assert_eq!(config.candidates().len(), crate::POSSIBLE_KEEPS);
        config.setup.fixed.kept[0] = Hand::try_from("KC").unwrap();
        assert_eq!(config.candidates().len(), 10);
        assert_eq!(config.evaluating(), Player::FirstPone);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn plays_are_legal_cards_not_yet_played() {
        let mut config = Config::default();
        config.setup.fixed.kept[1] = Hand::try_from("5S, 5D, 9C, KH").unwrap();
        config.setup.fixed.actions = Action::parse_many("TC, 5S, JD").unwrap();
        config.setup.enumerate.plays = true;
        // dealer to play at 25: only the five fits
        assert_eq!(config.evaluating(), Player::FirstDealer);
        let plays = config.candidates().into_iter().map(|c| c.play).collect::<Vec<_>>();
        assert_eq!(plays, vec![Card::try_from("5D").ok()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_runs() {
        let mut config = Config::default();
        config.confidence = 100.;
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.setup.enumerate.keeps = Some(Player::FirstDealer);
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.setup.enumerate.plays = true;
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.setup.initial = [121, 0];
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.voids = 0;
        assert!(config.validate().is_err());
    }
}
