use super::statistic::RunningStatistic;
use super::tally::Tallies;
use crate::gameplay::Outcome;
use crate::gameplay::Player;

/// One game's numbers for one player: points earned in each phase,
/// their sum, game points and wins. Points carried in from the
/// starting score are excluded.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sample {
    pub play: f64,
    pub hand: f64,
    pub crib: f64,
    pub total: f64,
    pub game_points: f64,
    pub wins: f64,
}

impl Sample {
    /// both players' samples, indexed by [`Player`]
    pub fn pair(outcome: &Outcome) -> [Self; 2] {
        let game_points = outcome.score.game_points();
        let winner = outcome.score.winner();
        Player::both().map(|player| {
            let ledger = outcome.score.ledger(player);
            Self {
                play: ledger.play as f64,
                hand: ledger.hand as f64,
                crib: ledger.crib as f64,
                total: ledger.earned() as f64,
                game_points: game_points[player.index()] as f64,
                wins: (winner == Some(player)) as u8 as f64,
            }
        })
    }
    /// Like [`Sample::pair`], with expected wins and game points from
    /// the tallies of where the next hand would have started.
    pub fn estimated(outcome: &Outcome, tallies: &Tallies) -> [Self; 2] {
        let mut samples = Self::pair(outcome);
        if let Some(expected) = tallies.expected() {
            for (sample, (wins, game_points)) in samples.iter_mut().zip(expected) {
                sample.wins = wins;
                sample.game_points = game_points;
            }
        }
        samples
    }
    fn difference(a: &Self, b: &Self) -> Self {
        Self {
            play: a.play - b.play,
            hand: a.hand - b.hand,
            crib: a.crib - b.crib,
            total: a.total - b.total,
            game_points: a.game_points - b.game_points,
            wins: a.wins - b.wins,
        }
    }
}

/// Running statistics for each field of a [`Sample`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Line {
    pub play: RunningStatistic,
    pub hand: RunningStatistic,
    pub crib: RunningStatistic,
    pub total: RunningStatistic,
    pub game_points: RunningStatistic,
    pub wins: RunningStatistic,
}

impl Line {
    fn push(&mut self, sample: &Sample) {
        self.play.push(sample.play);
        self.hand.push(sample.hand);
        self.crib.push(sample.crib);
        self.total.push(sample.total);
        self.game_points.push(sample.game_points);
        self.wins.push(sample.wins);
    }
    fn merge(&mut self, other: &Self) {
        self.play.merge(&other.play);
        self.hand.merge(&other.hand);
        self.crib.merge(&other.crib);
        self.total.merge(&other.total);
        self.game_points.merge(&other.game_points);
        self.wins.merge(&other.wins);
    }
}

/// Everything tracked for one candidate: each player's line and the
/// line of their differences (first pone minus first dealer).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub first_pone: Line,
    pub first_dealer: Line,
    pub difference: Line,
}

impl Metrics {
    pub fn push(&mut self, [pone, dealer]: [Sample; 2]) {
        self.first_pone.push(&pone);
        self.first_dealer.push(&dealer);
        self.difference.push(&Sample::difference(&pone, &dealer));
    }
    pub fn merge(&mut self, other: &Self) {
        self.first_pone.merge(&other.first_pone);
        self.first_dealer.merge(&other.first_dealer);
        self.difference.merge(&other.difference);
    }
    pub fn clear(&mut self) {
        *self = Self::default();
    }
    pub fn count(&self) -> usize {
        self.difference.game_points.count()
    }
    pub fn line(&self, player: Player) -> &Line {
        match player {
            Player::FirstPone => &self.first_pone,
            Player::FirstDealer => &self.first_dealer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::GameScore;
    use crate::gameplay::NextAction;
    use crate::gameplay::Phase;

    fn outcome(score: GameScore) -> Outcome {
        Outcome {
            action: NextAction::default(),
            score,
            positions: Vec::new(),
            void: None,
            hands: 1,
        }
    }

    #[test]
    fn earned_points_and_skunk() {
        let mut score = GameScore::new(100, 50);
        score.add(Player::FirstPone, Phase::Play, 3);
        score.add(Player::FirstDealer, Phase::Hand, 8);
        score.add(Player::FirstPone, Phase::Hand, 24);
        let [pone, dealer] = Sample::pair(&outcome(score));
        assert_eq!(pone.total, 21.);
        assert_eq!(pone.play, 3.);
        assert_eq!(pone.hand, 18.);
        assert_eq!(pone.game_points, 3.);
        assert_eq!(pone.wins, 1.);
        assert_eq!(dealer.total, 8.);
        assert_eq!(dealer.wins, 0.);
        let mut metrics = Metrics::default();
        metrics.push([pone, dealer]);
        assert_eq!(metrics.count(), 1);
        assert_eq!(metrics.difference.total.mean(), 13.);
        assert_eq!(metrics.difference.game_points.mean(), 3.);
    }

    #[test]
    fn estimates_replace_only_results() {
        let score = GameScore::new(100, 110);
        let tallies = Tallies {
            first_pone_wins: 1,
            first_dealer_wins: 3,
            first_pone_game_points: 1,
            first_dealer_game_points: 4,
        };
        let [pone, dealer] = Sample::estimated(&outcome(score), &tallies);
        assert_eq!(pone.wins, 0.25);
        assert_eq!(dealer.game_points, 1.);
        assert_eq!(pone.total, 0.);
    }
}
