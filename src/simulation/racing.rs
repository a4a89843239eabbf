use super::interval::z;
use super::metrics::Metrics;
use super::statistic::RunningStatistic;
use crate::Confidence;
use crate::RACING_Z_MULTIPLE;
use crate::gameplay::NextAction;
use crate::gameplay::Player;
use std::cmp::Ordering;

/// The tie-breaking differential, after game points.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Secondary {
    #[default]
    Total,
    Play,
}

impl Secondary {
    pub fn of<'a>(&self, metrics: &'a Metrics) -> &'a RunningStatistic {
        match self {
            Secondary::Total => &metrics.difference.total,
            Secondary::Play => &metrics.difference.play,
        }
    }
}

/// Difference of two means in units of their pooled standard error.
/// Zero when neither has any spread.
pub fn difference_in_stderrs(a: &RunningStatistic, b: &RunningStatistic) -> f64 {
    let se = a.stderr().hypot(b.stderr());
    if se == 0. { 0. } else { (a.mean() - b.mean()) / se }
}

/// Order candidates best-first for the evaluating player: the first
/// pone wants the differentials high, the first dealer wants them low.
pub fn standings<'a, I>(metrics: I, evaluating: Player, secondary: Secondary) -> Vec<(NextAction, &'a Metrics)>
where
    I: IntoIterator<Item = (&'a NextAction, &'a Metrics)>,
{
    let key = |m: &Metrics| (m.difference.game_points.mean(), secondary.of(m).mean());
    let mut standings = metrics.into_iter().map(|(a, m)| (*a, m)).collect::<Vec<_>>();
    standings.sort_by(|(_, a), (_, b)| {
        let (a, b) = (key(a), key(b));
        let order = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match evaluating {
            Player::FirstPone => order.reverse(),
            Player::FirstDealer => order,
        }
    });
    standings
}

/// Candidates the leader beats by more than the racing margin, either
/// on game points, or on the secondary differential when game points
/// cannot tell them apart. Nobody is judged on fewer than two games.
pub fn eliminate(
    standings: &[(NextAction, &Metrics)],
    confidence: Confidence,
    secondary: Secondary,
) -> Vec<NextAction> {
    let Some((_, leader)) = standings.first() else {
        return Vec::new();
    };
    if leader.count() < 2 {
        return Vec::new();
    }
    let margin = RACING_Z_MULTIPLE * z(confidence);
    standings
        .iter()
        .skip(1)
        .filter(|(_, m)| m.count() >= 2)
        .filter(|(_, m)| {
            let points = difference_in_stderrs(
                &leader.difference.game_points,
                &m.difference.game_points,
            )
            .abs();
            let tiebreak = difference_in_stderrs(secondary.of(leader), secondary.of(m)).abs();
            points > margin || (points == 0. && tiebreak > margin)
        })
        .map(|(action, _)| *action)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::simulation::Sample;

    fn metrics(points: &[(f64, f64)]) -> Metrics {
        let mut metrics = Metrics::default();
        for (game_points, total) in points {
            let winner = Sample {
                game_points: *game_points,
                total: *total,
                ..Sample::default()
            };
            metrics.push([winner, Sample::default()]);
        }
        metrics
    }

    fn action(card: &str) -> NextAction {
        NextAction {
            keep: None,
            play: Card::try_from(card).ok(),
        }
    }

    #[test]
    fn pooled_stderr() {
        let a = [1., 3., 1., 3.].into_iter().collect::<RunningStatistic>();
        let b = [0., 0., 0., 0.].into_iter().collect::<RunningStatistic>();
        assert!((difference_in_stderrs(&a, &b) - 2. / a.stderr()).abs() < 1e-12);
        assert_eq!(difference_in_stderrs(&b, &b), 0.);
    }

    #[test]
    fn leader_drops_the_clearly_worse() {
        let good = metrics(&[(1., 20.), (2., 22.), (1., 21.), (2., 19.)]);
        let bad = metrics(&[(-1., -20.), (-2., -22.), (-1., -21.), (-2., -19.)]);
        let close = metrics(&[(2., 20.), (1., 22.), (0., 21.), (2., 19.)]);
        let all = [(action("AS"), good), (action("2S"), bad), (action("3S"), close)];
        let standings = standings(all.iter().map(|(a, m)| (a, m)), Player::FirstPone, Secondary::Total);
        assert_eq!(standings[0].0, action("AS"));
        assert_eq!(eliminate(&standings, 95., Secondary::Total), vec![action("2S")]);
        let reversed = super::standings(all.iter().map(|(a, m)| (a, m)), Player::FirstDealer, Secondary::Total);
        assert_eq!(reversed[0].0, action("2S"));
    }

    #[test]
    fn secondary_breaks_exact_ties() {
        let a = metrics(&[(1., 20.), (1., 22.), (1., 21.)]);
        let b = metrics(&[(1., -20.), (1., -22.), (1., -21.)]);
        let all = [(action("AS"), a), (action("2S"), b)];
        let standings = standings(all.iter().map(|(a, m)| (a, m)), Player::FirstPone, Secondary::Total);
        assert_eq!(eliminate(&standings, 95., Secondary::Total), vec![action("2S")]);
        assert!(eliminate(&standings, 95., Secondary::Play).is_empty());
    }

    #[test]
    fn one_sample_is_never_enough() {
        let a = metrics(&[(3., 29.)]);
        let b = metrics(&[(-3., -29.)]);
        let all = [(action("AS"), a), (action("2S"), b)];
        let standings = standings(all.iter().map(|(a, m)| (a, m)), Player::FirstPone, Secondary::Total);
        assert!(eliminate(&standings, 95., Secondary::Total).is_empty());
    }
}
