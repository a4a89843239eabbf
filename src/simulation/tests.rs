use super::*;
use crate::cards::Card;
use crate::cards::Hand;
use crate::gameplay::GameScore;
use crate::gameplay::NextAction;
use crate::gameplay::Player;
use crate::gameplay::Position;
use crate::gameplay::Seat;
use crate::scoring::Memo;
use crate::strategy::Context;
use crate::strategy::Discard;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;

/// First pone holds all four fives behind a weak first four.
const DEALT: &str = "9C, 2D, 5H, 5D, 5C, 5S";

fn keeps() -> Config {
    let mut config = Config {
        games: 15 * 300,
        batch: 32,
        workers: 2,
        seed: Some(2024),
        ..Config::default()
    };
    config.setup.hands = Some(1);
    config.setup.fixed.dealt[0] = Card::parse_many(DEALT).unwrap();
    config.setup.enumerate.keeps = Some(Player::FirstPone);
    config
}

fn standing<'a>(report: &'a Report, keep: Hand) -> &'a Standing {
    report
        .standings
        .iter()
        .find(|s| s.action.keep == Some(keep))
        .unwrap()
}

#[test]
fn racing_drops_first_four_for_the_maximising_keep() {
    let config = keeps();
    let report = simulate_with(&config, &MemoryTallies::new()).unwrap();
    let dealt = Card::parse_many(DEALT).unwrap();
    let first_four = Hand::from(&dealt[..4]);
    let ref mut rng = SmallRng::seed_from_u64(0);
    let ref mut memo = Memo::new();
    let context = Context::dealt(Seat::Pone, Hand::from(dealt.as_slice()));
    let maximising = Discard::pone().select_keep(&dealt, &context, memo, rng).unwrap();
    assert!(standing(&report, first_four).eliminated);
    assert!(!standing(&report, maximising).eliminated);
    let best = report.best().unwrap();
    assert_ne!(best.action.keep, Some(first_four));
    assert!(standing(&report, first_four).difference.total.mean < best.difference.total.mean);
    assert_eq!(report.standings.len(), crate::POSSIBLE_KEEPS);
    assert!(report.games <= config.games);
}

#[test]
fn elimination_is_permanent() {
    let config = keeps();
    let aggregator = Aggregator::new(&config);
    let candidates = config.candidates();
    let (good, bad) = (candidates[0], candidates[1]);
    let batch = |spread: &[f64], offset: f64| {
        let mut metrics = Metrics::default();
        for x in spread {
            let mut pone = Sample::default();
            pone.total = x + offset;
            metrics.push([pone, Sample::default()]);
        }
        metrics
    };
    let spread = [1., -1., 2., -2., 0., 1., -1., 0.];
    let first = BTreeMap::from([(good, batch(&spread, 10.)), (bad, batch(&spread, -10.))]);
    let snapshot = aggregator.absorb(first, 0);
    assert!(snapshot.eliminated.contains(&bad));
    let second = BTreeMap::from([(bad, batch(&spread, 50.))]);
    let snapshot = aggregator.absorb(second, 3);
    assert!(snapshot.eliminated.contains(&bad));
    let report = aggregator.report();
    assert_eq!(report.resamples, 3);
    assert_eq!(report.games, 24);
    assert!(report.standings.iter().all(|s| s.action != bad || s.eliminated));
}

#[test]
fn unsatisfiable_constraints_fail() {
    let mut config = Config {
        games: 10,
        seed: Some(1),
        voids: 50,
        ..Config::default()
    };
    config.setup.hands = Some(1);
    config.setup.fixed.dealt[0] = Card::parse_many("2C, 8D, 9H, KS, 5S").unwrap();
    config.setup.fixed.kept[0] = Hand::try_from("AS").unwrap();
    config.setup.strategies[0].pone = Discard::FirstFour;
    assert!(simulate_with(&config, &MemoryTallies::new()).is_err());
}

#[test]
fn finished_games_are_tallied() {
    let store = MemoryTallies::new();
    let config = Config {
        games: 40,
        seed: Some(5),
        tally: true,
        ..Config::default()
    };
    let report = simulate_with(&config, &store).unwrap();
    assert_eq!(report.games, 40);
    let opening = Position::new(&GameScore::new(0, 0), Player::FirstDealer);
    assert_eq!(store.get(&opening).unwrap().games(), 40);
}

#[test]
fn tallies_replace_unfinished_results() {
    // every position the second hand could start from
    let store = MemoryTallies::new();
    let tallies = Tallies {
        first_pone_wins: 3,
        first_dealer_wins: 1,
        first_pone_game_points: 6,
        first_dealer_game_points: 1,
    };
    for first_pone in 0..crate::MAX_SCORE {
        for first_dealer in 0..crate::MAX_SCORE {
            let position = Position {
                first_pone,
                first_dealer,
                dealer: Player::FirstPone,
            };
            store.add(&position, &tallies);
        }
    }
    let run = |estimate: bool| {
        let mut config = Config {
            games: 20,
            seed: Some(6),
            estimate,
            ..Config::default()
        };
        config.setup.hands = Some(1);
        simulate_with(&config, &store).unwrap()
    };
    let estimated = run(true);
    assert_eq!(estimated.games, 20);
    let ref standing = estimated.standings[0];
    assert!((standing.first_pone.game_points.mean - 1.5).abs() < 1e-9);
    assert!((standing.first_dealer.game_points.mean - 0.25).abs() < 1e-9);
    assert!((standing.first_pone.wins.mean - 0.75).abs() < 1e-9);
    assert!((standing.difference.game_points.mean - 1.25).abs() < 1e-9);
    let raw = run(false);
    assert_eq!(raw.standings[0].first_pone.game_points.mean, 0.);
    assert_eq!(raw.standings[0].first_dealer.game_points.mean, 0.);
}

#[test]
fn void_games_are_resampled() {
    let mut config = Config {
        games: 30,
        seed: Some(3),
        ..Config::default()
    };
    config.setup.hands = Some(1);
    config.setup.fixed.kept[0] = Hand::try_from("KC").unwrap();
    let report = simulate_with(&config, &MemoryTallies::new()).unwrap();
    assert_eq!(report.games, 30);
    assert_eq!(report.standings[0].action, NextAction::default());
    assert!(report.resamples > 0);
}
