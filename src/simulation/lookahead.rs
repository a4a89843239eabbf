//! Look-ahead for the `Simulated` policies: rerun the rest of the
//! current hand many times with the decision fixed each way, and take
//! the option with the best game-point differential.
//!
//! Sub-runs play one hand from the current score with the static
//! default strategies on both sides, so they never nest. A sub-run
//! that cannot be set up, or keeps drawing void games, leaves the
//! decision to the static default policy.
use super::config::Config;
use super::driver::simulate_inline;
use super::racing::Secondary;
use crate::CONFIDENCE;
use crate::LOOKAHEAD_MAX_VOIDS;
use crate::cards::Card;
use crate::cards::Hand;
use crate::gameplay::Enumerate;
use crate::gameplay::Fixed;
use crate::gameplay::Player;
use crate::gameplay::Segment;
use crate::gameplay::Setup;
use crate::scoring::Memo;
use crate::strategy::Context;
use crate::strategy::Discard;
use crate::strategy::Play;
use rand::Rng;

/// The keep with the best simulated result over n games per keep.
pub fn discard<R: Rng>(
    n: usize,
    dealt: &[Card],
    context: &Context,
    memo: &mut Memo,
    rng: &mut R,
) -> anyhow::Result<Hand> {
    let me = Player::at(context.seat, 0);
    let mut fixed = Fixed::default();
    fixed.dealt[me.index()] = dealt.to_vec();
    let config = config(n * crate::POSSIBLE_KEEPS, fixed, context, Secondary::Total, Enumerate {
        keeps: Some(me),
        plays: false,
    });
    let report = match simulate_inline(&config, memo, rng) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("keep look-ahead gave up: {:#}", e);
            return Discard::default_for(context.seat).select_keep(dealt, context, memo, rng);
        }
    };
    let best = report
        .best()
        .and_then(|s| s.action.keep)
        .ok_or_else(|| anyhow::anyhow!("look-ahead found no keep for [{}]", Hand::from(dealt)))?;
    log::debug!("simulated keep {} from [{}] over {} games", best, Hand::from(dealt), report.games);
    Ok(best)
}

/// The index into `legal` of the card with the best simulated result
/// over n games per card. The cards already played this hand are
/// forced on both players, so the opponent's unseen cards are dealt
/// around them.
pub fn play<R: Rng>(
    n: usize,
    legal: &[Card],
    context: &Context,
    memo: &mut Memo,
    rng: &mut R,
) -> anyhow::Result<usize> {
    let me = Player::at(context.seat, 0);
    let mut fixed = Fixed::default();
    fixed.dealt[me.index()] = Vec::from(context.dealt);
    fixed.kept[me.index()] = context.kept;
    fixed.starter = context.starter;
    fixed.actions = context.history.to_vec();
    let config = config(n * legal.len(), fixed, context, Secondary::Play, Enumerate {
        keeps: None,
        plays: true,
    });
    let report = match simulate_inline(&config, memo, rng) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("play look-ahead gave up: {:#}", e);
            let ref segment = Segment::from(context.history);
            return Play::default().select_play(legal, segment, context, memo, rng);
        }
    };
    let best = report
        .best()
        .and_then(|s| s.action.play)
        .and_then(|card| legal.iter().position(|c| *c == card))
        .ok_or_else(|| anyhow::anyhow!("look-ahead found no play among {:?}", legal))?;
    log::trace!("simulated play {} over {} games", legal[best], report.games);
    Ok(best)
}

/// One hand from the current score, the current pone as first pone.
/// Sub-runs neither read nor write position tallies; each is scored
/// on its one hand alone.
fn config(games: usize, fixed: Fixed, context: &Context, secondary: Secondary, enumerate: Enumerate) -> Config {
    Config {
        setup: Setup {
            strategies: Default::default(),
            fixed,
            initial: context.scores,
            hands: Some(1),
            enumerate,
        },
        games,
        batch: games.min(crate::POSSIBLE_KEEPS),
        workers: 1,
        confidence: CONFIDENCE,
        seed: None,
        racing: true,
        tally: false,
        estimate: false,
        secondary,
        tallies: None,
        voids: LOOKAHEAD_MAX_VOIDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::Action;
    use crate::gameplay::Seat;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn simulated_keep_is_dealt() {
        let ref mut rng = SmallRng::seed_from_u64(8);
        let ref mut memo = Memo::new();
        let dealt = Card::parse_many("5S, 5D, 6C, 4H, KC, QD").unwrap();
        let context = Context::dealt(Seat::Pone, Hand::from(dealt.as_slice()));
        let keep = discard(4, &dealt, &context, memo, rng).unwrap();
        assert_eq!(keep.size(), 4);
        assert!(keep.is_subset(&Hand::from(dealt.as_slice())));
    }

    #[test]
    fn impossible_play_lookahead_falls_back() {
        let ref mut rng = SmallRng::seed_from_u64(8);
        let ref mut memo = Memo::new();
        // the pone is recorded playing a card the dealer holds
        let dealt = Hand::try_from("TH, 5S, 5D, 6C, 4H, KC").unwrap();
        let kept = Hand::try_from("TH, 5S, 5D, 6C").unwrap();
        let history = Action::parse_many("TH").unwrap();
        let context = Context {
            seat: Seat::Dealer,
            scores: [10, 20],
            dealt,
            kept,
            starter: Card::try_from("2C").ok(),
            history: &history,
        };
        let legal = Card::parse_many("5S, 5D, 6C").unwrap();
        // the default chain makes fifteen with the first five
        assert_eq!(play(3, &legal, &context, memo, rng).unwrap(), 0);
    }

    #[test]
    fn simulated_play_is_legal() {
        let ref mut rng = SmallRng::seed_from_u64(8);
        let ref mut memo = Memo::new();
        let dealt = Hand::try_from("5S, 5D, 6C, 4H, KC, QD").unwrap();
        let kept = Hand::try_from("5S, 5D, 6C, 4H").unwrap();
        let history = Action::parse_many("TH").unwrap();
        let context = Context {
            seat: Seat::Dealer,
            scores: [10, 20],
            dealt,
            kept,
            starter: Card::try_from("2C").ok(),
            history: &history,
        };
        let legal = Card::parse_many("4H, 5S, 5D, 6C").unwrap();
        let i = play(3, &legal, &context, memo, rng).unwrap();
        assert!(i < legal.len());
    }
}
