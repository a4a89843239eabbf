use super::context::Context;
use super::expectation::crib_ranked;
use super::expectation::crib_suited;
use super::expectation::post_cut_ranked;
use super::expectation::post_cut_suited;
use super::expectation::suits_matter;
use crate::DEALT_CARDS;
use crate::KEPT_CARDS;
use crate::cards::Card;
use crate::cards::Hand;
use crate::gameplay::Seat;
use crate::scoring::Memo;
use crate::scoring::Ranks;
use crate::simulation::lookahead;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Whether the expected crib counts for or against the keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crib {
    Plus,
    Minus,
}

impl Crib {
    fn sign(&self) -> f64 {
        match self {
            Crib::Plus => 1.,
            Crib::Minus => -1.,
        }
    }
}

/// Policies for choosing which four of six dealt cards to keep.
///
/// `suited: false` variants only look at ranks and are memoised on the
/// dealt rank multiset. `suited: true` variants score actual cards, and
/// fall back to ranks when the deal can make neither a flush nor nobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    Random,
    FirstFour,
    MaxPreCut { suited: bool },
    MaxPostCut { suited: bool },
    MaxPostCutCrib { crib: Crib, suited: bool },
    /// simulate each keep this many times and keep the best
    Simulated(usize),
}

impl Discard {
    /// static default for the pone: hand minus expected crib
    pub const fn pone() -> Self {
        Discard::MaxPostCutCrib {
            crib: Crib::Minus,
            suited: false,
        }
    }
    /// static default for the dealer: hand plus expected crib
    pub const fn dealer() -> Self {
        Discard::MaxPostCutCrib {
            crib: Crib::Plus,
            suited: false,
        }
    }
    pub const fn default_for(seat: Seat) -> Self {
        match seat {
            Seat::Pone => Self::pone(),
            Seat::Dealer => Self::dealer(),
        }
    }

    /// Choose a keep from six dealt cards. The order of `dealt` only
    /// matters to [`Discard::FirstFour`].
    pub fn select_keep<R: Rng>(
        &self,
        dealt: &[Card],
        context: &Context,
        memo: &mut Memo,
        rng: &mut R,
    ) -> anyhow::Result<Hand> {
        let hand = Hand::from(dealt);
        anyhow::ensure!(
            dealt.len() == DEALT_CARDS && hand.size() == DEALT_CARDS,
            "{} distinct dealt cards expected, got [{}]",
            DEALT_CARDS,
            hand
        );
        let keep = match self {
            Discard::Random => dealt.choose_multiple(rng, KEPT_CARDS).copied().collect(),
            Discard::FirstFour => Hand::from(&dealt[..KEPT_CARDS]),
            Discard::MaxPreCut { suited: true } => argmax(hand, |keep| {
                memo.score_hand(keep, None, false) as f64
            }),
            Discard::MaxPostCut { suited: true } if suits_matter(hand) => argmax(hand, |keep| {
                post_cut_suited(keep, hand, memo)
            }),
            Discard::MaxPostCutCrib { crib, suited: true } => {
                let ranked = !suits_matter(hand);
                argmax(hand, |keep| {
                    let discard = Vec::<Card>::from(hand.minus(&keep));
                    let cards = match ranked {
                        true => post_cut_ranked(Ranks::from(keep), Ranks::from(hand), memo),
                        false => post_cut_suited(keep, hand, memo),
                    };
                    cards + crib.sign() * crib_suited(discard[0], discard[1], memo)
                })
            }
            Discard::MaxPreCut { suited: false } => ranked(hand, Objective::PreCut, memo),
            Discard::MaxPostCut { .. } => ranked(hand, Objective::PostCut, memo),
            Discard::MaxPostCutCrib { crib, suited: false } => {
                ranked(hand, Objective::Crib(*crib), memo)
            }
            Discard::Simulated(n) => lookahead::discard(*n, dealt, context, memo, rng)?,
        };
        debug_assert!(keep.size() == KEPT_CARDS && keep.is_subset(&hand));
        Ok(keep)
    }
}

/// What a rank-only policy maximises. The tag is part of the cache key.
#[derive(Debug, Clone, Copy)]
enum Objective {
    PreCut,
    PostCut,
    Crib(Crib),
}

impl Objective {
    fn tag(&self) -> u8 {
        match self {
            Objective::PreCut => 0,
            Objective::PostCut => 1,
            Objective::Crib(Crib::Plus) => 2,
            Objective::Crib(Crib::Minus) => 3,
        }
    }
    fn value(&self, kept: Ranks, dealt: Ranks, memo: &mut Memo) -> f64 {
        match self {
            Objective::PreCut => memo.points(kept) as f64,
            Objective::PostCut => post_cut_ranked(kept, dealt, memo),
            Objective::Crib(crib) => {
                post_cut_ranked(kept, dealt, memo)
                    + crib.sign() * crib_ranked(dealt.minus(&kept), memo)
            }
        }
    }
}

/// the keep maximising a value; the first one wins ties
fn argmax<F>(dealt: Hand, mut value: F) -> Hand
where
    F: FnMut(Hand) -> f64,
{
    dealt
        .subsets(KEPT_CARDS)
        .into_iter()
        .map(|keep| (keep, value(keep)))
        .fold(None, |best: Option<(Hand, f64)>, (keep, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((keep, v)),
        })
        .map(|(keep, _)| keep)
        .unwrap_or_default()
}

/// Rank-only decisions are cached by the dealt ranks, then mapped back
/// onto the first keep of actual cards with the chosen ranks.
fn ranked(dealt: Hand, objective: Objective, memo: &mut Memo) -> Hand {
    let ranks = Ranks::from(dealt);
    let key = (ranks, objective.tag());
    let kept = match memo.keeps.get(&key) {
        Some(kept) => kept,
        None => {
            let keep = argmax(dealt, |keep| {
                objective.value(Ranks::from(keep), ranks, memo)
            });
            memo.keeps.insert(key, Ranks::from(keep))
        }
    };
    dealt
        .subsets(KEPT_CARDS)
        .into_iter()
        .find(|keep| Ranks::from(*keep) == kept)
        .unwrap_or_default()
}

impl TryFrom<&str> for Discard {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (name, suited) = match s.trim().to_ascii_lowercase() {
            s if s.ends_with("-ignoring-suit") => {
                (s.trim_end_matches("-ignoring-suit").to_string(), false)
            }
            s => (s, true),
        };
        match name.as_str() {
            "random" => Ok(Discard::Random),
            "first-four" => Ok(Discard::FirstFour),
            "max-pre-cut" => Ok(Discard::MaxPreCut { suited }),
            "max-post-cut" => Ok(Discard::MaxPostCut { suited }),
            "max-post-cut-plus-crib" => Ok(Discard::MaxPostCutCrib { crib: Crib::Plus, suited }),
            "max-post-cut-minus-crib" => Ok(Discard::MaxPostCutCrib { crib: Crib::Minus, suited }),
            other => match other.strip_prefix("simulated:").map(str::parse::<usize>) {
                Some(Ok(n)) if n > 0 => Ok(Discard::Simulated(n)),
                _ => Err(anyhow::anyhow!("unknown discard policy: {}", s)),
            },
        }
    }
}

impl std::fmt::Display for Discard {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let suffix = |suited: &bool| if *suited { "" } else { "-ignoring-suit" };
        match self {
            Discard::Random => write!(f, "random"),
            Discard::FirstFour => write!(f, "first-four"),
            Discard::MaxPreCut { suited } => write!(f, "max-pre-cut{}", suffix(suited)),
            Discard::MaxPostCut { suited } => write!(f, "max-post-cut{}", suffix(suited)),
            Discard::MaxPostCutCrib { crib: Crib::Plus, suited } => {
                write!(f, "max-post-cut-plus-crib{}", suffix(suited))
            }
            Discard::MaxPostCutCrib { crib: Crib::Minus, suited } => {
                write!(f, "max-post-cut-minus-crib{}", suffix(suited))
            }
            Discard::Simulated(n) => write!(f, "simulated:{}", n),
        }
    }
}
