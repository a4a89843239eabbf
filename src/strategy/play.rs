use super::context::Context;
use super::heuristic::Heuristic;
use crate::cards::Card;
use crate::gameplay::Segment;
use crate::scoring::Memo;
use crate::simulation::lookahead;
use rand::Rng;

/// The full chain: lead low, then take whatever points are on offer,
/// then dump, then play high.
pub const DEFAULT_CHAIN: &[Heuristic] = &[
    Heuristic::LowLead,
    Heuristic::PairsRoyale,
    Heuristic::Run,
    Heuristic::Fifteen,
    Heuristic::Pair,
    Heuristic::ThirtyOne,
    Heuristic::Dump,
    Heuristic::Highest,
];

/// Policies for choosing a card during the play to 31.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Play {
    /// the lowest legal card
    First,
    Random,
    /// the first heuristic with an opinion decides; highest count if none does
    Chain(Vec<Heuristic>),
    /// simulate each legal card this many times and play the best
    Simulated(usize),
}

impl Default for Play {
    fn default() -> Self {
        Play::Chain(DEFAULT_CHAIN.to_vec())
    }
}

impl Play {
    /// The preset chains, weakest first.
    pub fn presets() -> Vec<Self> {
        use Heuristic::*;
        let chains: [&[Heuristic]; 9] = [
            &[Highest],
            &[FifteenOrThirtyOne, Highest],
            &[Pair, FifteenOrThirtyOne, Highest],
            &[Fifteen, Pair, ThirtyOne, Highest],
            &[Run, Fifteen, Pair, ThirtyOne, Highest],
            &[LowLead, Run, Fifteen, Pair, ThirtyOne, Highest],
            &[Run, Fifteen, Pair, ThirtyOne, Dump, Highest],
            &[LowLead, Run, Fifteen, Pair, ThirtyOne, Dump, Highest],
            DEFAULT_CHAIN,
        ];
        chains
            .into_iter()
            .map(|chain| Play::Chain(chain.to_vec()))
            .collect()
    }

    /// Index into `legal` of the card to play. `legal` is ascending.
    pub fn select_play<R: Rng>(
        &self,
        legal: &[Card],
        segment: &Segment,
        context: &Context,
        memo: &mut Memo,
        rng: &mut R,
    ) -> anyhow::Result<usize> {
        anyhow::ensure!(!legal.is_empty(), "no legal play to choose from");
        match self {
            Play::First => Ok(0),
            Play::Random => Ok(rng.random_range(0..legal.len())),
            Play::Chain(chain) => {
                let ref played = segment.cards();
                Ok(chain
                    .iter()
                    .chain(std::iter::once(&Heuristic::Highest))
                    .find_map(|h| h.pick(legal, segment.count(), played))
                    .unwrap_or(0))
            }
            Play::Simulated(_) if legal.len() == 1 => Ok(0),
            Play::Simulated(n) => lookahead::play(*n, legal, context, memo, rng),
        }
    }
}

/// Chains are named by their heuristics joined with `-else-`,
/// e.g. `pair-else-fifteen-or-thirty-one-else-highest`.
impl TryFrom<&str> for Play {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "first" => Ok(Play::First),
            "random" => Ok(Play::Random),
            "default" => Ok(Play::default()),
            other => match other.strip_prefix("simulated:") {
                Some(n) => match n.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Play::Simulated(n)),
                    _ => Err(anyhow::anyhow!("bad simulation count: {}", s)),
                },
                None => other
                    .split("-else-")
                    .map(Heuristic::try_from)
                    .collect::<anyhow::Result<Vec<_>>>()
                    .map(Play::Chain),
            },
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Play::First => write!(f, "first"),
            Play::Random => write!(f, "random"),
            Play::Chain(chain) => write!(
                f,
                "{}",
                chain
                    .iter()
                    .map(Heuristic::to_string)
                    .collect::<Vec<_>>()
                    .join("-else-")
            ),
            Play::Simulated(n) => write!(f, "simulated:{}", n),
        }
    }
}
