//! Simulate Binary
//!
//! Plays many games of Cribbage between two configured strategies and
//! reports each candidate decision with confidence intervals.
//!
//! Example: simulate --pone-dealt "9C, 2D, 5H, 5D, 5C, 5S" --enumerate-keeps pone --hands 1

use clap::Parser;
use robocrib::cards::Card;
use robocrib::cards::Hand;
use robocrib::gameplay::Action;
use robocrib::gameplay::Enumerate;
use robocrib::gameplay::Fixed;
use robocrib::gameplay::Player;
use robocrib::gameplay::Setup;
use robocrib::simulation::Config;
use robocrib::simulation::Secondary;
use robocrib::strategy::Discard;
use robocrib::strategy::Play;
use robocrib::strategy::Strategy;
use robocrib::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// first pone's discard policy when it is pone
    #[arg(long, default_value = "max-post-cut-minus-crib-ignoring-suit")]
    pone_discard_as_pone: String,
    /// first pone's discard policy when it is dealer
    #[arg(long, default_value = "max-post-cut-plus-crib-ignoring-suit")]
    pone_discard_as_dealer: String,
    #[arg(long, default_value = "default")]
    pone_play: String,
    /// first dealer's discard policy when it is pone
    #[arg(long, default_value = "max-post-cut-minus-crib-ignoring-suit")]
    dealer_discard_as_pone: String,
    /// first dealer's discard policy when it is dealer
    #[arg(long, default_value = "max-post-cut-plus-crib-ignoring-suit")]
    dealer_discard_as_dealer: String,
    #[arg(long, default_value = "default")]
    dealer_play: String,

    /// cards dealt to the first pone, in deal order
    #[arg(long, default_value = "")]
    pone_dealt: String,
    /// cards dealt to the first dealer, in deal order
    #[arg(long, default_value = "")]
    dealer_dealt: String,
    /// cards the first pone must keep
    #[arg(long, default_value = "")]
    pone_kept: String,
    /// cards the first dealer must keep
    #[arg(long, default_value = "")]
    dealer_kept: String,
    #[arg(long)]
    starter: Option<String>,
    /// the play so far, e.g. "5S, 9H, go, 2C"
    #[arg(long, default_value = "")]
    actions: String,

    #[arg(long, default_value_t = 0)]
    pone_score: Points,
    #[arg(long, default_value_t = 0)]
    dealer_score: Points,
    /// stop each game after this many hands
    #[arg(long)]
    hands: Option<usize>,

    /// rotate every keep of this player's six dealt cards: pone or dealer
    #[arg(long)]
    enumerate_keeps: Option<String>,
    /// rotate every legal play after the fixed actions
    #[arg(long)]
    enumerate_plays: bool,

    #[arg(long, default_value_t = 10_000)]
    games: usize,
    #[arg(long, default_value_t = GAMES_PER_MERGE)]
    batch: usize,
    /// defaults to the number of logical cores
    #[arg(long)]
    workers: Option<usize>,
    #[arg(long, default_value_t = CONFIDENCE)]
    confidence: Confidence,
    #[arg(long)]
    seed: Option<u64>,
    /// keep simulating candidates that are clearly beaten
    #[arg(long)]
    no_racing: bool,
    /// rank candidates by play points rather than total points on ties
    #[arg(long)]
    by_play: bool,
    /// consecutive void games tolerated before the run fails
    #[arg(long, default_value_t = MAX_CONSECUTIVE_VOIDS)]
    max_voids: usize,

    /// add finished games to the position tallies
    #[arg(long)]
    tally: bool,
    /// substitute tallied results for games cut short by --hands
    #[arg(long)]
    estimate: bool,
    /// JSON file holding the position tallies
    #[arg(long)]
    tallies: Option<PathBuf>,

    /// print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn strategy(discard_as_pone: &str, discard_as_dealer: &str, play: &str) -> anyhow::Result<Strategy> {
        Ok(Strategy {
            pone: Discard::try_from(discard_as_pone)?,
            dealer: Discard::try_from(discard_as_dealer)?,
            play: Play::try_from(play)?,
        })
    }
    fn player(s: &str) -> anyhow::Result<Player> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pone" => Ok(Player::FirstPone),
            "dealer" => Ok(Player::FirstDealer),
            other => Err(anyhow::anyhow!("no such player: {}", other)),
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;
    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let fixed = Fixed {
            dealt: [
                Card::parse_many(&args.pone_dealt)?,
                Card::parse_many(&args.dealer_dealt)?,
            ],
            kept: [
                Hand::try_from(args.pone_kept.as_str())?,
                Hand::try_from(args.dealer_kept.as_str())?,
            ],
            starter: args.starter.as_deref().map(Card::try_from).transpose()?,
            actions: Action::parse_many(&args.actions)?,
        };
        let setup = Setup {
            strategies: [
                Args::strategy(
                    &args.pone_discard_as_pone,
                    &args.pone_discard_as_dealer,
                    &args.pone_play,
                )?,
                Args::strategy(
                    &args.dealer_discard_as_pone,
                    &args.dealer_discard_as_dealer,
                    &args.dealer_play,
                )?,
            ],
            fixed,
            initial: [args.pone_score, args.dealer_score],
            hands: args.hands,
            enumerate: Enumerate {
                keeps: args.enumerate_keeps.as_deref().map(Args::player).transpose()?,
                plays: args.enumerate_plays,
            },
        };
        Ok(Config {
            setup,
            games: args.games,
            batch: args.batch,
            workers: args.workers.unwrap_or_else(num_cpus::get),
            confidence: args.confidence,
            seed: args.seed,
            racing: !args.no_racing,
            tally: args.tally,
            estimate: args.estimate,
            secondary: if args.by_play { Secondary::Play } else { Secondary::Total },
            tallies: args.tallies,
            voids: args.max_voids,
        })
    }
}

#[tokio::main]
async fn main() {
    log();
    kys();
    brb();
    let args = Args::parse();
    let json = args.json;
    let result = match Config::try_from(args) {
        Ok(config) => tokio::task::spawn_blocking(move || simulation::simulate_games(&config))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|report| report),
        Err(e) => Err(e),
    };
    match result {
        Ok(report) if json => match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => log::error!("{}", e),
        },
        Ok(report) => println!("{}", report),
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
