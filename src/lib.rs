//! Monte Carlo evaluation of Cribbage strategies.
//!
//! The crate is organised leaves-first:
//!
//! - [`cards`]: ranks, suits, cards, 52-bit hands and the deck
//! - [`scoring`]: hand, crib and pegging points, memoised through [`scoring::Memo`]
//! - [`strategy`]: discard and play policies as closed variant types
//! - [`gameplay`]: the hand/game state machine and its outcomes
//! - [`simulation`]: running statistics, racing, and the parallel driver
pub mod cards;
pub mod gameplay;
pub mod scoring;
pub mod simulation;
pub mod strategy;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Board points: hand, crib and pegging scores, running totals.
pub type Points = i16;
/// Game points awarded at the end of a game (1 + skunk bonus).
pub type GamePoints = i16;
/// Running count during the play to 31.
pub type Count = u8;
/// Confidence level in percent (e.g. 95.0).
pub type Confidence = f64;

// ============================================================================
// CARD COUNTS
// ============================================================================
/// Cards dealt to each player at the start of a hand.
pub const DEALT_CARDS: usize = 6;
/// Cards each player keeps after discarding to the crib.
pub const KEPT_CARDS: usize = 4;
/// Cards each player discards to the crib.
pub const DISCARDED_CARDS: usize = DEALT_CARDS - KEPT_CARDS;
/// Distinct keeps of a six card deal, C(6,4).
pub const POSSIBLE_KEEPS: usize = 15;

// ============================================================================
// GAME RULES
// ============================================================================
/// Points needed to win; no player's total ever exceeds it.
pub const MAX_SCORE: Points = 121;
/// Count the pegging reaches for 2 points.
pub const FIFTEEN: Count = 15;
/// Count that ends a segment of play.
pub const THIRTY_ONE: Count = 31;
/// Loser at or below this many points is triple skunked.
pub const TRIPLE_SKUNK: Points = 30;
/// Loser at or below this many points is double skunked.
pub const DOUBLE_SKUNK: Points = 60;
/// Loser at or below this many points is skunked.
pub const SKUNK: Points = 90;

// ============================================================================
// SIMULATION DEFAULTS
// ============================================================================
/// Default two-sided confidence level for intervals and racing.
pub const CONFIDENCE: Confidence = 95.0;
/// Games a worker simulates between merges into the shared aggregate.
pub const GAMES_PER_MERGE: usize = 64;
/// Racing drops a candidate once it trails the leader by this many z-multiples
/// of the pooled standard error.
pub const RACING_Z_MULTIPLE: f64 = 2.0;
/// Consecutive void games tolerated before constraints are declared unsatisfiable.
pub const MAX_CONSECUTIVE_VOIDS: usize = 100_000;
/// Consecutive void games a look-ahead sub-run tolerates before its
/// policy falls back to the static default.
pub const LOOKAHEAD_MAX_VOIDS: usize = 1_000;
/// Interval between progress log messages during long runs.
pub const PROGRESS_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Global interrupt flag for graceful shutdown coordination.
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if graceful shutdown was requested.
/// Workers poll this between games, never in the middle of a merge.
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
}

/// Request graceful shutdown of every running worker.
pub fn interrupt() {
    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
}

/// Register Ctrl+C handler. The first interrupt lets workers finish their
/// current game and merge; a second one exits immediately.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("ctrl-c handler");
        println!();
        log::warn!("interrupt received, finishing current games...");
        interrupt();
        tokio::signal::ctrl_c().await.expect("ctrl-c handler");
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}

/// Register graceful interrupt handler. Type "Q" + Enter to stop after current games.
#[cfg(feature = "server")]
pub fn brb() {
    std::thread::spawn(|| {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().to_uppercase() == "Q" => {
                    log::warn!("graceful interrupt requested, finishing current games...");
                    interrupt();
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}
