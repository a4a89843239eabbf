use crate::gameplay::Outcome;
use crate::gameplay::Player;
use crate::gameplay::Position;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

/// Results of the finished games that passed through a position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tallies {
    pub first_pone_wins: i64,
    pub first_dealer_wins: i64,
    pub first_pone_game_points: i64,
    pub first_dealer_game_points: i64,
}

impl Tallies {
    /// a finished game's contribution; unfinished games contribute nothing
    pub fn from_outcome(outcome: &Outcome) -> Option<Self> {
        let winner = outcome.score.winner()?;
        let [pone, dealer] = outcome.score.game_points();
        Some(Self {
            first_pone_wins: (winner == Player::FirstPone) as i64,
            first_dealer_wins: (winner == Player::FirstDealer) as i64,
            first_pone_game_points: pone as i64,
            first_dealer_game_points: dealer as i64,
        })
    }
    pub fn add(&mut self, other: &Self) {
        self.first_pone_wins += other.first_pone_wins;
        self.first_dealer_wins += other.first_dealer_wins;
        self.first_pone_game_points += other.first_pone_game_points;
        self.first_dealer_game_points += other.first_dealer_game_points;
    }
    pub fn games(&self) -> i64 {
        self.first_pone_wins + self.first_dealer_wins
    }
    /// Expected (wins, game points) per player, if any game was tallied.
    pub fn expected(&self) -> Option<[(f64, f64); 2]> {
        match self.games() {
            0 => None,
            n => Some([
                (
                    self.first_pone_wins as f64 / n as f64,
                    self.first_pone_game_points as f64 / n as f64,
                ),
                (
                    self.first_dealer_wins as f64 / n as f64,
                    self.first_dealer_game_points as f64 / n as f64,
                ),
            ]),
        }
    }
}

/// The position-tally collaborator: a string-keyed store of four
/// integers, shared by every worker of a run.
pub trait TallyStore: Send + Sync {
    fn get(&self, position: &Position) -> Option<Tallies>;
    fn add(&self, position: &Position, tallies: &Tallies);
}

/// In-memory store, optionally loaded from and saved to a JSON file.
#[derive(Debug, Default)]
pub struct MemoryTallies {
    path: Option<PathBuf>,
    tallies: Mutex<HashMap<String, Tallies>>,
}

impl MemoryTallies {
    pub fn new() -> Self {
        Self::default()
    }
    /// Open the store at this path, starting empty if it does not exist.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let tallies = match path.exists() {
            true => serde_json::from_reader(std::io::BufReader::new(std::fs::File::open(path)?))?,
            false => HashMap::new(),
        };
        log::info!("{:<32}{:<32}", "loaded position tallies", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            tallies: Mutex::new(tallies),
        })
    }
    /// Write the store back to the path it was opened from.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(ref path) = self.path {
            let tallies = self.lock();
            let file = std::io::BufWriter::new(std::fs::File::create(path)?);
            serde_json::to_writer(file, &*tallies)?;
            log::info!("{:<32}{:<32}", "saved position tallies", tallies.len());
        }
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.lock().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Tallies>> {
        self.tallies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TallyStore for MemoryTallies {
    fn get(&self, position: &Position) -> Option<Tallies> {
        self.lock().get(&position.key()).copied()
    }
    fn add(&self, position: &Position, tallies: &Tallies) {
        self.lock().entry(position.key()).or_default().add(tallies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::GameScore;

    #[test]
    fn expected_results() {
        let store = MemoryTallies::new();
        let position = Position::new(&GameScore::new(100, 110), Player::FirstPone);
        assert!(store.get(&position).is_none());
        let win = Tallies {
            first_pone_wins: 1,
            first_pone_game_points: 1,
            ..Tallies::default()
        };
        let loss = Tallies {
            first_dealer_wins: 1,
            first_dealer_game_points: 2,
            ..Tallies::default()
        };
        store.add(&position, &win);
        store.add(&position, &win);
        store.add(&position, &loss);
        let tallies = store.get(&position).unwrap();
        assert_eq!(tallies.games(), 3);
        let [pone, dealer] = tallies.expected().unwrap();
        assert!((pone.0 - 2. / 3.).abs() < 1e-12);
        assert!((dealer.1 - 2. / 3.).abs() < 1e-12);
        assert_eq!(Tallies::default().expected(), None);
    }

    #[test]
    fn json_round_trip() {
        let path = std::env::temp_dir().join(format!("robocrib-tallies-{}.json", std::process::id()));
        let position = Position::new(&GameScore::new(12, 30), Player::FirstDealer);
        let store = MemoryTallies::open(&path).unwrap();
        store.add(&position, &Tallies { first_pone_wins: 1, first_pone_game_points: 3, ..Tallies::default() });
        store.save().unwrap();
        let again = MemoryTallies::open(&path).unwrap();
        assert_eq!(again.get(&position), store.get(&position));
        std::fs::remove_file(&path).unwrap();
    }
}
