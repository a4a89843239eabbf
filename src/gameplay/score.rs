use super::player::Player;
use crate::DOUBLE_SKUNK;
use crate::GamePoints;
use crate::MAX_SCORE;
use crate::Points;
use crate::SKUNK;
use crate::TRIPLE_SKUNK;

/// Where a player's points came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Play,
    Hand,
    Crib,
}

/// One player's points, broken down by source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ledger {
    pub initial: Points,
    pub play: Points,
    pub hand: Points,
    pub crib: Points,
}

impl Ledger {
    pub fn total(&self) -> Points {
        self.initial + self.earned()
    }
    /// points scored in this game, excluding the starting score
    pub fn earned(&self) -> Points {
        self.play + self.hand + self.crib
    }
}

/// GameScore holds both players' ledgers, indexed by [`Player`].
///
/// Additions are capped so no total exceeds [`MAX_SCORE`], and once
/// either player reaches it every further addition is ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameScore([Ledger; 2]);

impl GameScore {
    pub fn new(first_pone: Points, first_dealer: Points) -> Self {
        let mut score = Self::default();
        score.0[Player::FirstPone.index()].initial = first_pone;
        score.0[Player::FirstDealer.index()].initial = first_dealer;
        score
    }
    pub fn ledger(&self, player: Player) -> &Ledger {
        &self.0[player.index()]
    }
    pub fn total(&self, player: Player) -> Points {
        self.ledger(player).total()
    }
    pub fn over(&self) -> bool {
        Player::both().iter().any(|p| self.total(*p) >= MAX_SCORE)
    }
    pub fn winner(&self) -> Option<Player> {
        Player::both()
            .into_iter()
            .find(|p| self.total(*p) >= MAX_SCORE)
    }

    /// Book points and report whether the game is now over.
    pub fn add(&mut self, player: Player, phase: Phase, points: Points) -> bool {
        if self.over() {
            return true;
        }
        let room = MAX_SCORE - self.total(player);
        let points = points.min(room);
        let ref mut ledger = self.0[player.index()];
        match phase {
            Phase::Play => ledger.play += points,
            Phase::Hand => ledger.hand += points,
            Phase::Crib => ledger.crib += points,
        }
        self.over()
    }

    /// Game points for (first pone, first dealer). The winner earns one
    /// plus a bonus for each skunk line the loser failed to pass.
    pub fn game_points(&self) -> [GamePoints; 2] {
        let mut points = [0; 2];
        if let Some(winner) = self.winner() {
            points[winner.index()] = 1 + skunks(self.total(winner.other()));
        }
        points
    }
}

/// 3 for a triple skunk, 2 for a double, 1 for a skunk, else 0
pub fn skunks(loser: Points) -> GamePoints {
    match loser {
        s if s <= TRIPLE_SKUNK => 3,
        s if s <= DOUBLE_SKUNK => 2,
        s if s <= SKUNK => 1,
        _ => 0,
    }
}

impl std::fmt::Display for GameScore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.total(Player::FirstPone),
            self.total(Player::FirstDealer)
        )
    }
}
