pub mod action;
pub use action::*;

pub mod fixed;
pub use fixed::*;

pub mod game;
pub use game::*;

pub mod outcome;
pub use outcome::*;

pub mod peg;
pub use peg::*;

pub mod player;
pub use player::*;

pub mod position;
pub use position::*;

pub mod score;
pub use score::*;

pub mod seat;
pub use seat::*;

pub mod segment;
pub use segment::*;
