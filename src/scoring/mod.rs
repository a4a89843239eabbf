pub mod hand;
pub use hand::*;

pub mod memo;
pub use memo::*;

pub mod pegging;
pub use pegging::*;

pub mod ranks;
pub use ranks::*;
