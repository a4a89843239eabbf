pub mod aggregator;
pub use aggregator::*;

pub mod config;
pub use config::*;

pub mod driver;
pub use driver::*;

pub mod interval;
pub use interval::*;

pub mod lookahead;

pub mod metrics;
pub use metrics::*;

pub mod racing;
pub use racing::*;

pub mod report;
pub use report::*;

pub mod statistic;
pub use statistic::*;

pub mod tally;
pub use tally::*;

pub mod worker;
pub use worker::*;

#[cfg(test)]
mod tests;
