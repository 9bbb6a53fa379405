//! Score types for representing solution quality.
//!
//! Scores are multi-level ordered numeric measures; comparison is
//! lexicographic across levels (the first level dominates, subsequent
//! levels break ties).

mod hard_soft;
mod simple;
mod traits;
mod trend;

pub use hard_soft::HardSoftScore;
pub use simple::SimpleScore;
pub use traits::Score;
pub use trend::{InitializingScoreTrend, ScoreTrendLevel};

#[cfg(test)]
mod tests;
