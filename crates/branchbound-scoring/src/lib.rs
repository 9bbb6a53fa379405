//! branchbound-scoring - Score director abstraction
//!
//! The score director owns the working solution and answers "what is the
//! score right now". Phases mutate the working solution through it so that
//! incremental implementations can track deltas via the before/after
//! variable-change notifications.

mod director;
mod easy;
mod incremental;

pub use director::ScoreDirector;
pub use easy::EasyScoreDirector;
pub use incremental::{IncrementalScoreCalculator, IncrementalScoreDirector};
