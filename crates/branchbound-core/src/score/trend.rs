//! Score trends for partially initialized solutions.
//!
//! A trend classifies, per score level, how the score can change as more
//! planning variables are initialized while the already initialized
//! variables stay untouched. The exhaustive search bounder uses this to
//! compute admissible optimistic bounds.

use crate::error::SolverError;

/// Per-level monotonicity classification of a score during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScoreTrendLevel {
    /// No prediction can be made for this level.
    #[default]
    Any,

    /// Initializing 1 or more variables (without altering the already
    /// initialized ones) can only improve this level or leave it equal.
    ///
    /// In practice: every constraint contribution at this level is
    /// non-negative, and initializing a variable cannot unmatch an already
    /// matched positive contribution.
    OnlyUp,

    /// Initializing 1 or more variables can only worsen this level or
    /// leave it equal. The current value is already the best achievable.
    OnlyDown,
}

/// The score trend for every level of a score type, in level priority order.
///
/// Static per-solver configuration, derived from how the constraints were
/// authored, and consumed by the trend-based score bounder.
///
/// # Examples
///
/// ```
/// use branchbound_core::{InitializingScoreTrend, ScoreTrendLevel};
///
/// // Hard level can only get worse, soft level is unpredictable.
/// let trend = InitializingScoreTrend::new(vec![
///     ScoreTrendLevel::OnlyDown,
///     ScoreTrendLevel::Any,
/// ]);
/// assert!(trend.is_only_down(0));
/// assert!(!trend.is_only_down(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializingScoreTrend {
    levels: Vec<ScoreTrendLevel>,
}

impl InitializingScoreTrend {
    /// Creates a trend from explicit per-level classifications.
    pub fn new(levels: Vec<ScoreTrendLevel>) -> Self {
        Self { levels }
    }

    /// Creates a trend with the same classification on every level.
    pub fn uniform(level: ScoreTrendLevel, levels_count: usize) -> Self {
        Self {
            levels: vec![level; levels_count],
        }
    }

    /// Creates the weakest trend (`Any` on every level).
    pub fn any(levels_count: usize) -> Self {
        Self::uniform(ScoreTrendLevel::Any, levels_count)
    }

    /// Returns the number of levels this trend describes.
    pub fn levels_count(&self) -> usize {
        self.levels.len()
    }

    /// Returns the classification for the given level index.
    ///
    /// # Panics
    /// Panics if `index >= levels_count()`.
    pub fn level(&self, index: usize) -> ScoreTrendLevel {
        self.levels[index]
    }

    /// Returns true if the given level can only decrease during
    /// initialization.
    pub fn is_only_down(&self, index: usize) -> bool {
        self.levels[index] == ScoreTrendLevel::OnlyDown
    }

    /// Returns true if every level is `OnlyDown`.
    pub fn is_only_down_everywhere(&self) -> bool {
        self.levels.iter().all(|l| *l == ScoreTrendLevel::OnlyDown)
    }

    /// Validates this trend against a score type's level count.
    pub fn check_levels(&self, expected: usize) -> Result<(), SolverError> {
        if self.levels.len() != expected {
            return Err(SolverError::Config(format!(
                "The initializing score trend has {} levels but the score type has {} levels",
                self.levels.len(),
                expected
            )));
        }
        Ok(())
    }
}
