use std::fmt::Debug;

use branchbound_core::{InitializingScoreTrend, Score};

/// Computes an admissible optimistic bound: no completion of the partial
/// assignment behind `score` can ever score better than the bound.
pub trait ScoreBounder<Sc: Score>: Send + Debug {
    /// `uninitialized_count` is the number of entities the partial
    /// assignment has not placed yet. Zero means `score` is exact.
    fn optimistic_bound(&self, score: Sc, uninitialized_count: usize) -> Sc;
}

/// Bounder derived from the initializing score trend.
///
/// Per score level: an `OnlyDown` level cannot improve as more entities
/// are placed, so the current level value is already an upper bound. Any
/// other level is replaced by its perfect maximum, or `i64::MAX` when no
/// perfect maximum is known. The result is admissible by construction;
/// how tight it is depends entirely on the trend.
#[derive(Debug, Clone)]
pub struct TrendScoreBounder<Sc: Score> {
    trend: InitializingScoreTrend,
    perfect_maximum: Option<Sc>,
}

impl<Sc: Score> TrendScoreBounder<Sc> {
    pub fn new(trend: InitializingScoreTrend) -> Self {
        Self {
            trend,
            perfect_maximum: None,
        }
    }

    /// Sets the best score any solution could reach, tightening the bound
    /// on levels the trend cannot bound.
    pub fn with_perfect_maximum(mut self, perfect_maximum: Sc) -> Self {
        self.perfect_maximum = Some(perfect_maximum);
        self
    }
}

impl<Sc: Score> ScoreBounder<Sc> for TrendScoreBounder<Sc> {
    fn optimistic_bound(&self, score: Sc, uninitialized_count: usize) -> Sc {
        if uninitialized_count == 0 {
            return score;
        }
        let levels = score.to_level_numbers();
        let maximum_levels = self.perfect_maximum.map(|m| m.to_level_numbers());
        let bound_levels: Vec<i64> = levels
            .iter()
            .enumerate()
            .map(|(level, &value)| {
                if self.trend.is_only_down(level) {
                    value
                } else {
                    maximum_levels.as_ref().map_or(i64::MAX, |m| m[level])
                }
            })
            .collect();
        Sc::from_level_numbers(&bound_levels)
    }
}

#[cfg(test)]
mod tests {
    use branchbound_core::{HardSoftScore, ScoreTrendLevel, SimpleScore};

    use super::*;

    #[test]
    fn complete_assignment_bounds_to_its_own_score() {
        let bounder =
            TrendScoreBounder::new(InitializingScoreTrend::uniform(ScoreTrendLevel::Any, 1));
        assert_eq!(
            bounder.optimistic_bound(SimpleScore::of(-7), 0),
            SimpleScore::of(-7)
        );
    }

    #[test]
    fn only_down_level_keeps_current_value() {
        let bounder =
            TrendScoreBounder::new(InitializingScoreTrend::uniform(ScoreTrendLevel::OnlyDown, 1));
        assert_eq!(
            bounder.optimistic_bound(SimpleScore::of(-7), 3),
            SimpleScore::of(-7)
        );
    }

    #[test]
    fn unbounded_level_defaults_to_max() {
        let bounder =
            TrendScoreBounder::new(InitializingScoreTrend::uniform(ScoreTrendLevel::Any, 1));
        assert_eq!(
            bounder.optimistic_bound(SimpleScore::of(-7), 3),
            SimpleScore::of(i64::MAX)
        );
    }

    #[test]
    fn perfect_maximum_tightens_unbounded_levels() {
        let bounder =
            TrendScoreBounder::new(InitializingScoreTrend::uniform(ScoreTrendLevel::Any, 1))
                .with_perfect_maximum(SimpleScore::of(0));
        assert_eq!(
            bounder.optimistic_bound(SimpleScore::of(-7), 3),
            SimpleScore::of(0)
        );
    }

    #[test]
    fn mixed_trend_bounds_per_level() {
        let trend = InitializingScoreTrend::new(vec![
            ScoreTrendLevel::OnlyDown,
            ScoreTrendLevel::Any,
        ]);
        let bounder = TrendScoreBounder::new(trend)
            .with_perfect_maximum(HardSoftScore::of(0, 0));
        let bound = bounder.optimistic_bound(HardSoftScore::of(-3, -20), 2);
        // Hard is OnlyDown so it stays; soft jumps to its perfect maximum.
        assert_eq!(bound, HardSoftScore::of(-3, 0));
    }

    #[test]
    fn bound_is_admissible_for_every_completion() {
        // 2 unplaced entities, each adding a penalty in {-3, -2, -1}.
        // OnlyDown trend: the bound must dominate every completion.
        let bounder =
            TrendScoreBounder::new(InitializingScoreTrend::uniform(ScoreTrendLevel::OnlyDown, 1));
        let partial = SimpleScore::of(-4);
        let bound = bounder.optimistic_bound(partial, 2);
        for a in [-3_i64, -2, -1] {
            for b in [-3_i64, -2, -1] {
                let completion = SimpleScore::of(-4 + a + b);
                assert!(bound >= completion);
            }
        }
    }
}
