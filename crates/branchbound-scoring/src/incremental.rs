//! Incremental score director.
//!
//! Tracks score deltas through the before/after variable-change
//! notifications instead of recalculating the whole score per move.

use std::sync::Arc;

use branchbound_core::domain::{PlanningSolution, SolutionDescriptor};

use crate::director::ScoreDirector;

/// Incremental score calculation hooks.
///
/// Implementations keep their own running score and adjust it when
/// notified that a variable is about to change / has changed. The
/// from-scratch calculation exists only to validate the incremental state
/// under assertion mode.
pub trait IncrementalScoreCalculator<S: PlanningSolution>: Send {
    /// Rebuilds all incremental state from the given solution.
    fn reset(&mut self, solution: &S);

    /// Called before a variable changes; retract the entity's current
    /// contributions.
    fn before_variable_changed(
        &mut self,
        solution: &S,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    /// Called after a variable changed; insert the entity's new
    /// contributions.
    fn after_variable_changed(
        &mut self,
        solution: &S,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    /// The current running score.
    fn current_score(&self) -> S::Score;

    /// Recomputes the score from scratch without touching incremental
    /// state. Used only under assertion mode.
    fn recalculate(&self, solution: &S) -> S::Score;
}

/// A score director backed by an [`IncrementalScoreCalculator`].
pub struct IncrementalScoreDirector<S: PlanningSolution, C> {
    solution: S,
    descriptor: Arc<SolutionDescriptor<S>>,
    calculator: C,
}

impl<S, C> IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
{
    /// Creates an incremental director, resetting the calculator against
    /// the given solution.
    pub fn new(solution: S, descriptor: Arc<SolutionDescriptor<S>>, mut calculator: C) -> Self {
        calculator.reset(&solution);
        Self {
            solution,
            descriptor,
            calculator,
        }
    }

    /// Consumes the director and returns the working solution.
    pub fn into_working_solution(self) -> S {
        self.solution
    }
}

impl<S, C> ScoreDirector<S> for IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
{
    fn working_solution(&self) -> &S {
        &self.solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.solution
    }

    fn calculate_score(&mut self) -> S::Score {
        let score = self.calculator.current_score();
        self.solution.set_score(Some(score));
        score
    }

    fn calculate_score_from_scratch(&mut self) -> S::Score {
        self.calculator.recalculate(&self.solution)
    }

    fn solution_descriptor(&self) -> &SolutionDescriptor<S> {
        &self.descriptor
    }

    fn clone_working_solution(&self) -> S {
        self.solution.clone()
    }

    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        self.calculator.before_variable_changed(
            &self.solution,
            descriptor_index,
            entity_index,
            variable_name,
        );
    }

    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        self.calculator.after_variable_changed(
            &self.solution,
            descriptor_index,
            entity_index,
            variable_name,
        );
        self.solution.set_score(None);
    }

    fn entity_count(&self, descriptor_index: usize) -> Option<usize> {
        self.descriptor
            .entity_descriptors()
            .get(descriptor_index)
            .map(|d| d.entity_count(&self.solution))
    }

    fn is_incremental(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchbound_core::domain::EntityDescriptor;
    use branchbound_core::score::SimpleScore;

    #[derive(Clone, Debug)]
    struct Sol {
        values: Vec<Option<i64>>,
        score: Option<SimpleScore>,
    }

    impl PlanningSolution for Sol {
        type Score = SimpleScore;

        fn score(&self) -> Option<Self::Score> {
            self.score
        }

        fn set_score(&mut self, score: Option<Self::Score>) {
            self.score = score;
        }
    }

    fn count(s: &Sol) -> usize {
        s.values.len()
    }

    // Incrementally maintains -sum(values), retracting and re-inserting
    // one entity per change notification.
    struct SumCalculator {
        total: i64,
    }

    impl IncrementalScoreCalculator<Sol> for SumCalculator {
        fn reset(&mut self, solution: &Sol) {
            self.total = solution.values.iter().flatten().sum();
        }

        fn before_variable_changed(
            &mut self,
            solution: &Sol,
            _descriptor_index: usize,
            entity_index: usize,
            _variable_name: &str,
        ) {
            if let Some(v) = solution.values[entity_index] {
                self.total -= v;
            }
        }

        fn after_variable_changed(
            &mut self,
            solution: &Sol,
            _descriptor_index: usize,
            entity_index: usize,
            _variable_name: &str,
        ) {
            if let Some(v) = solution.values[entity_index] {
                self.total += v;
            }
        }

        fn current_score(&self) -> SimpleScore {
            SimpleScore::of(-self.total)
        }

        fn recalculate(&self, solution: &Sol) -> SimpleScore {
            SimpleScore::of(-solution.values.iter().flatten().sum::<i64>())
        }
    }

    fn director(values: Vec<Option<i64>>) -> IncrementalScoreDirector<Sol, SumCalculator> {
        let descriptor = Arc::new(SolutionDescriptor::new(vec![EntityDescriptor::new(
            "Value", count,
        )]));
        IncrementalScoreDirector::new(
            Sol {
                values,
                score: None,
            },
            descriptor,
            SumCalculator { total: 0 },
        )
    }

    #[test]
    fn reset_builds_running_score() {
        let mut d = director(vec![Some(2), Some(3)]);
        assert_eq!(d.calculate_score(), SimpleScore::of(-5));
        assert!(d.is_incremental());
    }

    #[test]
    fn tracks_changes_incrementally() {
        let mut d = director(vec![Some(2), None]);
        assert_eq!(d.calculate_score(), SimpleScore::of(-2));

        d.before_variable_changed(0, 1, "value");
        d.working_solution_mut().values[1] = Some(7);
        d.after_variable_changed(0, 1, "value");
        assert_eq!(d.calculate_score(), SimpleScore::of(-9));

        d.before_variable_changed(0, 1, "value");
        d.working_solution_mut().values[1] = None;
        d.after_variable_changed(0, 1, "value");
        assert_eq!(d.calculate_score(), SimpleScore::of(-2));
    }

    #[test]
    fn from_scratch_matches_incremental() {
        let mut d = director(vec![Some(1), Some(4), None]);
        d.before_variable_changed(0, 2, "value");
        d.working_solution_mut().values[2] = Some(5);
        d.after_variable_changed(0, 2, "value");
        assert_eq!(d.calculate_score(), d.calculate_score_from_scratch());
    }
}
