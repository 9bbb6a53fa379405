//! Easy (from-scratch) score director.

use std::sync::Arc;

use branchbound_core::domain::{PlanningSolution, SolutionDescriptor};

use crate::director::ScoreDirector;

/// A score director that recalculates the full score on every call.
///
/// Simple and always correct, at the cost of doing the whole calculation
/// per move evaluation. Good enough for small problems and for tests; a
/// production solve should use [`IncrementalScoreDirector`] instead.
///
/// [`IncrementalScoreDirector`]: crate::IncrementalScoreDirector
pub struct EasyScoreDirector<S: PlanningSolution, F> {
    solution: S,
    descriptor: Arc<SolutionDescriptor<S>>,
    score_fn: F,
}

impl<S, F> EasyScoreDirector<S, F>
where
    S: PlanningSolution,
    F: Fn(&S) -> S::Score + Send,
{
    /// Creates an easy score director over the given solution.
    pub fn new(solution: S, descriptor: Arc<SolutionDescriptor<S>>, score_fn: F) -> Self {
        Self {
            solution,
            descriptor,
            score_fn,
        }
    }

    /// Consumes the director and returns the working solution.
    pub fn into_working_solution(self) -> S {
        self.solution
    }
}

impl<S, F> ScoreDirector<S> for EasyScoreDirector<S, F>
where
    S: PlanningSolution,
    F: Fn(&S) -> S::Score + Send,
{
    fn working_solution(&self) -> &S {
        &self.solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.solution
    }

    fn calculate_score(&mut self) -> S::Score {
        let score = (self.score_fn)(&self.solution);
        self.solution.set_score(Some(score));
        score
    }

    fn solution_descriptor(&self) -> &SolutionDescriptor<S> {
        &self.descriptor
    }

    fn clone_working_solution(&self) -> S {
        self.solution.clone()
    }

    fn before_variable_changed(
        &mut self,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
    }

    fn after_variable_changed(
        &mut self,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
        // The cached score is stale after any change.
        self.solution.set_score(None);
    }

    fn entity_count(&self, descriptor_index: usize) -> Option<usize> {
        self.descriptor
            .entity_descriptors()
            .get(descriptor_index)
            .map(|d| d.entity_count(&self.solution))
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

    fn sum_score(s: &Sol) -> SimpleScore {
        SimpleScore::of(s.values.iter().flatten().sum())
    }

    fn director(values: Vec<Option<i64>>) -> EasyScoreDirector<Sol, fn(&Sol) -> SimpleScore> {
        let descriptor = Arc::new(SolutionDescriptor::new(vec![EntityDescriptor::new(
            "Value", count,
        )]));
        EasyScoreDirector::new(
            Sol {
                values,
                score: None,
            },
            descriptor,
            sum_score,
        )
    }

    #[test]
    fn calculates_and_caches_score() {
        let mut d = director(vec![Some(1), Some(2), None]);
        assert_eq!(d.calculate_score(), SimpleScore::of(3));
        assert_eq!(d.working_solution().score(), Some(SimpleScore::of(3)));
    }

    #[test]
    fn change_invalidates_cached_score() {
        let mut d = director(vec![Some(1), None]);
        d.calculate_score();
        d.before_variable_changed(0, 1, "value");
        d.working_solution_mut().values[1] = Some(10);
        d.after_variable_changed(0, 1, "value");
        assert_eq!(d.working_solution().score(), None);
        assert_eq!(d.calculate_score(), SimpleScore::of(11));
    }

    #[test]
    fn entity_count_reads_descriptor() {
        let d = director(vec![None; 4]);
        assert_eq!(d.entity_count(0), Some(4));
        assert_eq!(d.entity_count(1), None);
    }
}
