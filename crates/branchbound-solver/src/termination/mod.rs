//! Termination conditions polled between node expansions.

mod external;
mod time;

pub use external::ExternalTermination;
pub use time::TimeTermination;

use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

use crate::scope::SolverScope;

/// Decides whether the solve should stop early.
///
/// Polled at every node expansion, never mid-expansion, so the working
/// solution is always in a consistent state when a termination fires.
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool;
}

/// Never terminates; the search runs until the open list is exhausted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTermination;

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for NoTermination {
    fn is_terminated(&self, _solver_scope: &SolverScope<S, D>) -> bool {
        false
    }
}

/// Terminates once the solve-wide step count reaches a limit.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    step_count_limit: u64,
}

impl StepCountTermination {
    pub fn new(step_count_limit: u64) -> Self {
        Self { step_count_limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for StepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.total_step_count() >= self.step_count_limit
    }
}

/// Terminates as soon as any child termination does.
pub struct OrTermination<S: PlanningSolution, D: ScoreDirector<S>> {
    terminations: Vec<Box<dyn Termination<S, D>>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> OrTermination<S, D> {
    pub fn new(terminations: Vec<Box<dyn Termination<S, D>>>) -> Self {
        Self { terminations }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for OrTermination<S, D> {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        self.terminations.iter().any(|t| t.is_terminated(solver_scope))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use branchbound_core::{SimpleScore, SolutionDescriptor};
    use branchbound_scoring::EasyScoreDirector;

    use super::*;

    #[derive(Clone, Debug)]
    struct Sol {
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

    fn zero(_: &Sol) -> SimpleScore {
        SimpleScore::of(0)
    }

    type Director = EasyScoreDirector<Sol, fn(&Sol) -> SimpleScore>;

    fn scope() -> SolverScope<Sol, Director> {
        let descriptor = Arc::new(SolutionDescriptor::new(vec![]));
        SolverScope::new(EasyScoreDirector::new(Sol { score: None }, descriptor, zero))
    }

    #[test]
    fn or_termination_fires_when_any_child_fires() {
        let scope = scope();
        let external = ExternalTermination::new();
        let either: OrTermination<Sol, Director> = OrTermination::new(vec![
            Box::new(NoTermination),
            Box::new(external.clone()),
        ]);
        assert!(!either.is_terminated(&scope));
        external.terminate_early();
        assert!(either.is_terminated(&scope));
    }

    #[test]
    fn or_termination_stays_quiet_without_children() {
        let either: OrTermination<Sol, Director> = OrTermination::new(Vec::new());
        assert!(!either.is_terminated(&scope()));
    }
}
