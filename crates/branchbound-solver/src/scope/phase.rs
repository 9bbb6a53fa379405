use std::time::{Duration, Instant};

use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

use super::SolverScope;

/// Per-phase view over the [`SolverScope`], tracking phase-local step counts
/// and timing on top of the solve-wide state.
pub struct PhaseScope<'a, S: PlanningSolution, D: ScoreDirector<S>> {
    solver_scope: &'a mut SolverScope<S, D>,
    phase_index: usize,
    step_count: u64,
    start_time: Instant,
}

impl<'a, S: PlanningSolution, D: ScoreDirector<S>> PhaseScope<'a, S, D> {
    pub fn new(solver_scope: &'a mut SolverScope<S, D>, phase_index: usize) -> Self {
        Self {
            solver_scope,
            phase_index,
            step_count: 0,
            start_time: Instant::now(),
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn solver_scope(&self) -> &SolverScope<S, D> {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope<S, D> {
        self.solver_scope
    }

    pub fn score_director(&self) -> &D {
        self.solver_scope.score_director()
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        self.solver_scope.score_director_mut()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.solver_scope.calculate_score()
    }

    /// Counts a step against both the phase and the solve.
    pub fn increment_step_count(&mut self) {
        self.step_count += 1;
        self.solver_scope.increment_step_count();
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn phase_elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}
