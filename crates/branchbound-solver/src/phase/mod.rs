//! Solver phases.

pub mod exhaustive;

use branchbound_core::error::Result;
use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

use crate::scope::SolverScope;

/// One stage of a solve, run to completion against the solver scope.
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send {
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()>;

    fn phase_type_name(&self) -> &'static str;
}
