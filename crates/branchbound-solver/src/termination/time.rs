use std::time::Duration;

use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

use crate::scope::SolverScope;

use super::Termination;

/// Terminates once the solve has run for at least `time_limit` of wall-clock
/// time, measured from [`SolverScope::start_solving`].
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    time_limit: Duration,
}

impl TimeTermination {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for TimeTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.elapsed() >= self.time_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_terminates_immediately() {
        let termination = TimeTermination::new(Duration::ZERO);
        assert_eq!(termination.time_limit(), Duration::ZERO);
    }
}
