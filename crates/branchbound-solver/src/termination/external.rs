use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

use crate::scope::SolverScope;

use super::Termination;

/// Cooperative termination driven from outside the solver thread.
///
/// Clone it (or the underlying [`handle`](Self::handle)) into whatever owns
/// the cancel decision and call [`terminate_early`](Self::terminate_early);
/// the solver observes the flag at its next node expansion.
#[derive(Debug, Clone, Default)]
pub struct ExternalTermination {
    terminated: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination. Idempotent.
    pub fn terminate_early(&self) {
        self.terminated.store(true, Ordering::Relaxed);
    }

    pub fn is_early_terminated(&self) -> bool {
        self.terminated.load(Ordering::Relaxed)
    }

    /// The shared flag itself, for callers that want to store it elsewhere.
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminated)
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for ExternalTermination {
    fn is_terminated(&self, _solver_scope: &SolverScope<S, D>) -> bool {
        self.is_early_terminated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_flips_once_requested() {
        let termination = ExternalTermination::new();
        assert!(!termination.is_early_terminated());
        termination.terminate_early();
        assert!(termination.is_early_terminated());
        // A clone observes the same flag.
        let other = termination.clone();
        assert!(other.is_early_terminated());
    }
}
