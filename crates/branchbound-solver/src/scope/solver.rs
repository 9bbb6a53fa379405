use std::time::{Duration, Instant};

use branchbound_core::{PlanningSolution, Score};
use branchbound_scoring::ScoreDirector;

/// Solve-wide state: the score director, the best solution found so far and
/// solve-level counters.
///
/// There is exactly one `SolverScope` per solve. Phases borrow it mutably
/// through a [`super::PhaseScope`], so no two phases can run concurrently on
/// the same solve.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    start_time: Option<Instant>,
    total_step_count: u64,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    pub fn new(score_director: D) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            start_time: None,
            total_step_count: 0,
        }
    }

    /// Marks the start of the solve for wall-clock based termination.
    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Wall-clock time since [`start_solving`](Self::start_solving), or zero
    /// if solving has not started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    /// Consumes the best solution snapshot, leaving `None` behind.
    pub fn take_best_solution(&mut self) -> Option<S> {
        self.best_solution.take()
    }

    /// Snapshots the working solution as the new best if `score` beats the
    /// current best score. Returns whether an improvement was recorded.
    pub fn record_if_improved(&mut self, score: S::Score) -> bool {
        let improved = match &self.best_score {
            None => true,
            Some(best) => score.is_better_than(best),
        };
        if improved {
            let mut snapshot = self.score_director.clone_working_solution();
            snapshot.set_score(Some(score));
            tracing::debug!(score = %score, "new best solution");
            self.best_score = Some(score);
            self.best_solution = Some(snapshot);
        }
        improved
    }

    pub fn increment_step_count(&mut self) {
        self.total_step_count += 1;
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }
}
