//! Score director trait definition.

use branchbound_core::domain::{PlanningSolution, SolutionDescriptor};

/// The score director manages solution state and score calculation.
///
/// It is responsible for:
/// - Maintaining the working solution
/// - Calculating scores (incrementally when possible)
/// - Notifying about variable changes for incremental updates
/// - Providing access to solution metadata via descriptors
pub trait ScoreDirector<S: PlanningSolution>: Send {
    /// Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    /// Returns a mutable reference to the working solution.
    fn working_solution_mut(&mut self) -> &mut S;

    /// Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    /// Recalculates the score from scratch, ignoring any incremental state.
    ///
    /// Only used under assertion mode to detect score corruption. The
    /// default delegates to `calculate_score`, which is correct for
    /// non-incremental directors.
    fn calculate_score_from_scratch(&mut self) -> S::Score {
        self.calculate_score()
    }

    /// Returns the solution descriptor for this solution type.
    fn solution_descriptor(&self) -> &SolutionDescriptor<S>;

    /// Clones the working solution.
    fn clone_working_solution(&self) -> S;

    /// Called before a planning variable is changed.
    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    /// Called after a planning variable is changed.
    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    /// Returns the number of entities for a given descriptor index.
    fn entity_count(&self, descriptor_index: usize) -> Option<usize>;

    /// Returns true if this score director tracks score deltas
    /// incrementally.
    fn is_incremental(&self) -> bool {
        false
    }
}
