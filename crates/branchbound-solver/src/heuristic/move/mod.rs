use std::fmt;

use smallvec::SmallVec;

use branchbound_core::{EntityDescriptor, PlanningSolution};
use branchbound_scoring::ScoreDirector;

/// Assigns one value (by range index) to every genuine variable of a single
/// entity. This is the only move kind the exhaustive search needs: each tree
/// layer fixes one entity completely.
///
/// Value indices are positions in each variable's value range, in variable
/// declaration order, so a move is plain data that can be stored on a search
/// node and replayed later.
#[derive(Clone, PartialEq, Eq)]
pub struct AssignMove {
    entity_index: usize,
    value_indices: SmallVec<[usize; 2]>,
}

/// Token returned by [`AssignMove::apply`], capturing the value indices that
/// were assigned before the move. Feeding it back to [`AssignMove::undo`]
/// restores the working solution exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignUndo {
    prior_indices: SmallVec<[Option<usize>; 2]>,
}

impl AssignMove {
    pub fn new(entity_index: usize, value_indices: SmallVec<[usize; 2]>) -> Self {
        Self {
            entity_index,
            value_indices,
        }
    }

    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    pub fn value_indices(&self) -> &[usize] {
        &self.value_indices
    }

    /// Applies the move through the score director, firing before/after
    /// variable notifications per variable so incremental calculators stay
    /// in sync.
    pub fn apply<S, D>(
        &self,
        score_director: &mut D,
        descriptor_index: usize,
        entity_descriptor: &EntityDescriptor<S>,
    ) -> AssignUndo
    where
        S: PlanningSolution,
        D: ScoreDirector<S>,
    {
        let mut prior_indices = SmallVec::with_capacity(self.value_indices.len());
        for (variable_index, &value_index) in self.value_indices.iter().enumerate() {
            let variable = entity_descriptor.variable(variable_index);
            prior_indices
                .push(variable.assigned_index(score_director.working_solution(), self.entity_index));
            score_director.before_variable_changed(
                descriptor_index,
                self.entity_index,
                variable.name(),
            );
            variable.assign(
                score_director.working_solution_mut(),
                self.entity_index,
                Some(value_index),
            );
            score_director.after_variable_changed(
                descriptor_index,
                self.entity_index,
                variable.name(),
            );
        }
        AssignUndo { prior_indices }
    }

    /// Reverts a previous [`apply`](Self::apply), restoring the recorded
    /// prior value of each variable in reverse order.
    pub fn undo<S, D>(
        &self,
        undo: AssignUndo,
        score_director: &mut D,
        descriptor_index: usize,
        entity_descriptor: &EntityDescriptor<S>,
    ) where
        S: PlanningSolution,
        D: ScoreDirector<S>,
    {
        for (variable_index, prior_index) in undo.prior_indices.into_iter().enumerate().rev() {
            let variable = entity_descriptor.variable(variable_index);
            score_director.before_variable_changed(
                descriptor_index,
                self.entity_index,
                variable.name(),
            );
            variable.assign(
                score_director.working_solution_mut(),
                self.entity_index,
                prior_index,
            );
            score_director.after_variable_changed(
                descriptor_index,
                self.entity_index,
                variable.name(),
            );
        }
    }
}

impl fmt::Debug for AssignMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AssignMove(entity {} <- {:?})",
            self.entity_index, self.value_indices
        )
    }
}
