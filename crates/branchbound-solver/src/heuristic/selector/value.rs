use std::fmt;
use std::sync::{Arc, OnceLock};

use branchbound_core::{PlanningSolution, SolutionDescriptor};
use branchbound_scoring::ScoreDirector;

/// Yields the value range indices of one genuine variable for a given
/// entity, optionally ordered by increasing strength.
///
/// Entity-independent ranges have a fixed ordering, so it is computed once
/// and cached for the rest of the phase. Entity-dependent ranges are
/// re-derived on every call, since the legal values may differ per entity
/// and per step.
pub struct FromVariableValueSelector<S> {
    descriptor: Arc<SolutionDescriptor<S>>,
    descriptor_index: usize,
    variable_index: usize,
    sort_by_increasing_strength: bool,
    phase_cache: OnceLock<Vec<usize>>,
}

impl<S> fmt::Debug for FromVariableValueSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromVariableValueSelector")
            .field("descriptor_index", &self.descriptor_index)
            .field("variable_index", &self.variable_index)
            .field("sort_by_increasing_strength", &self.sort_by_increasing_strength)
            .finish()
    }
}

impl<S: PlanningSolution> FromVariableValueSelector<S> {
    pub fn new(
        descriptor: Arc<SolutionDescriptor<S>>,
        descriptor_index: usize,
        variable_index: usize,
        sort_by_increasing_strength: bool,
    ) -> Self {
        Self {
            descriptor,
            descriptor_index,
            variable_index,
            sort_by_increasing_strength,
            phase_cache: OnceLock::new(),
        }
    }

    pub fn variable_index(&self) -> usize {
        self.variable_index
    }

    /// The value range indices for `entity_index`, in selection order.
    pub fn value_indices<D: ScoreDirector<S>>(
        &self,
        score_director: &D,
        entity_index: usize,
    ) -> Vec<usize> {
        let variable = self
            .descriptor
            .entity_descriptor(self.descriptor_index)
            .variable(self.variable_index);
        let solution = score_director.working_solution();
        if !self.sort_by_increasing_strength || !variable.has_strength() {
            return (0..variable.value_count(solution, entity_index)).collect();
        }
        if variable.is_entity_independent_range() {
            self.phase_cache
                .get_or_init(|| variable.strength_order(solution, entity_index))
                .clone()
        } else {
            variable.strength_order(solution, entity_index)
        }
    }

    pub fn size<D: ScoreDirector<S>>(&self, score_director: &D, entity_index: usize) -> usize {
        self.descriptor
            .entity_descriptor(self.descriptor_index)
            .variable(self.variable_index)
            .value_count(score_director.working_solution(), entity_index)
    }
}

#[cfg(test)]
mod tests {
    use branchbound_core::{EntityDescriptor, SimpleScore, TypedVariableDescriptor};
    use branchbound_scoring::EasyScoreDirector;

    use super::*;

    #[derive(Clone, Debug)]
    struct Sol {
        slots: Vec<Option<i64>>,
        score: Option<SimpleScore>,
    }

    impl PlanningSolution for Sol {
        type Score = SimpleScore;

        fn score(&self) -> Option<SimpleScore> {
            self.score
        }

        fn set_score(&mut self, score: Option<SimpleScore>) {
            self.score = score;
        }
    }

    fn entity_count(s: &Sol) -> usize {
        s.slots.len()
    }

    fn zero(_: &Sol) -> SimpleScore {
        SimpleScore::of(0)
    }

    #[test]
    fn unsorted_selector_yields_range_order() {
        let variable = TypedVariableDescriptor::new(
            "slot",
            vec![30_i64, 10, 20],
            |s: &Sol, i| s.slots[i],
            |s: &mut Sol, i, v| s.slots[i] = v,
        );
        let descriptor = Arc::new(SolutionDescriptor::new(vec![EntityDescriptor::new(
            "Slot",
            entity_count,
        )
        .with_variable(Box::new(variable))]));
        let director = EasyScoreDirector::new(
            Sol {
                slots: vec![None],
                score: None,
            },
            Arc::clone(&descriptor),
            zero,
        );
        let selector = FromVariableValueSelector::new(descriptor, 0, 0, true);
        // No strength configured, so sorting is a no-op.
        assert_eq!(selector.value_indices(&director, 0), vec![0, 1, 2]);
        assert_eq!(selector.size(&director, 0), 3);
    }

    #[test]
    fn strength_sorted_selector_orders_by_increasing_strength() {
        let variable = TypedVariableDescriptor::new(
            "slot",
            vec![30_i64, 10, 20],
            |s: &Sol, i| s.slots[i],
            |s: &mut Sol, i, v| s.slots[i] = v,
        )
        .with_strength(|v| *v);
        let descriptor = Arc::new(SolutionDescriptor::new(vec![EntityDescriptor::new(
            "Slot",
            entity_count,
        )
        .with_variable(Box::new(variable))]));
        let director = EasyScoreDirector::new(
            Sol {
                slots: vec![None],
                score: None,
            },
            Arc::clone(&descriptor),
            zero,
        );

        let unsorted = FromVariableValueSelector::new(Arc::clone(&descriptor), 0, 0, false);
        assert_eq!(unsorted.value_indices(&director, 0), vec![0, 1, 2]);

        let sorted = FromVariableValueSelector::new(descriptor, 0, 0, true);
        assert_eq!(sorted.value_indices(&director, 0), vec![1, 2, 0]);
        // Second call hits the phase cache.
        assert_eq!(sorted.value_indices(&director, 0), vec![1, 2, 0]);
    }
}
