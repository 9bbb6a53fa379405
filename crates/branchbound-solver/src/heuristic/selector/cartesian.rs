use smallvec::{smallvec, SmallVec};

use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

use crate::heuristic::r#move::AssignMove;

use super::{EntitySelector, FromVariableValueSelector, MimicReplayingEntitySelector};

/// Move stream for a single-variable entity: one [`AssignMove`] per legal
/// value of the replayed entity.
pub struct ChangeMoveSelector<S> {
    entity_selector: MimicReplayingEntitySelector,
    value_selector: FromVariableValueSelector<S>,
}

impl<S: PlanningSolution> ChangeMoveSelector<S> {
    pub fn new(
        entity_selector: MimicReplayingEntitySelector,
        value_selector: FromVariableValueSelector<S>,
    ) -> Self {
        Self {
            entity_selector,
            value_selector,
        }
    }

    pub fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = AssignMove> + 'a> {
        let Some(entity_index) = self.entity_selector.iter(score_director).next() else {
            return Box::new(std::iter::empty());
        };
        let value_indices = self.value_selector.value_indices(score_director, entity_index);
        Box::new(
            value_indices
                .into_iter()
                .map(move |value_index| AssignMove::new(entity_index, smallvec![value_index])),
        )
    }
}

/// Move stream for a multi-variable entity: the cartesian product of every
/// variable's value range, walked lazily in lexicographic order (the last
/// variable varies fastest).
pub struct CartesianMoveSelector<S> {
    entity_selector: MimicReplayingEntitySelector,
    value_selectors: Vec<FromVariableValueSelector<S>>,
}

impl<S: PlanningSolution> CartesianMoveSelector<S> {
    pub fn new(
        entity_selector: MimicReplayingEntitySelector,
        value_selectors: Vec<FromVariableValueSelector<S>>,
    ) -> Self {
        Self {
            entity_selector,
            value_selectors,
        }
    }

    pub fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = AssignMove> + 'a> {
        let Some(entity_index) = self.entity_selector.iter(score_director).next() else {
            return Box::new(std::iter::empty());
        };
        let value_lists: Vec<Vec<usize>> = self
            .value_selectors
            .iter()
            .map(|selector| selector.value_indices(score_director, entity_index))
            .collect();
        // An empty range anywhere makes the whole product empty.
        if value_lists.iter().any(Vec::is_empty) {
            return Box::new(std::iter::empty());
        }
        Box::new(CartesianMoveIter {
            entity_index,
            positions: Some(vec![0; value_lists.len()]),
            value_lists,
        })
    }
}

/// Odometer over the per-variable value lists.
struct CartesianMoveIter {
    entity_index: usize,
    value_lists: Vec<Vec<usize>>,
    /// Current position in each list; `None` once exhausted.
    positions: Option<Vec<usize>>,
}

impl Iterator for CartesianMoveIter {
    type Item = AssignMove;

    fn next(&mut self) -> Option<AssignMove> {
        let positions = self.positions.as_mut()?;
        let value_indices: SmallVec<[usize; 2]> = positions
            .iter()
            .zip(&self.value_lists)
            .map(|(&position, list)| list[position])
            .collect();
        let mv = AssignMove::new(self.entity_index, value_indices);

        // Advance from the last variable, carrying into earlier ones.
        let mut carried = true;
        for (position, list) in positions.iter_mut().zip(&self.value_lists).rev() {
            *position += 1;
            if *position < list.len() {
                carried = false;
                break;
            }
            *position = 0;
        }
        if carried {
            self.positions = None;
        }
        Some(mv)
    }
}

/// The move stream of an exhaustive search phase.
///
/// One entity per expansion step (replayed through the mimic recorder),
/// every value combination of that entity's genuine variables as moves.
/// Single-variable entities skip the cartesian machinery entirely.
pub enum ExhaustiveMoveSelector<S> {
    Change(ChangeMoveSelector<S>),
    Cartesian(CartesianMoveSelector<S>),
}

impl<S: PlanningSolution> ExhaustiveMoveSelector<S> {
    pub fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = AssignMove> + 'a> {
        match self {
            Self::Change(selector) => selector.iter_moves(score_director),
            Self::Cartesian(selector) => selector.iter_moves(score_director),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use branchbound_core::{
        EntityDescriptor, SimpleScore, SolutionDescriptor, TypedVariableDescriptor,
    };
    use branchbound_scoring::EasyScoreDirector;

    use crate::heuristic::selector::EntityMimicRecorder;

    use super::*;

    #[derive(Clone, Debug)]
    struct Sol {
        rooms: Vec<Option<i64>>,
        periods: Vec<Option<i64>>,
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
        s.rooms.len()
    }

    fn zero(_: &Sol) -> SimpleScore {
        SimpleScore::of(0)
    }

    fn two_variable_descriptor() -> Arc<SolutionDescriptor<Sol>> {
        let room = TypedVariableDescriptor::new(
            "room",
            vec![0_i64, 1, 2],
            |s: &Sol, i| s.rooms[i],
            |s: &mut Sol, i, v| s.rooms[i] = v,
        );
        let period = TypedVariableDescriptor::new(
            "period",
            vec![0_i64, 1, 2, 3],
            |s: &Sol, i| s.periods[i],
            |s: &mut Sol, i, v| s.periods[i] = v,
        );
        Arc::new(SolutionDescriptor::new(vec![EntityDescriptor::new(
            "Lecture",
            entity_count,
        )
        .with_variable(Box::new(room))
        .with_variable(Box::new(period))]))
    }

    fn two_variable_director(
        descriptor: &Arc<SolutionDescriptor<Sol>>,
    ) -> EasyScoreDirector<Sol, fn(&Sol) -> SimpleScore> {
        EasyScoreDirector::new(
            Sol {
                rooms: vec![None, None],
                periods: vec![None, None],
                score: None,
            },
            Arc::clone(descriptor),
            zero,
        )
    }

    #[test]
    fn cartesian_product_covers_every_combination_once() {
        let descriptor = two_variable_descriptor();
        let director = two_variable_director(&descriptor);
        let recorder = EntityMimicRecorder::new("Lecture");
        let selector = CartesianMoveSelector::new(
            MimicReplayingEntitySelector::new(recorder.clone(), 0),
            vec![
                FromVariableValueSelector::new(Arc::clone(&descriptor), 0, 0, false),
                FromVariableValueSelector::new(Arc::clone(&descriptor), 0, 1, false),
            ],
        );

        recorder.record(1);
        let moves: Vec<AssignMove> = selector.iter_moves(&director).collect();
        // 3 rooms x 4 periods.
        assert_eq!(moves.len(), 12);
        for mv in &moves {
            assert_eq!(mv.entity_index(), 1);
            assert_eq!(mv.value_indices().len(), 2);
        }
        let mut tuples: Vec<Vec<usize>> = moves.iter().map(|m| m.value_indices().to_vec()).collect();
        tuples.dedup();
        assert_eq!(tuples.len(), 12);
        // Lexicographic: the second variable varies fastest.
        assert_eq!(moves[0].value_indices(), &[0, 0]);
        assert_eq!(moves[1].value_indices(), &[0, 1]);
        assert_eq!(moves[4].value_indices(), &[1, 0]);
        assert_eq!(moves[11].value_indices(), &[2, 3]);
    }

    #[test]
    fn no_recorded_entity_means_no_moves() {
        let descriptor = two_variable_descriptor();
        let director = two_variable_director(&descriptor);
        let recorder = EntityMimicRecorder::new("Lecture");
        let selector = CartesianMoveSelector::new(
            MimicReplayingEntitySelector::new(recorder, 0),
            vec![FromVariableValueSelector::new(descriptor, 0, 0, false)],
        );
        assert_eq!(selector.iter_moves(&director).count(), 0);
    }

    #[test]
    fn change_selector_yields_one_move_per_value() {
        let descriptor = two_variable_descriptor();
        let director = two_variable_director(&descriptor);
        let recorder = EntityMimicRecorder::new("Lecture");
        let selector = ChangeMoveSelector::new(
            MimicReplayingEntitySelector::new(recorder.clone(), 0),
            FromVariableValueSelector::new(descriptor, 0, 0, false),
        );

        recorder.record(0);
        let moves: Vec<AssignMove> = selector.iter_moves(&director).collect();
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[2].value_indices(), &[2]);
    }
}
