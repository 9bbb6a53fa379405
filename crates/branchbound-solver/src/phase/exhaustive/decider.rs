use std::collections::BinaryHeap;
use std::sync::Arc;

use branchbound_core::error::Result;
use branchbound_core::{EntityDescriptor, PlanningSolution, Score, SolutionDescriptor, SolverError};
use branchbound_scoring::ScoreDirector;

use crate::heuristic::r#move::{AssignMove, AssignUndo};
use crate::heuristic::selector::{EntityMimicRecorder, ExhaustiveMoveSelector};
use crate::scope::PhaseScope;
use crate::termination::Termination;

use super::bounder::ScoreBounder;
use super::comparator::{NodeComparator, OpenNode};
use super::node::NodeArena;

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The open list drained: every leaf was either visited or pruned, so
    /// the best solution is proven optimal.
    Exhausted,
    /// A termination condition fired first; the best solution is the best
    /// found so far, with no optimality claim.
    Terminated,
}

/// Node counters of one search run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStatistics {
    pub nodes_created: u64,
    pub nodes_expanded: u64,
    pub nodes_pruned: u64,
}

/// The branch-and-bound search loop.
///
/// Owns the node arena, the open list and the restoration state of the one
/// shared working solution. The working solution always reflects exactly
/// one node's partial assignment, except transiently inside an expansion
/// step while a candidate move is applied and scored.
pub struct ExhaustiveSearchDecider<S: PlanningSolution, B> {
    descriptor: Arc<SolutionDescriptor<S>>,
    descriptor_index: usize,
    /// Entity indices in expansion order: layer `d` of the tree assigns
    /// `entity_order[d]`.
    entity_order: Vec<usize>,
    mimic_recorder: EntityMimicRecorder,
    move_selector: ExhaustiveMoveSelector<S>,
    bounder: B,
    comparator: NodeComparator,
    enable_pruning: bool,
    assert_move_score_from_scratch: bool,
    assert_expected_undo_move_score: bool,
    arena: NodeArena<S::Score>,
    open: BinaryHeap<OpenNode<S::Score>>,
    /// The moves currently applied to the working solution, root-first,
    /// with the undo token each application produced.
    active_path: Vec<(usize, AssignUndo)>,
    statistics: SearchStatistics,
}

impl<S, B> ExhaustiveSearchDecider<S, B>
where
    S: PlanningSolution,
    B: ScoreBounder<S::Score>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        descriptor: Arc<SolutionDescriptor<S>>,
        descriptor_index: usize,
        entity_order: Vec<usize>,
        mimic_recorder: EntityMimicRecorder,
        move_selector: ExhaustiveMoveSelector<S>,
        bounder: B,
        comparator: NodeComparator,
        enable_pruning: bool,
        assert_move_score_from_scratch: bool,
        assert_expected_undo_move_score: bool,
    ) -> Self {
        Self {
            descriptor,
            descriptor_index,
            entity_order,
            mimic_recorder,
            move_selector,
            bounder,
            comparator,
            enable_pruning,
            assert_move_score_from_scratch,
            assert_expected_undo_move_score,
            arena: NodeArena::new(),
            open: BinaryHeap::new(),
            active_path: Vec::new(),
            statistics: SearchStatistics::default(),
        }
    }

    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            nodes_created: self.arena.len() as u64,
            ..self.statistics
        }
    }

    /// Runs the search until the open list drains or a termination fires.
    ///
    /// Leaf scores are recorded against the solver scope's best solution;
    /// the caller reads the result from there.
    pub fn solve<D, T>(
        &mut self,
        phase_scope: &mut PhaseScope<'_, S, D>,
        termination: &T,
    ) -> Result<StopReason>
    where
        D: ScoreDirector<S>,
        T: Termination<S, D> + ?Sized,
    {
        if !self.arena.is_empty() {
            return Err(SolverError::InvalidState(
                "the exhaustive search decider cannot be reused across solves".to_string(),
            ));
        }
        let descriptor = Arc::clone(&self.descriptor);
        let entity_descriptor = descriptor.entity_descriptor(self.descriptor_index);
        let total_depth = self.entity_order.len();

        let root_score = phase_scope.calculate_score();
        let root_bound = self.bounder.optimistic_bound(root_score, total_depth);
        let root = self.arena.push(None, 0, None, root_score, root_bound);
        self.open.push(self.open_entry(root));

        loop {
            // Exhaustion outranks termination: a drained open list proves
            // the best solution optimal even if a termination condition
            // became true during the final expansions.
            if self.open.is_empty() {
                tracing::debug!(
                    nodes_created = self.arena.len(),
                    nodes_pruned = self.statistics.nodes_pruned,
                    "open list exhausted"
                );
                return Ok(StopReason::Exhausted);
            }
            if termination.is_terminated(phase_scope.solver_scope()) {
                tracing::debug!(
                    nodes_expanded = self.statistics.nodes_expanded,
                    open = self.open.len(),
                    "search terminated early"
                );
                return Ok(StopReason::Terminated);
            }
            let Some(open_node) = self.open.pop() else {
                return Ok(StopReason::Exhausted);
            };
            self.statistics.nodes_expanded += 1;
            let node_index = open_node.node_index;
            let (depth, node_score) = {
                let node = self.arena.get(node_index);
                (node.depth(), node.score())
            };

            self.restore_to(node_index, phase_scope.score_director_mut(), entity_descriptor)?;

            if depth == total_depth {
                // Leaf: the assignment is complete and its score exact.
                phase_scope.solver_scope_mut().record_if_improved(node_score);
                continue;
            }

            self.expand(
                phase_scope,
                entity_descriptor,
                node_index,
                depth,
                node_score,
                total_depth,
            )?;
        }
    }

    /// Builds the open-list entry for an arena node.
    fn open_entry(&self, node_index: usize) -> OpenNode<S::Score> {
        let node = self.arena.get(node_index);
        OpenNode {
            node_index,
            depth: node.depth(),
            bound: node.optimistic_bound(),
            comparator: self.comparator,
        }
    }

    /// Expands one node: records its entity, applies every candidate move
    /// in turn (scoring and undoing each), and pushes the surviving
    /// children onto the open list.
    fn expand<D>(
        &mut self,
        phase_scope: &mut PhaseScope<'_, S, D>,
        entity_descriptor: &EntityDescriptor<S>,
        node_index: usize,
        depth: usize,
        node_score: S::Score,
        total_depth: usize,
    ) -> Result<()>
    where
        D: ScoreDirector<S>,
    {
        let entity_index = self.entity_order[depth];
        self.mimic_recorder.record(entity_index);
        let moves: Vec<AssignMove> = self
            .move_selector
            .iter_moves(phase_scope.score_director())
            .collect();
        phase_scope.increment_step_count();

        let child_depth = depth + 1;
        let remaining = total_depth - child_depth;
        for mv in moves {
            let score_director = phase_scope.score_director_mut();
            let undo = mv.apply(score_director, self.descriptor_index, entity_descriptor);
            let score = score_director.calculate_score();
            if self.assert_move_score_from_scratch {
                let from_scratch = score_director.calculate_score_from_scratch();
                if from_scratch != score {
                    return Err(SolverError::ScoreCorruption(format!(
                        "incremental score ({score}) differs from the from-scratch score \
                         ({from_scratch}) after move {mv:?}"
                    )));
                }
            }
            let bound = self.bounder.optimistic_bound(score, remaining);
            mv.undo(undo, score_director, self.descriptor_index, entity_descriptor);
            if self.assert_expected_undo_move_score {
                let restored = score_director.calculate_score();
                if restored != node_score {
                    return Err(SolverError::ScoreCorruption(format!(
                        "undoing move {mv:?} restored score {restored} but the node score \
                         is {node_score}"
                    )));
                }
            }

            if self.enable_pruning {
                if let Some(best) = phase_scope.solver_scope().best_score() {
                    // Ties are pruned: an equal bound cannot improve on the
                    // best solution already in hand.
                    if !bound.is_better_than(best) {
                        self.statistics.nodes_pruned += 1;
                        continue;
                    }
                }
            }

            let child = self
                .arena
                .push(Some(node_index), child_depth, Some(mv), score, bound);
            self.open.push(self.open_entry(child));
        }
        self.mimic_recorder.clear();
        Ok(())
    }

    /// Makes the working solution reflect `target`'s partial assignment.
    ///
    /// Undoes applied moves back to the common ancestor of the current
    /// node and the target, then replays the target's remaining moves.
    /// Depth-first exploration keeps both legs short; a jump elsewhere in
    /// the tree costs at most twice the tree depth.
    fn restore_to<D>(
        &mut self,
        target: usize,
        score_director: &mut D,
        entity_descriptor: &EntityDescriptor<S>,
    ) -> Result<()>
    where
        D: ScoreDirector<S>,
    {
        // The target's move-bearing chain, root-first.
        let mut chain: Vec<usize> = Vec::new();
        let mut cursor = Some(target);
        while let Some(index) = cursor {
            let node = self.arena.get(index);
            if node.assign_move().is_some() {
                chain.push(index);
            }
            cursor = node.parent();
        }
        chain.reverse();

        let mut common = 0;
        while common < chain.len()
            && common < self.active_path.len()
            && self.active_path[common].0 == chain[common]
        {
            common += 1;
        }

        while self.active_path.len() > common {
            let Some((node_index, undo)) = self.active_path.pop() else {
                break;
            };
            let mv = self
                .arena
                .get(node_index)
                .assign_move()
                .cloned()
                .ok_or_else(|| {
                    SolverError::Internal(format!("node {node_index} on the active path has no move"))
                })?;
            mv.undo(undo, score_director, self.descriptor_index, entity_descriptor);
        }

        for &node_index in &chain[common..] {
            let mv = self
                .arena
                .get(node_index)
                .assign_move()
                .cloned()
                .ok_or_else(|| {
                    SolverError::Internal(format!("node {node_index} on the target path has no move"))
                })?;
            let undo = mv.apply(score_director, self.descriptor_index, entity_descriptor);
            self.active_path.push((node_index, undo));
        }
        Ok(())
    }
}
