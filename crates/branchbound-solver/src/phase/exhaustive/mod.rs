//! Exhaustive search phase: branch and bound over the full assignment tree.
//!
//! The tree has one layer per planning entity. A node at depth `d` fixes
//! the first `d` entities of the phase's entity order; expanding it tries
//! every value combination of entity `d`'s genuine variables. Children
//! whose optimistic bound cannot beat the best known solution are pruned
//! at insertion. When the open list drains, the best solution is optimal.

mod bounder;
mod comparator;
mod decider;
mod node;

pub use bounder::{ScoreBounder, TrendScoreBounder};
pub use comparator::NodeComparator;
pub use decider::{ExhaustiveSearchDecider, SearchStatistics, StopReason};
pub use node::{NodeArena, SearchNode};

use std::sync::Arc;

use branchbound_config::{EnvironmentMode, ExhaustiveSearchPhaseConfig};
use branchbound_core::error::Result;
use branchbound_core::{InitializingScoreTrend, PlanningSolution, Score, SolutionDescriptor, SolverError};
use branchbound_scoring::ScoreDirector;

use crate::heuristic::selector::{
    CartesianMoveSelector, ChangeMoveSelector, EntityMimicRecorder, EntitySelector,
    ExhaustiveMoveSelector, FromSolutionEntitySelector, FromVariableValueSelector,
    MimicReplayingEntitySelector, SortedEntitySelector,
};
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};
use crate::termination::{NoTermination, Termination};

/// Outcome of a completed [`ExhaustiveSearchPhase::run`].
#[derive(Debug)]
pub struct ExhaustiveSearchResult<S: PlanningSolution> {
    /// The best solution found. When no improvement over the starting
    /// solution was found, this is the starting solution itself.
    pub solution: S,
    /// Score of [`solution`](Self::solution), if any leaf was reached.
    pub score: Option<S::Score>,
    /// True when the open list drained, which proves `solution` optimal.
    /// False when a termination condition cut the search short.
    pub proven_optimal: bool,
    pub statistics: SearchStatistics,
}

/// A configured exhaustive search phase, built by
/// [`ExhaustiveSearchPhaseBuilder`].
pub struct ExhaustiveSearchPhase<S: PlanningSolution, T = NoTermination> {
    descriptor: Arc<SolutionDescriptor<S>>,
    descriptor_index: usize,
    comparator: NodeComparator,
    sort_entities_by_decreasing_difficulty: bool,
    sort_values_by_increasing_strength: bool,
    enable_pruning: bool,
    assert_move_score_from_scratch: bool,
    assert_expected_undo_move_score: bool,
    trend: InitializingScoreTrend,
    perfect_maximum: Option<S::Score>,
    termination: T,
}

impl<S: PlanningSolution, T: std::fmt::Debug> std::fmt::Debug for ExhaustiveSearchPhase<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExhaustiveSearchPhase")
            .field("descriptor", &self.descriptor)
            .field("descriptor_index", &self.descriptor_index)
            .field("comparator", &self.comparator)
            .field(
                "sort_entities_by_decreasing_difficulty",
                &self.sort_entities_by_decreasing_difficulty,
            )
            .field(
                "sort_values_by_increasing_strength",
                &self.sort_values_by_increasing_strength,
            )
            .field("enable_pruning", &self.enable_pruning)
            .field(
                "assert_move_score_from_scratch",
                &self.assert_move_score_from_scratch,
            )
            .field(
                "assert_expected_undo_move_score",
                &self.assert_expected_undo_move_score,
            )
            .field("trend", &self.trend)
            .field("perfect_maximum", &self.perfect_maximum)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<S: PlanningSolution> ExhaustiveSearchPhase<S, NoTermination> {
    pub fn builder(
        descriptor: Arc<SolutionDescriptor<S>>,
    ) -> ExhaustiveSearchPhaseBuilder<S, NoTermination> {
        ExhaustiveSearchPhaseBuilder {
            descriptor,
            entity_descriptor_index: None,
            config: ExhaustiveSearchPhaseConfig::default(),
            environment_mode: EnvironmentMode::default(),
            trend: None,
            perfect_maximum: None,
            termination: NoTermination,
        }
    }
}

struct PhaseOutcome {
    stop_reason: StopReason,
    statistics: SearchStatistics,
}

impl<S: PlanningSolution, T> ExhaustiveSearchPhase<S, T> {
    /// Runs the search against a fresh solver scope and returns the best
    /// solution together with the optimality verdict.
    pub fn run<D>(&mut self, score_director: D) -> Result<ExhaustiveSearchResult<S>>
    where
        D: ScoreDirector<S>,
        T: Termination<S, D>,
    {
        let mut solver_scope = SolverScope::new(score_director);
        solver_scope.start_solving();
        let outcome = self.solve_scope(&mut solver_scope)?;
        let proven_optimal = outcome.stop_reason == StopReason::Exhausted;
        let score = solver_scope.best_score().copied();
        let solution = match solver_scope.take_best_solution() {
            Some(best) => best,
            None => solver_scope.working_solution().clone(),
        };
        Ok(ExhaustiveSearchResult {
            solution,
            score,
            proven_optimal,
            statistics: outcome.statistics,
        })
    }

    fn solve_scope<D>(&self, solver_scope: &mut SolverScope<S, D>) -> Result<PhaseOutcome>
    where
        D: ScoreDirector<S>,
        T: Termination<S, D>,
    {
        let mut phase_scope = PhaseScope::new(solver_scope, 0);
        let descriptor = Arc::clone(&self.descriptor);
        let entity_descriptor = descriptor.entity_descriptor(self.descriptor_index);

        // Entity order is fixed for the whole phase.
        let base_selector = FromSolutionEntitySelector::new(self.descriptor_index);
        let difficulty_weight = entity_descriptor
            .difficulty_weight()
            .filter(|_| self.sort_entities_by_decreasing_difficulty);
        let entity_order: Vec<usize> = match difficulty_weight {
            Some(weight) => SortedEntitySelector::new(base_selector, weight)
                .iter(phase_scope.score_director())
                .collect(),
            None => base_selector.iter(phase_scope.score_director()).collect(),
        };

        let mimic_recorder = EntityMimicRecorder::new(entity_descriptor.name());
        let replaying =
            MimicReplayingEntitySelector::new(mimic_recorder.clone(), self.descriptor_index);
        let variable_count = entity_descriptor.variables().len();
        let value_selector = |variable_index: usize| {
            FromVariableValueSelector::new(
                Arc::clone(&self.descriptor),
                self.descriptor_index,
                variable_index,
                self.sort_values_by_increasing_strength,
            )
        };
        let move_selector = if variable_count == 1 {
            ExhaustiveMoveSelector::Change(ChangeMoveSelector::new(replaying, value_selector(0)))
        } else {
            ExhaustiveMoveSelector::Cartesian(CartesianMoveSelector::new(
                replaying,
                (0..variable_count).map(value_selector).collect(),
            ))
        };

        let mut search_bounder = TrendScoreBounder::new(self.trend.clone());
        if let Some(maximum) = self.perfect_maximum {
            search_bounder = search_bounder.with_perfect_maximum(maximum);
        }

        let mut decider = ExhaustiveSearchDecider::new(
            Arc::clone(&self.descriptor),
            self.descriptor_index,
            entity_order,
            mimic_recorder,
            move_selector,
            search_bounder,
            self.comparator,
            self.enable_pruning,
            self.assert_move_score_from_scratch,
            self.assert_expected_undo_move_score,
        );
        tracing::debug!(
            entity = entity_descriptor.name(),
            comparator = ?self.comparator,
            pruning = self.enable_pruning,
            "exhaustive search phase started"
        );
        let stop_reason = decider.solve(&mut phase_scope, &self.termination)?;
        let statistics = decider.statistics();
        tracing::debug!(
            ?stop_reason,
            nodes_created = statistics.nodes_created,
            nodes_expanded = statistics.nodes_expanded,
            nodes_pruned = statistics.nodes_pruned,
            steps = phase_scope.step_count(),
            "exhaustive search phase ended"
        );
        Ok(PhaseOutcome {
            stop_reason,
            statistics,
        })
    }
}

impl<S, D, T> Phase<S, D> for ExhaustiveSearchPhase<S, T>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    T: Termination<S, D>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        self.solve_scope(solver_scope).map(|_| ())
    }

    fn phase_type_name(&self) -> &'static str {
        "Exhaustive Search"
    }
}

/// Builder for [`ExhaustiveSearchPhase`].
///
/// Validates the configuration at [`build`](Self::build) time: selector
/// cache scope, score trend level count, and entity descriptor deduction
/// all fail fast with a configuration error instead of mid-search.
pub struct ExhaustiveSearchPhaseBuilder<S: PlanningSolution, T> {
    descriptor: Arc<SolutionDescriptor<S>>,
    entity_descriptor_index: Option<usize>,
    config: ExhaustiveSearchPhaseConfig,
    environment_mode: EnvironmentMode,
    trend: Option<InitializingScoreTrend>,
    perfect_maximum: Option<S::Score>,
    termination: T,
}

impl<S: PlanningSolution, T> ExhaustiveSearchPhaseBuilder<S, T> {
    pub fn config(mut self, config: &ExhaustiveSearchPhaseConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    /// Picks the entity collection explicitly. Without this, the entity
    /// descriptor is deduced, which only works for single-entity models.
    pub fn entity_descriptor_index(mut self, index: usize) -> Self {
        self.entity_descriptor_index = Some(index);
        self
    }

    /// Sets the initializing score trend the bounder works from. Defaults
    /// to `Any` on every level, which disables effective pruning.
    pub fn score_trend(mut self, trend: InitializingScoreTrend) -> Self {
        self.trend = Some(trend);
        self
    }

    /// Sets the perfect maximum score, tightening bounds on levels the
    /// trend cannot bound.
    pub fn perfect_maximum_score(mut self, score: S::Score) -> Self {
        self.perfect_maximum = Some(score);
        self
    }

    pub fn termination<T2>(self, termination: T2) -> ExhaustiveSearchPhaseBuilder<S, T2> {
        ExhaustiveSearchPhaseBuilder {
            descriptor: self.descriptor,
            entity_descriptor_index: self.entity_descriptor_index,
            config: self.config,
            environment_mode: self.environment_mode,
            trend: self.trend,
            perfect_maximum: self.perfect_maximum,
            termination,
        }
    }

    pub fn build(self) -> Result<ExhaustiveSearchPhase<S, T>> {
        self.config
            .validate()
            .map_err(|e| SolverError::Config(e.to_string()))?;
        let descriptor_index = match self.entity_descriptor_index {
            Some(index) => {
                if index >= self.descriptor.entity_descriptors().len() {
                    return Err(SolverError::Config(format!(
                        "entity descriptor index {index} is out of range ({} collections)",
                        self.descriptor.entity_descriptors().len()
                    )));
                }
                index
            }
            None => self.descriptor.deduce_entity_descriptor_index()?,
        };
        let entity_descriptor = self.descriptor.entity_descriptor(descriptor_index);
        if entity_descriptor.variables().is_empty() {
            return Err(SolverError::Config(format!(
                "entity collection {:?} has no genuine variables to assign",
                entity_descriptor.name()
            )));
        }

        let trend = match self.trend {
            Some(trend) => {
                trend.check_levels(S::Score::levels_count())?;
                trend
            }
            None => InitializingScoreTrend::any(S::Score::levels_count()),
        };

        let search_type = self.config.resolved_search_type();
        let sort_entities = self
            .config
            .entity_selector
            .as_ref()
            .and_then(|selector| selector.sort_by_decreasing_difficulty)
            .unwrap_or_else(|| search_type.sort_entities_by_decreasing_difficulty());
        let sort_values = self
            .config
            .sort_values_by_increasing_strength
            .unwrap_or_else(|| search_type.sort_values_by_increasing_strength());

        Ok(ExhaustiveSearchPhase {
            descriptor: self.descriptor,
            descriptor_index,
            comparator: NodeComparator::from_search_type(search_type),
            sort_entities_by_decreasing_difficulty: sort_entities,
            sort_values_by_increasing_strength: sort_values,
            enable_pruning: self.config.enable_pruning.unwrap_or(true),
            assert_move_score_from_scratch: self.environment_mode.is_non_intrusive_full_asserted(),
            assert_expected_undo_move_score: self.environment_mode.is_intrusive_fast_asserted(),
            trend,
            perfect_maximum: self.perfect_maximum,
            termination: self.termination,
        })
    }
}
