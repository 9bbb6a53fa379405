//! Branch and bound exhaustive search for planning problems.
//!
//! The entry point is [`ExhaustiveSearchPhase`], which explores the full
//! assignment tree of a planning solution: one tree layer per planning
//! entity, one branch per value combination of that entity's genuine
//! variables. Subtrees whose optimistic score bound cannot beat the best
//! known solution are pruned, and when the open list drains the best
//! solution is proven optimal.

pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod termination;

pub use phase::exhaustive::{
    ExhaustiveSearchPhase, ExhaustiveSearchPhaseBuilder, ExhaustiveSearchResult, ScoreBounder,
    StopReason, TrendScoreBounder,
};
pub use phase::Phase;
pub use scope::{PhaseScope, SolverScope};
pub use termination::{
    ExternalTermination, NoTermination, OrTermination, StepCountTermination, Termination,
    TimeTermination,
};
