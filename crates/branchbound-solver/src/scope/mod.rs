//! Solver and phase scopes: the mutable bookkeeping that travels through a solve.

mod phase;
mod solver;

pub use phase::PhaseScope;
pub use solver::SolverScope;
