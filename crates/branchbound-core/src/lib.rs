//! branchbound-core - Core types and traits for branch-and-bound solving
//!
//! This crate provides the fundamental abstractions for branchbound:
//! - Score types for representing solution quality
//! - Score trends for bounding partially initialized solutions
//! - Domain traits and runtime descriptors for defining planning problems

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    EntityDescriptor, GenuineVariableDescriptor, PlanningSolution, SolutionDescriptor,
    TypedVariableDescriptor, ValueRange,
};
pub use error::SolverError;
pub use score::{HardSoftScore, InitializingScoreTrend, Score, ScoreTrendLevel, SimpleScore};
