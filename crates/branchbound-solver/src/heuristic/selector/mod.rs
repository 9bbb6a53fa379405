//! Entity, value and move selectors.
//!
//! Selectors are composed per phase: a mimic recorder bridges the entity
//! chosen by the search layer to the value selectors feeding the move
//! stream, so every selector in one expansion step agrees on the entity.

mod cartesian;
mod entity;
mod mimic;
mod value;

pub use cartesian::{CartesianMoveSelector, ChangeMoveSelector, ExhaustiveMoveSelector};
pub use entity::{EntitySelector, FromSolutionEntitySelector, SortedEntitySelector};
pub use mimic::{EntityMimicRecorder, MimicReplayingEntitySelector};
pub use value::FromVariableValueSelector;
