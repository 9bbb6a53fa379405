//! Moves and selectors: how the search enumerates candidate assignments.

pub mod r#move;
pub mod selector;
