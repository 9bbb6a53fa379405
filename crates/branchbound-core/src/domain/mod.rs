//! Domain traits and runtime descriptors.

mod descriptor;
mod traits;
mod variable;

pub use descriptor::{EntityDescriptor, SolutionDescriptor};
pub use traits::PlanningSolution;
pub use variable::{GenuineVariableDescriptor, TypedVariableDescriptor, ValueRange};

#[cfg(test)]
mod tests;
