//! Entity and solution descriptors.

use std::fmt::Debug;

use super::variable::GenuineVariableDescriptor;
use crate::error::SolverError;

/// Describes one planning entity collection at runtime: how many entities
/// it holds, its genuine variables, and optionally how difficult an entity
/// is to place (used to sort entities before exhaustive expansion).
pub struct EntityDescriptor<S> {
    name: &'static str,
    entity_count: fn(&S) -> usize,
    variables: Vec<Box<dyn GenuineVariableDescriptor<S>>>,
    difficulty_weight: Option<fn(&S, usize) -> i64>,
}

impl<S> Debug for EntityDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("name", &self.name)
            .field("variables", &self.variables)
            .finish()
    }
}

impl<S> EntityDescriptor<S> {
    /// Creates a descriptor for an entity collection.
    ///
    /// # Arguments
    /// * `name` - Entity type name (for diagnostics)
    /// * `entity_count` - `fn(&S) -> usize` counting the collection
    pub fn new(name: &'static str, entity_count: fn(&S) -> usize) -> Self {
        Self {
            name,
            entity_count,
            variables: Vec::new(),
            difficulty_weight: None,
        }
    }

    /// Adds a genuine variable descriptor.
    pub fn with_variable(mut self, variable: Box<dyn GenuineVariableDescriptor<S>>) -> Self {
        self.variables.push(variable);
        self
    }

    /// Sets the difficulty weight used to sort entities by decreasing
    /// difficulty before expansion.
    pub fn with_difficulty_weight(mut self, weight: fn(&S, usize) -> i64) -> Self {
        self.difficulty_weight = Some(weight);
        self
    }

    /// Entity type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of entities currently in the solution.
    pub fn entity_count(&self, solution: &S) -> usize {
        (self.entity_count)(solution)
    }

    /// The genuine variables of this entity type, in declaration order.
    pub fn variables(&self) -> &[Box<dyn GenuineVariableDescriptor<S>>] {
        &self.variables
    }

    /// The genuine variable at the given index.
    pub fn variable(&self, index: usize) -> &dyn GenuineVariableDescriptor<S> {
        self.variables[index].as_ref()
    }

    /// The difficulty weight function, if configured.
    pub fn difficulty_weight(&self) -> Option<fn(&S, usize) -> i64> {
        self.difficulty_weight
    }
}

/// Describes the whole solution model: every entity collection.
pub struct SolutionDescriptor<S> {
    entity_descriptors: Vec<EntityDescriptor<S>>,
}

impl<S> Debug for SolutionDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionDescriptor")
            .field("entity_descriptors", &self.entity_descriptors)
            .finish()
    }
}

impl<S> SolutionDescriptor<S> {
    /// Creates a solution descriptor from its entity descriptors.
    pub fn new(entity_descriptors: Vec<EntityDescriptor<S>>) -> Self {
        Self { entity_descriptors }
    }

    /// The entity descriptors, in declaration order.
    pub fn entity_descriptors(&self) -> &[EntityDescriptor<S>] {
        &self.entity_descriptors
    }

    /// The entity descriptor at the given index.
    pub fn entity_descriptor(&self, index: usize) -> &EntityDescriptor<S> {
        &self.entity_descriptors[index]
    }

    /// Deduces the single entity descriptor index.
    ///
    /// Automatic deduction only works when exactly one entity collection
    /// exists; anything else must be configured explicitly.
    pub fn deduce_entity_descriptor_index(&self) -> Result<usize, SolverError> {
        if self.entity_descriptors.len() != 1 {
            let names: Vec<&str> = self.entity_descriptors.iter().map(|d| d.name).collect();
            return Err(SolverError::Config(format!(
                "No entity selector configured and the entity descriptor cannot be deduced \
                 automatically because there are {} entity collections ({:?})",
                self.entity_descriptors.len(),
                names
            )));
        }
        Ok(0)
    }
}
