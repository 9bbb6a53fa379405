//! Genuine variable descriptors.
//!
//! A genuine variable is a decision variable the search assigns. The
//! descriptor identifies the variable on an entity collection and knows its
//! value range. Values are addressed by index into the range so that
//! heterogeneous variable types can sit behind one object-safe trait.

use std::fmt::Debug;

/// The value range of a genuine variable.
///
/// Either one shared range for every entity, or a range computed per
/// entity instance. The distinction matters for selector caching: shared
/// ranges can be ordered once per phase, per-entity ranges must be
/// re-derived per step.
pub enum ValueRange<S, V> {
    /// The same legal values for every entity.
    Shared(Vec<V>),
    /// Legal values computed from the solution for one entity.
    PerEntity(fn(&S, usize) -> Vec<V>),
}

impl<S, V: Debug> Debug for ValueRange<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueRange::Shared(values) => f.debug_tuple("Shared").field(values).finish(),
            ValueRange::PerEntity(_) => f.debug_tuple("PerEntity").finish(),
        }
    }
}

/// Describes one genuine variable on an entity collection.
///
/// Object-safe so that an entity's variables can have different value
/// types. Values are identified by their index in the variable's value
/// range; `assign(.., None)` unassigns the variable.
pub trait GenuineVariableDescriptor<S>: Send + Sync + Debug {
    /// Name of the variable (field name).
    fn name(&self) -> &'static str;

    /// Returns true if the value range does not depend on the entity
    /// instance.
    fn is_entity_independent_range(&self) -> bool;

    /// Number of legal values for the given entity.
    fn value_count(&self, solution: &S, entity_index: usize) -> usize;

    /// The value range index currently assigned to the entity, if any.
    fn assigned_index(&self, solution: &S, entity_index: usize) -> Option<usize>;

    /// Assigns the value at `value_index` to the entity, or unassigns
    /// when `None`.
    fn assign(&self, solution: &mut S, entity_index: usize, value_index: Option<usize>);

    /// Returns true if values carry a strength used for sorted selection.
    fn has_strength(&self) -> bool;

    /// Value range indices ordered by increasing strength.
    ///
    /// Identity order when no strength is configured.
    fn strength_order(&self, solution: &S, entity_index: usize) -> Vec<usize>;
}

/// Typed implementation of [`GenuineVariableDescriptor`].
///
/// Stores typed function pointers that operate directly on the solution.
/// No `Arc<dyn>`, no `Box<dyn Any>`, no downcasts.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `V` - The variable value type
pub struct TypedVariableDescriptor<S, V> {
    name: &'static str,
    range: ValueRange<S, V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    strength: Option<fn(&V) -> i64>,
}

impl<S, V: Debug> Debug for TypedVariableDescriptor<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedVariableDescriptor")
            .field("name", &self.name)
            .field("range", &self.range)
            .field("has_strength", &self.strength.is_some())
            .finish()
    }
}

impl<S, V: Clone> TypedVariableDescriptor<S, V> {
    /// Creates a descriptor with a shared (entity-independent) value range.
    ///
    /// # Arguments
    /// * `name` - Name of the variable (field name)
    /// * `values` - The shared value range
    /// * `getter` - `fn(&S, entity_index) -> Option<V>`
    /// * `setter` - `fn(&mut S, entity_index, Option<V>)`
    pub fn new(
        name: &'static str,
        values: Vec<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
    ) -> Self {
        Self {
            name,
            range: ValueRange::Shared(values),
            getter,
            setter,
            strength: None,
        }
    }

    /// Creates a descriptor whose value range is computed per entity.
    pub fn per_entity(
        name: &'static str,
        range: fn(&S, usize) -> Vec<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
    ) -> Self {
        Self {
            name,
            range: ValueRange::PerEntity(range),
            getter,
            setter,
            strength: None,
        }
    }

    /// Sets the strength key used for increasing-strength value ordering.
    pub fn with_strength(mut self, strength: fn(&V) -> i64) -> Self {
        self.strength = Some(strength);
        self
    }

    fn resolve_range(&self, solution: &S, entity_index: usize) -> Vec<V> {
        match &self.range {
            ValueRange::Shared(values) => values.clone(),
            ValueRange::PerEntity(f) => f(solution, entity_index),
        }
    }
}

impl<S, V> GenuineVariableDescriptor<S> for TypedVariableDescriptor<S, V>
where
    S: Send + Sync,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_entity_independent_range(&self) -> bool {
        matches!(self.range, ValueRange::Shared(_))
    }

    fn value_count(&self, solution: &S, entity_index: usize) -> usize {
        match &self.range {
            ValueRange::Shared(values) => values.len(),
            ValueRange::PerEntity(f) => f(solution, entity_index).len(),
        }
    }

    fn assigned_index(&self, solution: &S, entity_index: usize) -> Option<usize> {
        let current = (self.getter)(solution, entity_index)?;
        match &self.range {
            ValueRange::Shared(values) => values.iter().position(|v| *v == current),
            ValueRange::PerEntity(f) => f(solution, entity_index)
                .iter()
                .position(|v| *v == current),
        }
    }

    fn assign(&self, solution: &mut S, entity_index: usize, value_index: Option<usize>) {
        let value = value_index.map(|i| {
            let range = self.resolve_range(solution, entity_index);
            range[i].clone()
        });
        (self.setter)(solution, entity_index, value);
    }

    fn has_strength(&self) -> bool {
        self.strength.is_some()
    }

    fn strength_order(&self, solution: &S, entity_index: usize) -> Vec<usize> {
        let range = self.resolve_range(solution, entity_index);
        let mut indices: Vec<usize> = (0..range.len()).collect();
        if let Some(strength) = self.strength {
            // Stable sort keeps the range order among equal strengths.
            indices.sort_by_key(|&i| strength(&range[i]));
        }
        indices
    }
}
