use std::cmp::Reverse;
use std::fmt::Debug;
use std::marker::PhantomData;

use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

/// Yields entity indices of one entity collection.
pub trait EntitySelector<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// Index of the entity descriptor this selector draws from.
    fn descriptor_index(&self) -> usize;

    fn iter<'a>(&'a self, score_director: &'a D) -> Box<dyn Iterator<Item = usize> + 'a>;

    fn size(&self, score_director: &D) -> usize;
}

/// Selects every entity of the collection, in solution order.
#[derive(Debug, Clone, Copy)]
pub struct FromSolutionEntitySelector {
    descriptor_index: usize,
}

impl FromSolutionEntitySelector {
    pub fn new(descriptor_index: usize) -> Self {
        Self { descriptor_index }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> EntitySelector<S, D> for FromSolutionEntitySelector {
    fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }

    fn iter<'a>(&'a self, score_director: &'a D) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(0..self.size(score_director))
    }

    fn size(&self, score_director: &D) -> usize {
        score_director
            .entity_count(self.descriptor_index)
            .unwrap_or(0)
    }
}

/// Decorates a child selector, reordering its entities by decreasing
/// difficulty weight. The sort is stable, so equally difficult entities
/// keep the child's order.
pub struct SortedEntitySelector<S, C> {
    child: C,
    difficulty_weight: fn(&S, usize) -> i64,
    _solution: PhantomData<fn(&S)>,
}

impl<S, C: Debug> Debug for SortedEntitySelector<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedEntitySelector")
            .field("child", &self.child)
            .finish()
    }
}

impl<S, C> SortedEntitySelector<S, C> {
    pub fn new(child: C, difficulty_weight: fn(&S, usize) -> i64) -> Self {
        Self {
            child,
            difficulty_weight,
            _solution: PhantomData,
        }
    }
}

impl<S, D, C> EntitySelector<S, D> for SortedEntitySelector<S, C>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    C: EntitySelector<S, D>,
{
    fn descriptor_index(&self) -> usize {
        self.child.descriptor_index()
    }

    fn iter<'a>(&'a self, score_director: &'a D) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut entities: Vec<usize> = self.child.iter(score_director).collect();
        let solution = score_director.working_solution();
        entities.sort_by_key(|&entity_index| Reverse((self.difficulty_weight)(solution, entity_index)));
        Box::new(entities.into_iter())
    }

    fn size(&self, score_director: &D) -> usize {
        self.child.size(score_director)
    }
}
