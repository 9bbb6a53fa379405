use std::cmp::Ordering;

use branchbound_config::ExhaustiveSearchType;
use branchbound_core::Score;

/// Exploration order of the open list.
///
/// A single enum instead of a trait object: the comparison sits on the hot
/// path of every open-list push and pop, and an enum match inlines where a
/// vtable call would not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeComparator {
    /// Shallowest node first; FIFO among equal depths.
    BreadthFirst,
    /// Deepest node first; LIFO among equal depths, so siblings are
    /// explored in reverse creation order after a dive.
    DepthFirst,
    /// Best optimistic bound first; deeper first among equal bounds, then
    /// FIFO.
    OptimisticBoundFirst,
}

impl NodeComparator {
    pub fn from_search_type(search_type: ExhaustiveSearchType) -> Self {
        match search_type {
            ExhaustiveSearchType::BreadthFirstBranchAndBound => Self::BreadthFirst,
            ExhaustiveSearchType::DepthFirstBranchAndBound => Self::DepthFirst,
            ExhaustiveSearchType::OptimisticBoundFirstBranchAndBound => Self::OptimisticBoundFirst,
        }
    }

    /// `Greater` means `a` is explored before `b`.
    fn compare<Sc: Score>(self, a: &OpenNode<Sc>, b: &OpenNode<Sc>) -> Ordering {
        match self {
            Self::BreadthFirst => b
                .depth
                .cmp(&a.depth)
                .then_with(|| b.node_index.cmp(&a.node_index)),
            Self::DepthFirst => a
                .depth
                .cmp(&b.depth)
                .then_with(|| a.node_index.cmp(&b.node_index)),
            Self::OptimisticBoundFirst => a
                .bound
                .cmp(&b.bound)
                .then_with(|| a.depth.cmp(&b.depth))
                .then_with(|| b.node_index.cmp(&a.node_index)),
        }
    }
}

/// Open-list entry: the ordering key of an unexpanded node, plus its arena
/// index. Kept separate from [`SearchNode`] so the `BinaryHeap` only
/// shuffles small copies.
///
/// [`SearchNode`]: super::node::SearchNode
#[derive(Debug, Clone, Copy)]
pub struct OpenNode<Sc: Score> {
    pub node_index: usize,
    pub depth: usize,
    pub bound: Sc,
    pub comparator: NodeComparator,
}

impl<Sc: Score> PartialEq for OpenNode<Sc> {
    fn eq(&self, other: &Self) -> bool {
        self.node_index == other.node_index
    }
}

impl<Sc: Score> Eq for OpenNode<Sc> {}

impl<Sc: Score> PartialOrd for OpenNode<Sc> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Sc: Score> Ord for OpenNode<Sc> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparator.compare(self, other)
    }
}
