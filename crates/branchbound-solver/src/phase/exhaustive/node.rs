use branchbound_core::Score;

use crate::heuristic::r#move::AssignMove;

/// One node of the search tree: the assignment of the first `depth`
/// entities in the phase's entity order.
///
/// A node stores the move that produced it from its parent, not a solution
/// snapshot; the decider reconstructs any node's partial assignment by
/// replaying moves along the tree path.
#[derive(Debug)]
pub struct SearchNode<Sc: Score> {
    parent: Option<usize>,
    depth: usize,
    /// The move that created this node from its parent. `None` only for
    /// the root.
    assign_move: Option<AssignMove>,
    score: Sc,
    optimistic_bound: Sc,
}

impl<Sc: Score> SearchNode<Sc> {
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn assign_move(&self) -> Option<&AssignMove> {
        self.assign_move.as_ref()
    }

    /// Score of the partial assignment this node represents.
    pub fn score(&self) -> Sc {
        self.score
    }

    /// Admissible upper bound on the score of any descendant leaf.
    pub fn optimistic_bound(&self) -> Sc {
        self.optimistic_bound
    }
}

/// Flat arena holding every node created during one phase.
///
/// Nodes never move and are never freed individually; parents are plain
/// indices. The whole arena is dropped when the phase ends.
#[derive(Debug, Default)]
pub struct NodeArena<Sc: Score> {
    nodes: Vec<SearchNode<Sc>>,
}

impl<Sc: Score> NodeArena<Sc> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node and returns its index. Indices double as creation
    /// order, which the open list uses to break ties deterministically.
    pub fn push(
        &mut self,
        parent: Option<usize>,
        depth: usize,
        assign_move: Option<AssignMove>,
        score: Sc,
        optimistic_bound: Sc,
    ) -> usize {
        let index = self.nodes.len();
        self.nodes.push(SearchNode {
            parent,
            depth,
            assign_move,
            score,
            optimistic_bound,
        });
        index
    }

    pub fn get(&self, index: usize) -> &SearchNode<Sc> {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use branchbound_core::SimpleScore;

    use super::*;

    #[test]
    fn arena_assigns_indices_in_creation_order() {
        let mut arena: NodeArena<SimpleScore> = NodeArena::new();
        let root = arena.push(None, 0, None, SimpleScore::of(0), SimpleScore::of(0));
        let child = arena.push(
            Some(root),
            1,
            Some(AssignMove::new(0, smallvec![2])),
            SimpleScore::of(-1),
            SimpleScore::of(0),
        );
        assert_eq!(root, 0);
        assert_eq!(child, 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(child).parent(), Some(root));
        assert_eq!(arena.get(child).depth(), 1);
        assert_eq!(arena.get(child).optimistic_bound(), SimpleScore::of(0));
        assert!(arena.get(root).assign_move().is_none());
    }
}
