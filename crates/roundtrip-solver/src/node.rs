// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Search nodes for the branch-and-bound solver.

use crate::{arena::NodeId, num::SolverNumeric, visit::VisitSet};
use roundtrip_core::num::ops::SaturatingAddVal;
use roundtrip_model::{index::VertexIndex, matrix::DistanceMatrix, tour::START_VERTEX};

/// An immutable snapshot of a partial tour.
///
/// A node records which vertices have been visited, the real cost
/// accumulated so far, a lower bound on the cost of any completion, the
/// depth (`level` = vertices visited − 1), and the vertex the partial tour
/// currently ends at. Instead of copying the whole partial path into every
/// child, a node carries a back-reference into the `NodeArena`; the full
/// path is materialized only when a node actually becomes the incumbent.
///
/// Nodes are never mutated once they enter the arena. Invariant:
/// `bound >= cost`.
#[derive(Clone, Copy, Debug)]
pub struct SearchNode<T> {
    // The layout of this struct is optimized for cache efficiency
    // assuming T = i64 (8 bytes); wide fields come first.
    cost: T,
    bound: T,
    visited: VisitSet,
    parent: Option<NodeId>,
    vertex: VertexIndex,
    level: u32,
}

impl<T> SearchNode<T>
where
    T: SolverNumeric,
{
    /// Creates the root node of a search, anchored at `start`.
    #[inline]
    pub fn root(start: VertexIndex) -> Self {
        Self {
            cost: T::zero(),
            bound: T::zero(),
            visited: VisitSet::singleton(start),
            parent: None,
            vertex: start,
            level: 0,
        }
    }

    /// Creates a child of `parent` that extends the partial tour to
    /// `vertex` over an edge of cost `edge_cost`.
    ///
    /// The child's bound is initialized to its cost; call
    /// `with_estimated_bound` before inserting it into a frontier.
    #[inline]
    pub fn child(parent_id: NodeId, parent: &SearchNode<T>, vertex: VertexIndex, edge_cost: T) -> Self {
        debug_assert!(
            !parent.visited.contains(vertex),
            "called `SearchNode::child` with an already visited vertex: {}",
            vertex.get()
        );

        let cost = parent.cost.saturating_add_val(edge_cost);
        Self {
            cost,
            bound: cost,
            visited: parent.visited.with(vertex),
            parent: Some(parent_id),
            vertex,
            level: parent.level + 1,
        }
    }

    /// Returns this node with its bound set to the estimate for the given
    /// matrix.
    #[inline]
    pub fn with_estimated_bound(mut self, matrix: &DistanceMatrix<T>) -> Self {
        self.bound = self.estimate_bound(matrix);
        self
    }

    /// Estimates a lower bound on the total cost of any tour that completes
    /// this partial tour.
    ///
    /// Starting from the accumulated cost, every vertex not yet visited
    /// contributes the cheapest edge leaving it towards another unvisited
    /// vertex or back to the start. In any completion each unvisited vertex
    /// is left exactly once, towards exactly such a target, so with
    /// non-negative edge costs the sum of these minima never exceeds the
    /// true completion cost. The result is a relaxed, vertex-local bound:
    /// it does not require the chosen edges to form a tour.
    ///
    /// Absent edges are excluded from the minimum; a vertex with no
    /// remaining candidate contributes nothing.
    pub fn estimate_bound(&self, matrix: &DistanceMatrix<T>) -> T {
        let n = matrix.num_vertices();
        let mut bound = self.cost;

        for from in 0..n {
            let from = VertexIndex::new(from);
            if self.visited.contains(from) {
                continue;
            }

            let mut cheapest: Option<T> = None;
            for to in 0..n {
                let to = VertexIndex::new(to);
                if to == from || (to != START_VERTEX && self.visited.contains(to)) {
                    continue;
                }
                // SAFETY: `from` and `to` iterate over `0..num_vertices`.
                let edge = unsafe { matrix.cost_unchecked(from, to) };
                if let Some(cost) = edge.into_option() {
                    cheapest = Some(match cheapest {
                        Some(best) if best <= cost => best,
                        _ => cost,
                    });
                }
            }

            if let Some(cost) = cheapest {
                bound = bound.saturating_add_val(cost);
            }
        }

        bound
    }

    /// Returns the real cost accumulated along the partial tour.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the lower bound on any completion of this node.
    #[inline]
    pub fn bound(&self) -> T {
        self.bound
    }

    /// Returns the set of visited vertices.
    #[inline]
    pub fn visited(&self) -> VisitSet {
        self.visited
    }

    /// Returns the arena slot of the parent node, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the vertex this partial tour currently ends at.
    #[inline]
    pub fn vertex(&self) -> VertexIndex {
        self.vertex
    }

    /// Returns the depth of this node (vertices visited − 1).
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl<T> std::fmt::Display for SearchNode<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(vertex: {}, level: {}, cost: {}, bound: {})",
            self.vertex.get(),
            self.level,
            self.cost,
            self.bound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeArena;
    use roundtrip_model::matrix::DistanceMatrix;
    use roundtrip_model::tour::START_VERTEX;

    fn vx(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    fn reference_matrix() -> DistanceMatrix<i64> {
        DistanceMatrix::from_rows(vec![
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_root_node() {
        let root = SearchNode::<i64>::root(START_VERTEX);
        assert_eq!(root.cost(), 0);
        assert_eq!(root.level(), 0);
        assert_eq!(root.vertex(), START_VERTEX);
        assert!(root.visited().contains(START_VERTEX));
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_child_accumulates_cost_and_depth() {
        let matrix = reference_matrix();
        let mut arena = NodeArena::new();
        let root_id = arena.push(SearchNode::root(START_VERTEX));
        let root = *arena.get(root_id);

        let child = SearchNode::child(root_id, &root, vx(1), 10).with_estimated_bound(&matrix);
        assert_eq!(child.cost(), 10);
        assert_eq!(child.level(), 1);
        assert_eq!(child.vertex(), vx(1));
        assert!(child.visited().contains(vx(0)));
        assert!(child.visited().contains(vx(1)));
        assert_eq!(child.parent(), Some(root_id));
    }

    #[test]
    fn test_bound_never_below_cost() {
        let matrix = reference_matrix();
        let root = SearchNode::<i64>::root(START_VERTEX).with_estimated_bound(&matrix);
        assert!(root.bound() >= root.cost());
        // Root bound: cheapest exits of 1, 2, 3 among {0, 1, 2, 3}:
        // min(10, 35, 25) + min(15, 35, 30) + min(20, 25, 30) = 45.
        assert_eq!(root.bound(), 45);
    }

    #[test]
    fn test_bound_is_admissible_for_reference_matrix() {
        // Optimal completion of the root costs 80; the estimate must not
        // exceed it.
        let matrix = reference_matrix();
        let root = SearchNode::<i64>::root(START_VERTEX).with_estimated_bound(&matrix);
        assert!(root.bound() <= 80);
    }

    #[test]
    fn test_bound_skips_absent_edges() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 5, -1],
            vec![5, 0, 7],
            vec![-1, 7, 0],
        ])
        .unwrap();

        let root = SearchNode::<i64>::root(START_VERTEX);
        // Vertex 1 exits via min(5, 7) = 5; vertex 2 only via 7, since its
        // edge back to the start is absent.
        assert_eq!(root.estimate_bound(&matrix), 12);
    }

    #[test]
    fn test_bound_with_single_unvisited_vertex() {
        let matrix = reference_matrix();
        let mut arena = NodeArena::new();
        let root_id = arena.push(SearchNode::root(START_VERTEX));
        let root = *arena.get(root_id);
        let a_id = arena.push(SearchNode::child(root_id, &root, vx(1), 10));
        let a = *arena.get(a_id);
        let b = SearchNode::child(a_id, &a, vx(2), 35);

        // Only vertex 3 is unvisited; its single candidate is the closing
        // edge back to the start, so the bound is exact here.
        assert_eq!(b.estimate_bound(&matrix), b.cost() + 20);
    }

    #[test]
    fn test_bound_contributes_nothing_without_candidates() {
        // Vertex 2 has no present edge towards 1 or back to 0.
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 5, 5],
            vec![5, 0, 5],
            vec![-1, -1, 0],
        ])
        .unwrap();

        let root = SearchNode::<i64>::root(START_VERTEX);
        // Vertex 1 contributes min(5, 5) = 5; vertex 2 contributes nothing.
        assert_eq!(root.estimate_bound(&matrix), 5);
    }
}
