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

//! Append-only storage for search nodes.
//!
//! Every node created during a branch-and-bound run lives in one flat
//! vector and is addressed by a typed `NodeId`. Children reference their
//! parent by id, so expanding a node costs O(1) regardless of depth; the
//! full partial path behind a node exists only implicitly, as the chain of
//! parent links, and is materialized on demand.
//!
//! Nodes are never removed individually. The arena grows for the duration
//! of a run and is cleared as a whole afterwards, keeping its capacity for
//! the next solve.

use crate::{node::SearchNode, num::SolverNumeric};
use roundtrip_core::index::{TypedIndex, TypedIndexTag};
use roundtrip_model::index::VertexIndex;
use smallvec::SmallVec;

/// A tag type for arena node ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIdTag;

impl TypedIndexTag for NodeIdTag {
    const NAME: &'static str = "NodeId";
}

/// A typed index into the `NodeArena`.
pub type NodeId = TypedIndex<NodeIdTag>;

/// Append-only node storage with parent-link path materialization.
#[derive(Clone, Debug)]
pub struct NodeArena<T> {
    nodes: Vec<SearchNode<T>>,
}

impl<T> NodeArena<T>
where
    T: SolverNumeric,
{
    /// Creates an empty arena.
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates an empty arena with preallocated storage.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Stores a node and returns its id.
    #[inline]
    pub fn push(&mut self, node: SearchNode<T>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns a reference to the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<T> {
        debug_assert!(
            id.get() < self.nodes.len(),
            "called `NodeArena::get` with node id out of bounds: the len is {} but the id is {}",
            self.nodes.len(),
            id.get()
        );

        &self.nodes[id.get()]
    }

    /// Returns the number of nodes created so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether the arena holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Materializes the partial path behind `id`, from the start vertex to
    /// the node's current vertex.
    pub fn path_of(&self, id: NodeId) -> SmallVec<[VertexIndex; 32]> {
        let mut path = SmallVec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current);
            path.push(node.vertex());
            cursor = node.parent();
        }
        path.reverse();
        path
    }

    /// Clears the arena, keeping its capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.nodes.clear();
    }
}

impl<T> Default for NodeArena<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtrip_model::tour::START_VERTEX;

    fn vx(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    #[test]
    fn test_push_and_get() {
        let mut arena = NodeArena::<i64>::new();
        let id = arena.push(SearchNode::root(START_VERTEX));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(id).vertex(), START_VERTEX);
    }

    #[test]
    fn test_path_materialization_follows_parent_links() {
        let mut arena = NodeArena::<i64>::new();
        let root_id = arena.push(SearchNode::root(START_VERTEX));
        let root = *arena.get(root_id);
        let a_id = arena.push(SearchNode::child(root_id, &root, vx(2), 15));
        let a = *arena.get(a_id);
        let b_id = arena.push(SearchNode::child(a_id, &a, vx(1), 35));

        let path = arena.path_of(b_id);
        assert_eq!(path.as_slice(), &[vx(0), vx(2), vx(1)]);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut arena = NodeArena::<i64>::preallocated(16);
        arena.push(SearchNode::root(START_VERTEX));
        arena.reset();
        assert!(arena.is_empty());
        assert!(arena.nodes.capacity() >= 16);
    }
}
