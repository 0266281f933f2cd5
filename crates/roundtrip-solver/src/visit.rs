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

use roundtrip_model::index::VertexIndex;

/// A compact set of visited vertices, backed by a single `u64`.
///
/// Both exponential solvers key their state on "which vertices have been
/// visited so far": the dynamic programming solver addresses its tables by
/// this set, and every branch-and-bound node carries one for O(1)
/// membership tests. A machine word covers both, and `index()` exposes the
/// raw bit pattern for dense table addressing.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisitSet {
    bits: u64,
}

impl VisitSet {
    /// The widest instance this set can represent.
    pub const MAX_VERTICES: usize = u64::BITS as usize;

    /// Creates an empty set.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Creates a set containing exactly the given vertex.
    #[inline(always)]
    pub fn singleton(vertex: VertexIndex) -> Self {
        debug_assert!(
            vertex.get() < Self::MAX_VERTICES,
            "called `VisitSet::singleton` with vertex index out of range: the width is {} but the index is {}",
            Self::MAX_VERTICES,
            vertex.get()
        );

        Self {
            bits: 1u64 << vertex.get(),
        }
    }

    /// Creates the set containing all of `0..num_vertices`.
    #[inline(always)]
    pub fn full(num_vertices: usize) -> Self {
        debug_assert!(
            num_vertices <= Self::MAX_VERTICES,
            "called `VisitSet::full` with too many vertices: the width is {} but {} were requested",
            Self::MAX_VERTICES,
            num_vertices
        );

        if num_vertices == Self::MAX_VERTICES {
            Self { bits: u64::MAX }
        } else {
            Self {
                bits: (1u64 << num_vertices) - 1,
            }
        }
    }

    /// Returns a copy of this set with the given vertex added.
    #[inline(always)]
    pub fn with(self, vertex: VertexIndex) -> Self {
        debug_assert!(
            vertex.get() < Self::MAX_VERTICES,
            "called `VisitSet::with` with vertex index out of range: the width is {} but the index is {}",
            Self::MAX_VERTICES,
            vertex.get()
        );

        Self {
            bits: self.bits | (1u64 << vertex.get()),
        }
    }

    /// Checks whether the given vertex is in the set.
    #[inline(always)]
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        debug_assert!(
            vertex.get() < Self::MAX_VERTICES,
            "called `VisitSet::contains` with vertex index out of range: the width is {} but the index is {}",
            Self::MAX_VERTICES,
            vertex.get()
        );

        self.bits & (1u64 << vertex.get()) != 0
    }

    /// Returns the number of vertices in the set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Checks whether the set is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Checks whether the set contains all of `0..num_vertices`.
    #[inline(always)]
    pub fn is_full(&self, num_vertices: usize) -> bool {
        self.bits == Self::full(num_vertices).bits
    }

    /// Returns the raw bit pattern, suitable for dense table addressing.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.bits as usize
    }
}

impl std::fmt::Debug for VisitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VisitSet({:#b})", self.bits)
    }
}

impl std::fmt::Display for VisitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VisitSet(len: {})", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vx(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    #[test]
    fn test_singleton_and_with() {
        let set = VisitSet::singleton(vx(0)).with(vx(3));
        assert!(set.contains(vx(0)));
        assert!(set.contains(vx(3)));
        assert!(!set.contains(vx(1)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_with_is_persistent() {
        let base = VisitSet::singleton(vx(0));
        let extended = base.with(vx(1));
        assert!(!base.contains(vx(1)));
        assert!(extended.contains(vx(1)));
    }

    #[test]
    fn test_full_and_is_full() {
        let set = VisitSet::full(4);
        assert_eq!(set.len(), 4);
        assert!(set.is_full(4));
        assert!(!VisitSet::singleton(vx(0)).is_full(4));
        assert_eq!(VisitSet::full(VisitSet::MAX_VERTICES).len(), 64);
    }

    #[test]
    fn test_index_matches_bit_pattern() {
        let set = VisitSet::singleton(vx(0)).with(vx(2));
        assert_eq!(set.index(), 0b101);
    }

    #[test]
    fn test_empty() {
        assert!(VisitSet::empty().is_empty());
        assert!(!VisitSet::singleton(vx(1)).is_empty());
    }
}
