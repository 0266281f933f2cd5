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

use crate::index::VertexIndex;
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};

/// The fixed start (and implicit end) vertex of every tour.
pub const START_VERTEX: VertexIndex = VertexIndex::new(0);

/// A Hamiltonian cycle through all vertices of a distance matrix.
///
/// The sequence holds each vertex exactly once, starts at `START_VERTEX`,
/// and is implicitly closed by the edge from the last vertex back to the
/// start. The stored total cost includes that closing edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour<T> {
    /// The total cycle cost, including the closing edge.
    total_cost: T,

    /// The visiting order. `sequence[0]` is always `START_VERTEX`.
    sequence: Vec<VertexIndex>,
}

impl<T> Tour<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Constructs a new `Tour`.
    ///
    /// # Panics
    ///
    /// Panics if `sequence` is not a permutation of `0..sequence.len()`
    /// starting at `START_VERTEX`. Violations indicate a solver bug, not a
    /// user error, hence the hard assertion.
    pub fn new(total_cost: T, sequence: Vec<VertexIndex>) -> Self {
        assert!(
            !sequence.is_empty() && sequence[0] == START_VERTEX,
            "called `Tour::new` with a sequence that does not start at the start vertex"
        );

        let mut seen = FixedBitSet::with_capacity(sequence.len());
        for vertex in &sequence {
            assert!(
                vertex.get() < sequence.len(),
                "called `Tour::new` with vertex index out of bounds: the len is {} but the index is {}",
                sequence.len(),
                vertex.get()
            );
            assert!(
                !seen.contains(vertex.get()),
                "called `Tour::new` with duplicate vertex {}",
                vertex.get()
            );
            seen.insert(vertex.get());
        }

        Self {
            total_cost,
            sequence,
        }
    }

    /// Returns the total cycle cost, including the closing edge.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns the visiting order, starting at `START_VERTEX`.
    /// The closing hop back to the start is implicit.
    #[inline]
    pub fn sequence(&self) -> &[VertexIndex] {
        &self.sequence
    }

    /// Returns the number of vertices visited by this tour.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.sequence.len()
    }
}

impl<T> std::fmt::Display for Tour<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    /// Renders the visiting order with the start vertex repeated at the
    /// end, e.g. `0 2 3 1 0`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for vertex in &self.sequence {
            write!(f, "{} ", vertex.get())?;
        }
        write!(f, "{}", START_VERTEX.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vx(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    #[test]
    fn test_new_and_accessors() {
        let tour = Tour::new(80i64, vec![vx(0), vx(1), vx(3), vx(2)]);
        assert_eq!(tour.total_cost(), 80);
        assert_eq!(tour.num_vertices(), 4);
        assert_eq!(tour.sequence(), &[vx(0), vx(1), vx(3), vx(2)]);
    }

    #[test]
    fn test_display_closes_the_cycle() {
        let tour = Tour::new(80i64, vec![vx(0), vx(2), vx(3), vx(1)]);
        assert_eq!(format!("{}", tour), "0 2 3 1 0");
    }

    #[test]
    #[should_panic(expected = "does not start at the start vertex")]
    fn test_new_rejects_wrong_start() {
        let _ = Tour::new(10i64, vec![vx(1), vx(0)]);
    }

    #[test]
    #[should_panic(expected = "duplicate vertex")]
    fn test_new_rejects_duplicates() {
        let _ = Tour::new(10i64, vec![vx(0), vx(1), vx(1)]);
    }

    #[test]
    #[should_panic(expected = "vertex index out of bounds")]
    fn test_new_rejects_gaps() {
        // Index 3 cannot appear in a 3-vertex sequence.
        let _ = Tour::new(10i64, vec![vx(0), vx(1), vx(3)]);
    }
}
