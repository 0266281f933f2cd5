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

//! Bitmask dynamic programming (Held-Karp).
//!
//! States are (visited-set, current-vertex) pairs; the value of a state is
//! the minimal cost of completing the tour from there back to the start.
//! The recursion is memoized into a dense table addressed by the raw bit
//! pattern of the visited set, and a parallel table records which successor
//! achieved each minimum so the optimal ordering can be reconstructed
//! without re-solving.
//!
//! Both tables hold Θ(n·2ⁿ) entries, which is why `solve` validates the
//! vertex count *before* allocating anything. The recursion depth equals
//! the number of unvisited vertices and is therefore bounded by the same
//! ceiling.

use crate::{
    error::SolveError,
    num::SolverNumeric,
    result::{SolveResult, TerminationReason},
    stats::HeldKarpStatistics,
    visit::VisitSet,
};
use roundtrip_core::num::{constants::MinusOne, ops::SaturatingAddVal};
use roundtrip_model::{
    index::VertexIndex,
    matrix::DistanceMatrix,
    tour::{START_VERTEX, Tour},
};

/// The default ceiling on the instance size.
///
/// At 22 vertices the two tables already hold roughly 92 million entries
/// each; beyond that, memory is exhausted long before patience is.
pub const DEFAULT_MAX_VERTICES: usize = 22;

/// The hard ceiling `with_max_vertices` clamps to. Above this the table
/// index space itself stops being addressable on realistic machines.
const MAX_SUPPORTED_VERTICES: usize = 30;

/// A memo-table cell that distinguishes "not yet computed" from any valid
/// completion cost.
///
/// Valid completion costs are non-negative (the matrix only stores
/// non-negative edge costs), so the table borrows the sentinel-encoding
/// trick of `EdgeCost`: a negative raw value means the state has not been
/// solved yet. The absence marker of this table is private to it and
/// cannot collide with the "no edge" state of the matrix.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
struct CostCell<T>(T);

impl<T> CostCell<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn unset() -> Self {
        CostCell(T::MINUS_ONE)
    }

    #[inline(always)]
    fn computed(value: T) -> Self {
        debug_assert!(
            value >= T::zero(),
            "called `CostCell::computed` with a negative completion cost: {}",
            value
        );
        CostCell(value)
    }

    #[inline(always)]
    fn get(&self) -> Option<T> {
        if self.0 < T::zero() { None } else { Some(self.0) }
    }
}

/// A successor-table cell: the next vertex on the optimal completion, or
/// none for states that were never expanded (the all-visited base case).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
struct SuccessorCell(u32);

impl SuccessorCell {
    const NONE_SENTINEL: u32 = u32::MAX;

    #[inline(always)]
    fn none() -> Self {
        SuccessorCell(Self::NONE_SENTINEL)
    }

    #[inline(always)]
    fn some(vertex: VertexIndex) -> Self {
        debug_assert!(
            vertex.get() < Self::NONE_SENTINEL as usize,
            "called `SuccessorCell::some` with vertex index out of range: {}",
            vertex.get()
        );
        SuccessorCell(vertex.get() as u32)
    }

    #[inline(always)]
    fn get(&self) -> Option<VertexIndex> {
        if self.0 == Self::NONE_SENTINEL {
            None
        } else {
            Some(VertexIndex::new(self.0 as usize))
        }
    }
}

/// Result of a Held-Karp solve after termination.
#[derive(Debug, Clone)]
pub struct HeldKarpOutcome<T> {
    result: SolveResult<T>,
    termination_reason: TerminationReason,
    statistics: HeldKarpStatistics,
}

impl<T> HeldKarpOutcome<T> {
    /// Returns the solve result.
    #[inline]
    pub fn result(&self) -> &SolveResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the collected statistics.
    #[inline]
    pub fn statistics(&self) -> &HeldKarpStatistics {
        &self.statistics
    }
}

/// The dynamic programming solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldKarpSolver {
    max_vertices: usize,
}

impl Default for HeldKarpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HeldKarpSolver {
    /// Creates a solver with the default vertex ceiling.
    #[inline]
    pub fn new() -> Self {
        Self {
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }

    /// Overrides the vertex ceiling.
    ///
    /// Raising it is a deliberate trade: each additional vertex doubles
    /// the table memory.
    #[inline]
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices.min(MAX_SUPPORTED_VERTICES);
        self
    }

    /// Returns the configured vertex ceiling.
    #[inline]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Solves the given instance to optimality.
    ///
    /// # Errors
    ///
    /// Fails fast — before any table allocation — if the instance exceeds
    /// the vertex ceiling, or if any off-diagonal edge is absent (this
    /// solver requires a complete matrix).
    pub fn solve<T>(&self, matrix: &DistanceMatrix<T>) -> Result<HeldKarpOutcome<T>, SolveError>
    where
        T: SolverNumeric,
    {
        let n = matrix.num_vertices();
        if n > self.max_vertices {
            return Err(SolveError::TooManyVertices {
                num_vertices: n,
                max_supported: self.max_vertices,
            });
        }
        if let Some((from, to)) = matrix.first_missing_edge() {
            return Err(SolveError::IncompleteMatrix { from, to });
        }

        let start_time = std::time::Instant::now();
        let mut session = HeldKarpSession::new(matrix);

        let root_mask = VisitSet::singleton(START_VERTEX);
        let minimum = session.search(root_mask, START_VERTEX);
        let sequence = session.reconstruct(root_mask, START_VERTEX);

        let mut statistics = session.into_statistics();
        statistics.set_total_time(start_time.elapsed());

        Ok(HeldKarpOutcome {
            result: SolveResult::Optimal(Tour::new(minimum, sequence)),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        })
    }
}

/// Per-run state: the two dense tables plus counters.
struct HeldKarpSession<'a, T>
where
    T: SolverNumeric,
{
    matrix: &'a DistanceMatrix<T>,
    num_vertices: usize,
    cost_table: Vec<CostCell<T>>,
    successor_table: Vec<SuccessorCell>,
    statistics: HeldKarpStatistics,
}

impl<'a, T> HeldKarpSession<'a, T>
where
    T: SolverNumeric,
{
    fn new(matrix: &'a DistanceMatrix<T>) -> Self {
        let n = matrix.num_vertices();
        let table_len = (1usize << n) * n;

        let mut statistics = HeldKarpStatistics::default();
        statistics.set_table_entries(table_len as u64);

        Self {
            matrix,
            num_vertices: n,
            cost_table: vec![CostCell::unset(); table_len],
            successor_table: vec![SuccessorCell::none(); table_len],
            statistics,
        }
    }

    #[inline(always)]
    fn flat_index(&self, mask: VisitSet, position: VertexIndex) -> usize {
        mask.index() * self.num_vertices + position.get()
    }

    /// Returns the minimal cost of completing the tour from `position`
    /// back to the start, visiting every vertex not yet in `mask`.
    fn search(&mut self, mask: VisitSet, position: VertexIndex) -> T {
        if mask.is_full(self.num_vertices) {
            // All vertices visited; close the cycle. Completeness was
            // validated up front, so the edge exists.
            return self.matrix.cost(position, START_VERTEX).unwrap();
        }

        let flat = self.flat_index(mask, position);
        if let Some(cached) = self.cost_table[flat].get() {
            self.statistics.on_memo_hit();
            return cached;
        }
        self.statistics.on_state_computed();

        let mut best: Option<(T, VertexIndex)> = None;
        for next in 0..self.num_vertices {
            let next = VertexIndex::new(next);
            if mask.contains(next) {
                continue;
            }

            // SAFETY: `position` and `next` are within `0..num_vertices`.
            let edge = unsafe { self.matrix.cost_unchecked(position, next) }.unwrap();
            let completion = self.search(mask.with(next), next);
            let candidate = edge.saturating_add_val(completion);

            // Strict improvement: among ties the lowest-index successor
            // stays.
            let improved = best.is_none_or(|(minimum, _)| candidate < minimum);
            if improved {
                best = Some((candidate, next));
            }
        }

        // There is at least one unvisited vertex below the full mask.
        let (minimum, successor) = best.expect("non-full visited set must have a successor");
        self.cost_table[flat] = CostCell::computed(minimum);
        self.successor_table[flat] = SuccessorCell::some(successor);
        minimum
    }

    /// Reconstructs the optimal ordering by walking the successor table
    /// from the root state until no successor is recorded.
    fn reconstruct(&self, root_mask: VisitSet, start: VertexIndex) -> Vec<VertexIndex> {
        let mut sequence = vec![start];
        let mut mask = root_mask;
        let mut position = start;

        while let Some(next) = self.successor_table[self.flat_index(mask, position)].get() {
            sequence.push(next);
            mask = mask.with(next);
            position = next;
        }

        sequence
    }

    fn into_statistics(self) -> HeldKarpStatistics {
        self.statistics
    }
}
