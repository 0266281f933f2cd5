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

use crate::{cost::EdgeCost, index::VertexIndex};
use num_traits::{PrimInt, Signed};
use roundtrip_core::num::constants::MinusOne;

#[inline(always)]
fn flatten_index(num_vertices: usize, from: VertexIndex, to: VertexIndex) -> usize {
    from.get() * num_vertices + to.get()
}

/// Represents the theoretical search space size of the Asymmetric TSP.
///
/// With the start vertex fixed, the number of distinct directed tours is
/// $(n-1)!$. Since this exceeds standard integer limits long before the
/// solvers give up, this struct stores the value in **Logarithmic Space**
/// ($\log_{10}$).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    /// The base-10 logarithm of the number of distinct tours.
    log_val: f64,
}

impl Complexity {
    /// Calculates the tour-space size for the given number of vertices.
    pub fn new(num_vertices: usize) -> Self {
        // log10((n-1)!) = sum of log10(k) for k in 2..=n-1.
        let mut log_val = 0.0;
        for k in 2..num_vertices {
            log_val += (k as f64).log10();
        }

        Complexity { log_val }
    }

    /// Returns the percentage of the tour space that was actually explored.
    /// Returns `None` if the space is too massive to represent as `f64`.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total_size = 10.0_f64.powf(self.log_val);
        if total_size == 0.0 {
            return None;
        }

        Some((nodes_explored as f64 / total_size) * 100.0)
    }

    /// Returns the exponent (order of magnitude).
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa (coefficient).
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// The error type for direct matrix construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Fewer than two vertices were supplied.
    TooFewVertices { num_vertices: usize },
    /// A row does not have exactly `num_vertices` entries.
    NotSquare { row: usize, row_len: usize, num_vertices: usize },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewVertices { num_vertices } => {
                write!(
                    f,
                    "A distance matrix needs at least 2 vertices, but {} were supplied",
                    num_vertices
                )
            }
            Self::NotSquare {
                row,
                row_len,
                num_vertices,
            } => {
                write!(
                    f,
                    "Row {} has {} entries, but the matrix has {} vertices",
                    row, row_len, num_vertices
                )
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// The immutable distance matrix of an Asymmetric TSP instance.
///
/// This struct holds the pre-validated, queryable edge costs:
/// - `cost(from, to)`: per-(from, to) travel cost, encoded via
///   `EdgeCost<T>` (sentinel-based option; absent means "no direct edge").
/// - Costs need not be symmetric; diagonal entries are never read by the
///   solvers.
///
/// Construction:
/// - Use `DistanceMatrix::from_rows` for fully specified input (negative
///   entries map to absent edges), or `DistanceMatrixBuilder` to add edges
///   one by one.
///
/// A matrix is constructed once and stays read-only for the duration of a
/// solve; solvers receive it by shared reference.
#[derive(Clone, PartialEq, Eq)]
pub struct DistanceMatrix<T>
where
    T: PrimInt + Signed,
{
    num_vertices: usize,
    costs: Vec<EdgeCost<T>>, // len = num_vertices * num_vertices
}

impl<T> DistanceMatrix<T>
where
    T: PrimInt + Signed + MinusOne,
{
    /// Builds a matrix from row-major input rows.
    ///
    /// Negative entries are mapped to "no direct edge", matching the common
    /// on-disk convention of encoding missing connections as `-1`.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two rows are supplied or any row length differs
    /// from the number of rows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roundtrip_model::matrix::DistanceMatrix;
    ///
    /// let matrix = DistanceMatrix::from_rows(vec![
    ///     vec![0i64, 10, 15],
    ///     vec![10, 0, -1],
    ///     vec![15, 35, 0],
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(matrix.num_vertices(), 3);
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let num_vertices = rows.len();
        if num_vertices < 2 {
            return Err(MatrixError::TooFewVertices { num_vertices });
        }

        let mut costs = Vec::with_capacity(num_vertices * num_vertices);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != num_vertices {
                return Err(MatrixError::NotSquare {
                    row: row_index,
                    row_len: row.len(),
                    num_vertices,
                });
            }
            for &value in row {
                costs.push(EdgeCost::from_raw(value));
            }
        }

        Ok(Self {
            num_vertices,
            costs,
        })
    }

    /// Returns the number of vertices in the matrix.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Returns the size of the tour space for this matrix.
    #[inline]
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.num_vertices)
    }

    /// Returns the cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is not in
    /// `0..num_vertices()`.
    #[inline]
    pub fn cost(&self, from: VertexIndex, to: VertexIndex) -> EdgeCost<T> {
        debug_assert!(
            from.get() < self.num_vertices,
            "called `DistanceMatrix::cost` with from index out of bounds: the len is {} but the index is {}",
            self.num_vertices,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_vertices,
            "called `DistanceMatrix::cost` with to index out of bounds: the len is {} but the index is {}",
            self.num_vertices,
            to.get()
        );

        self.costs[flatten_index(self.num_vertices, from, to)]
    }

    /// Returns the cost of the directed edge `from -> to` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it does not perform bounds checking.
    /// The caller must ensure that both indices are in `0..num_vertices()`.
    /// Undefined behavior may occur if this precondition is violated.
    #[inline]
    pub unsafe fn cost_unchecked(&self, from: VertexIndex, to: VertexIndex) -> EdgeCost<T> {
        debug_assert!(
            from.get() < self.num_vertices,
            "called `DistanceMatrix::cost_unchecked` with from index out of bounds: the len is {} but the index is {}",
            self.num_vertices,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_vertices,
            "called `DistanceMatrix::cost_unchecked` with to index out of bounds: the len is {} but the index is {}",
            self.num_vertices,
            to.get()
        );

        unsafe {
            *self
                .costs
                .get_unchecked(flatten_index(self.num_vertices, from, to))
        }
    }

    /// Returns the first absent off-diagonal edge, if any.
    ///
    /// Solvers that cannot handle missing connections (e.g. the dynamic
    /// programming solver) use this for their fail-fast precondition check.
    pub fn first_missing_edge(&self) -> Option<(VertexIndex, VertexIndex)> {
        for from in 0..self.num_vertices {
            for to in 0..self.num_vertices {
                if from == to {
                    continue;
                }
                let (from, to) = (VertexIndex::new(from), VertexIndex::new(to));
                if self.cost(from, to).is_none() {
                    return Some((from, to));
                }
            }
        }
        None
    }

    /// Returns `true` if every off-diagonal edge is present.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.first_missing_edge().is_none()
    }
}

impl<T> std::fmt::Debug for DistanceMatrix<T>
where
    T: PrimInt + Signed + MinusOne + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceMatrix")
            .field("num_vertices", &self.num_vertices)
            .field("costs", &self.costs)
            .finish()
    }
}

impl<T> std::fmt::Display for DistanceMatrix<T>
where
    T: PrimInt + Signed + MinusOne + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DistanceMatrix(num_vertices: {})", self.num_vertices)
    }
}

/// Builder for `DistanceMatrix`.
///
/// The builder starts with an **empty topology**: no edge exists until it is
/// added via `set_cost`. Nothing is assumed to be connected, which prevents
/// impossible connections from being used silently; an instance built
/// without edges is infeasible for every solver.
#[derive(Clone, Debug)]
pub struct DistanceMatrixBuilder<T>
where
    T: PrimInt + Signed + MinusOne,
{
    num_vertices: usize,
    costs: Vec<EdgeCost<T>>,
}

impl<T> DistanceMatrixBuilder<T>
where
    T: PrimInt + Signed + MinusOne + std::fmt::Display,
{
    /// Creates a new builder for a matrix with `num_vertices` vertices and
    /// no edges.
    ///
    /// # Panics
    ///
    /// Panics if `num_vertices < 2`; a tour needs at least two vertices.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roundtrip_model::{index::VertexIndex, matrix::DistanceMatrixBuilder};
    ///
    /// let mut builder = DistanceMatrixBuilder::<i64>::new(2);
    /// builder.set_cost(VertexIndex::new(0), VertexIndex::new(1), 5);
    /// builder.set_cost(VertexIndex::new(1), VertexIndex::new(0), 5);
    /// let matrix = builder.build();
    /// assert!(matrix.is_complete());
    /// ```
    pub fn new(num_vertices: usize) -> Self {
        assert!(
            num_vertices >= 2,
            "called `DistanceMatrixBuilder::new` with fewer than 2 vertices: {}",
            num_vertices
        );

        Self {
            num_vertices,
            costs: vec![EdgeCost::none(); num_vertices * num_vertices],
        }
    }

    /// Returns the number of vertices in the matrix under construction.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Sets the cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if `cost` is negative or, in debug builds, if either index is
    /// out of bounds.
    #[inline]
    pub fn set_cost(&mut self, from: VertexIndex, to: VertexIndex, cost: T) -> &mut Self {
        debug_assert!(
            from.get() < self.num_vertices && to.get() < self.num_vertices,
            "called `DistanceMatrixBuilder::set_cost` with index out of bounds: the len is {} but the indices are ({}, {})",
            self.num_vertices,
            from.get(),
            to.get()
        );

        self.costs[flatten_index(self.num_vertices, from, to)] = EdgeCost::some(cost);
        self
    }

    /// Removes the directed edge `from -> to`.
    #[inline]
    pub fn remove_edge(&mut self, from: VertexIndex, to: VertexIndex) -> &mut Self {
        debug_assert!(
            from.get() < self.num_vertices && to.get() < self.num_vertices,
            "called `DistanceMatrixBuilder::remove_edge` with index out of bounds: the len is {} but the indices are ({}, {})",
            self.num_vertices,
            from.get(),
            to.get()
        );

        self.costs[flatten_index(self.num_vertices, from, to)] = EdgeCost::none();
        self
    }

    /// Finalizes the builder into an immutable `DistanceMatrix`.
    #[inline]
    pub fn build(self) -> DistanceMatrix<T> {
        DistanceMatrix {
            num_vertices: self.num_vertices,
            costs: self.costs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vx(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    #[test]
    fn test_from_rows_maps_negative_to_absent() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 10, -1],
            vec![10, 0, 35],
            vec![-1, 35, 0],
        ])
        .unwrap();

        assert_eq!(matrix.cost(vx(0), vx(1)).into_option(), Some(10));
        assert!(matrix.cost(vx(0), vx(2)).is_none());
        assert_eq!(matrix.first_missing_edge(), Some((vx(0), vx(2))));
        assert!(!matrix.is_complete());
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        let err = DistanceMatrix::from_rows(vec![vec![0i64, 1], vec![1, 0, 2]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NotSquare {
                row: 1,
                row_len: 3,
                num_vertices: 2
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_single_vertex() {
        let err = DistanceMatrix::from_rows(vec![vec![0i64]]).unwrap_err();
        assert_eq!(err, MatrixError::TooFewVertices { num_vertices: 1 });
    }

    #[test]
    fn test_builder_starts_disconnected() {
        let matrix = DistanceMatrixBuilder::<i64>::new(3).build();
        assert!(matrix.cost(vx(0), vx(1)).is_none());
        assert!(!matrix.is_complete());
    }

    #[test]
    fn test_builder_set_and_remove() {
        let mut builder = DistanceMatrixBuilder::<i64>::new(2);
        builder.set_cost(vx(0), vx(1), 5);
        builder.set_cost(vx(1), vx(0), 7);
        builder.remove_edge(vx(1), vx(0));
        let matrix = builder.build();

        assert_eq!(matrix.cost(vx(0), vx(1)).into_option(), Some(5));
        assert!(matrix.cost(vx(1), vx(0)).is_none());
    }

    #[test]
    #[should_panic(expected = "called `DistanceMatrixBuilder::new` with fewer than 2 vertices")]
    fn test_builder_rejects_degenerate_instance() {
        let _ = DistanceMatrixBuilder::<i64>::new(1);
    }

    #[test]
    fn test_complexity_matches_factorial_for_small_n() {
        // 4 vertices -> 3! = 6 tours.
        let complexity = Complexity::new(4);
        assert!((10.0_f64.powf(complexity.raw()) - 6.0).abs() < 1e-9);
        // 2 vertices -> a single tour.
        assert_eq!(Complexity::new(2).raw(), 0.0);
    }

    #[test]
    fn test_complexity_coverage() {
        let complexity = Complexity::new(5); // 24 tours
        let coverage = complexity.coverage(12).unwrap();
        assert!((coverage - 50.0).abs() < 1e-9);
    }
}
