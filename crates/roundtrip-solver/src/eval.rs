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

//! Cycle cost evaluation.

use crate::num::SolverNumeric;
use roundtrip_core::num::ops::SaturatingAddVal;
use roundtrip_model::matrix::DistanceMatrix;
use roundtrip_model::index::VertexIndex;

/// Computes the total cycle cost of a full vertex ordering.
///
/// Sums the costs of all consecutive hops plus the closing edge from the
/// last vertex back to the first. Returns `None` if any required edge is
/// absent; the sentinel never participates in the accumulation.
///
/// The ordering must visit every vertex of the matrix exactly once; the
/// caller is responsible for that invariant (checked in debug builds only).
///
/// # Examples
///
/// ```rust
/// # use roundtrip_model::{index::VertexIndex, matrix::DistanceMatrix};
/// # use roundtrip_solver::eval::tour_cost;
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0i64, 10, 15, 20],
///     vec![10, 0, 35, 25],
///     vec![15, 35, 0, 30],
///     vec![20, 25, 30, 0],
/// ])
/// .unwrap();
///
/// let order: Vec<VertexIndex> = [0, 1, 3, 2].iter().map(|&i| VertexIndex::new(i)).collect();
/// assert_eq!(tour_cost(&matrix, &order), Some(80));
/// ```
pub fn tour_cost<T>(matrix: &DistanceMatrix<T>, order: &[VertexIndex]) -> Option<T>
where
    T: SolverNumeric,
{
    debug_assert_eq!(
        order.len(),
        matrix.num_vertices(),
        "called `tour_cost` with an ordering of length {} for a matrix of {} vertices",
        order.len(),
        matrix.num_vertices()
    );

    let mut total = T::zero();
    for hop in order.windows(2) {
        total = total.saturating_add_val(matrix.cost(hop[0], hop[1]).into_option()?);
    }

    let last = *order.last()?;
    let closing = matrix.cost(last, order[0]).into_option()?;
    Some(total.saturating_add_val(closing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(indices: &[usize]) -> Vec<VertexIndex> {
        indices.iter().map(|&i| VertexIndex::new(i)).collect()
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
    fn test_cost_of_known_tours() {
        let matrix = reference_matrix();
        assert_eq!(tour_cost(&matrix, &order(&[0, 1, 3, 2])), Some(80));
        assert_eq!(tour_cost(&matrix, &order(&[0, 1, 2, 3])), Some(95));
    }

    #[test]
    fn test_cost_respects_asymmetry() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 1, 10],
            vec![10, 0, 1],
            vec![1, 10, 0],
        ])
        .unwrap();

        // Forward direction uses the cheap edges, reverse the expensive ones.
        assert_eq!(tour_cost(&matrix, &order(&[0, 1, 2])), Some(3));
        assert_eq!(tour_cost(&matrix, &order(&[0, 2, 1])), Some(30));
    }

    #[test]
    fn test_absent_edge_yields_none() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 1, -1],
            vec![10, 0, 1],
            vec![1, 10, 0],
        ])
        .unwrap();

        assert!(tour_cost(&matrix, &order(&[0, 2, 1])).is_some());
        assert_eq!(tour_cost(&matrix, &order(&[0, 1, 2])), Some(3));
        // 0 -> 2 is absent.
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 1, 2],
            vec![10, 0, -1],
            vec![1, 10, 0],
        ])
        .unwrap();
        assert_eq!(tour_cost(&matrix, &order(&[0, 1, 2])), None);
    }

    #[test]
    fn test_degenerate_two_vertex_cycle() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0i64, 5], vec![5, 0]]).unwrap();
        assert_eq!(tour_cost(&matrix, &order(&[0, 1])), Some(10));
    }
}
