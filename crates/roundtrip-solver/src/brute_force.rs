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

//! Exhaustive permutation search.
//!
//! Fixing the start vertex removes the n rotational duplicates of every
//! cycle, leaving (n-1)! candidate orderings of the remaining vertices.
//! The sweep walks them in lexicographic order with an in-place successor
//! step, so the only allocation per improvement is the copy of the best
//! ordering found so far.
//!
//! Factorial growth makes this practical for roughly a dozen vertices; the
//! value of the solver is as a trusted oracle for validating the smarter
//! ones.

use crate::{
    eval::tour_cost,
    num::SolverNumeric,
    result::{SolveResult, TerminationReason},
    stats::BruteForceStatistics,
};
use roundtrip_model::{
    index::VertexIndex,
    matrix::DistanceMatrix,
    tour::{START_VERTEX, Tour},
};

/// Result of a brute-force sweep after termination.
#[derive(Debug, Clone)]
pub struct BruteForceOutcome<T> {
    result: SolveResult<T>,
    termination_reason: TerminationReason,
    statistics: BruteForceStatistics,
}

impl<T> BruteForceOutcome<T> {
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
    pub fn statistics(&self) -> &BruteForceStatistics {
        &self.statistics
    }
}

/// The exhaustive solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BruteForceSolver;

impl BruteForceSolver {
    /// Creates a new brute-force solver.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Enumerates every tour of the given matrix and returns the cheapest.
    ///
    /// Among tours of equal cost, the one generated last in lexicographic
    /// order wins: a candidate replaces the incumbent whenever its cost is
    /// less than *or equal to* the current minimum. Candidates that require
    /// an absent edge are skipped; if every candidate is skipped, the
    /// instance is infeasible.
    pub fn solve<T>(&self, matrix: &DistanceMatrix<T>) -> BruteForceOutcome<T>
    where
        T: SolverNumeric,
    {
        let start_time = std::time::Instant::now();
        let n = matrix.num_vertices();
        let mut stats = BruteForceStatistics::default();

        // The permuted tail: every vertex except the fixed start, in
        // ascending order (the lexicographically first permutation).
        let mut tail: Vec<VertexIndex> = (1..n).map(VertexIndex::new).collect();
        let mut candidate: Vec<VertexIndex> = Vec::with_capacity(n);
        let mut best: Option<(T, Vec<VertexIndex>)> = None;

        loop {
            candidate.clear();
            candidate.push(START_VERTEX);
            candidate.extend_from_slice(&tail);

            match tour_cost(matrix, &candidate) {
                Some(cost) => {
                    stats.on_tour_evaluated();
                    let improved = best.as_ref().is_none_or(|(minimum, _)| cost <= *minimum);
                    if improved {
                        best = Some((cost, candidate.clone()));
                    }
                }
                None => stats.on_tour_skipped(),
            }

            if !next_permutation(&mut tail) {
                break;
            }
        }

        stats.set_total_time(start_time.elapsed());

        match best {
            Some((cost, sequence)) => BruteForceOutcome {
                result: SolveResult::Optimal(Tour::new(cost, sequence)),
                termination_reason: TerminationReason::OptimalityProven,
                statistics: stats,
            },
            None => BruteForceOutcome {
                result: SolveResult::Infeasible,
                termination_reason: TerminationReason::InfeasibilityProven,
                statistics: stats,
            },
        }
    }
}

/// Advances `seq` to its lexicographic successor in place.
///
/// Returns `false` once `seq` holds the lexicographically last permutation,
/// leaving it unchanged in that case.
fn next_permutation(seq: &mut [VertexIndex]) -> bool {
    if seq.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix; the pivot sits just before it.
    let mut pivot = seq.len() - 1;
    while pivot > 0 && seq[pivot - 1] >= seq[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }
    let pivot = pivot - 1;

    // Rightmost element strictly greater than the pivot.
    let mut successor = seq.len() - 1;
    while seq[successor] <= seq[pivot] {
        successor -= 1;
    }

    seq.swap(pivot, successor);
    seq[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_next_permutation_walks_lexicographic_order() {
        let mut seq = vec![vx(1), vx(2), vx(3)];
        let mut seen = vec![seq.clone()];
        while next_permutation(&mut seq) {
            seen.push(seq.clone());
        }

        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], vec![vx(1), vx(2), vx(3)]);
        assert_eq!(seen[1], vec![vx(1), vx(3), vx(2)]);
        assert_eq!(seen[5], vec![vx(3), vx(2), vx(1)]);
        // Exhausted sequences stay put.
        assert_eq!(seq, vec![vx(3), vx(2), vx(1)]);
    }

    #[test]
    fn test_reference_instance() {
        let outcome = BruteForceSolver::new().solve(&reference_matrix());
        let tour = outcome.result().tour().expect("expected a tour");
        assert_eq!(tour.total_cost(), 80);
        assert_eq!(
            *outcome.termination_reason(),
            TerminationReason::OptimalityProven
        );
        // All 3! orderings of the tail were evaluated.
        assert_eq!(outcome.statistics().tours_evaluated, 6);
    }

    #[test]
    fn test_degenerate_two_vertex_instance() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0i64, 5], vec![5, 0]]).unwrap();
        let outcome = BruteForceSolver::new().solve(&matrix);
        let tour = outcome.result().tour().expect("expected a tour");
        assert_eq!(tour.total_cost(), 10);
        assert_eq!(tour.sequence(), &[vx(0), vx(1)]);
    }

    #[test]
    fn test_ties_keep_the_last_lexicographic_candidate() {
        // Fully uniform costs: every tour costs 30, so the winner must be
        // the lexicographically last ordering of the tail.
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 10, 10],
            vec![10, 0, 10],
            vec![10, 10, 0],
        ])
        .unwrap();

        let outcome = BruteForceSolver::new().solve(&matrix);
        let tour = outcome.result().tour().expect("expected a tour");
        assert_eq!(tour.total_cost(), 30);
        assert_eq!(tour.sequence(), &[vx(0), vx(2), vx(1)]);
    }

    #[test]
    fn test_asymmetric_costs_are_respected() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 1, 10],
            vec![10, 0, 1],
            vec![1, 10, 0],
        ])
        .unwrap();

        let outcome = BruteForceSolver::new().solve(&matrix);
        let tour = outcome.result().tour().expect("expected a tour");
        assert_eq!(tour.total_cost(), 3);
        assert_eq!(tour.sequence(), &[vx(0), vx(1), vx(2)]);
    }

    #[test]
    fn test_infeasible_instance() {
        // Vertex 2 cannot be left except towards itself: both candidate
        // tours need an absent edge.
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 1, 1],
            vec![1, 0, 1],
            vec![-1, -1, 0],
        ])
        .unwrap();

        let outcome = BruteForceSolver::new().solve(&matrix);
        assert!(outcome.result().is_infeasible());
        assert_eq!(
            *outcome.termination_reason(),
            TerminationReason::InfeasibilityProven
        );
        assert_eq!(outcome.statistics().tours_skipped, 2);
    }
}
