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

//! Best-first branch-and-bound for the Asymmetric TSP.
//!
//! The solver explores partial tours ordered by their lower bound: the
//! frontier is a min-heap keyed on the bound, so the most promising node is
//! always expanded next. A node whose bound cannot beat the incumbent is
//! discarded when popped; children are bounded before insertion so
//! hopeless ones never enter the frontier at all. Absent edges simply
//! produce no child.
//!
//! The engine manages reusable internal structures: nodes live in an
//! append-only arena addressed by id, and a fast `reset` keeps the
//! capacities of arena and frontier across repeated solves. A search
//! session object encapsulates per-run state, statistics, and timing.
//!
//! Correctness rests on the bound being admissible, which holds for
//! non-negative edge costs. The incumbent is only replaced on strict
//! improvement, so the reported cost is deterministic for a fixed matrix;
//! *which* of several equal-cost tours is reported depends on the heap's
//! ordering among equal bounds, which is an implementation detail and not
//! a contract.

use crate::{
    arena::{NodeArena, NodeId},
    error::SolveError,
    monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    node::SearchNode,
    num::SolverNumeric,
    result::{SolveResult, TerminationReason},
    stats::BnbSolverStatistics,
    visit::VisitSet,
};
use roundtrip_core::num::ops::CheckedAddVal;
use roundtrip_model::{
    index::VertexIndex,
    matrix::DistanceMatrix,
    tour::{START_VERTEX, Tour},
};
use std::collections::BinaryHeap;

/// Result of the branch-and-bound solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolveResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    fn optimal(tour: Tour<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolveResult::Optimal(tour),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    fn infeasible(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolveResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    fn aborted<R>(tour: Option<Tour<T>>, reason: R, statistics: BnbSolverStatistics<T>) -> Self
    where
        R: Into<String>,
    {
        let result = match tour {
            Some(tour) => SolveResult::Feasible(tour),
            None => SolveResult::Infeasible,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

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
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }
}

/// A frontier entry: a node id keyed by the node's bound.
///
/// The ordering is reversed so that `BinaryHeap`, a max-heap, pops the
/// entry with the *smallest* bound first. Entries with equal bounds are
/// ordered by id, but that order is an implementation detail; callers must
/// not rely on which equal-bound node is expanded first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry<T> {
    bound: T,
    id: NodeId,
}

impl<T> Ord for FrontierEntry<T>
where
    T: Ord,
{
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .bound
            .cmp(&self.bound)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<T> PartialOrd for FrontierEntry<T>
where
    T: Ord,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The best-first branch-and-bound solver.
///
/// The solver owns its arena and frontier so repeated solves reuse their
/// allocations; each call to `solve` starts from a logically clean state.
#[derive(Clone, Debug)]
pub struct BnbSolver<T>
where
    T: SolverNumeric,
{
    arena: NodeArena<T>,
    frontier: BinaryHeap<FrontierEntry<T>>,
}

impl<T> Default for BnbSolver<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: SolverNumeric,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            frontier: BinaryHeap::new(),
        }
    }

    /// Creates a new solver instance with preallocated storage.
    ///
    /// This only moves the cost of the early allocations to construction
    /// time; the asymptotic memory usage of the search is unchanged.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            arena: NodeArena::preallocated(capacity),
            frontier: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Solves the given instance, observed by `monitor`.
    ///
    /// Returns the optimal tour if the frontier was exhausted, the best
    /// incumbent if a monitor aborted the run, or infeasibility if no tour
    /// exists.
    ///
    /// # Errors
    ///
    /// Fails fast if the instance is wider than the visited-set
    /// representation supports.
    pub fn solve<M>(
        &mut self,
        matrix: &DistanceMatrix<T>,
        monitor: &mut M,
    ) -> Result<BnbSolverOutcome<T>, SolveError>
    where
        M: SearchMonitor<T>,
    {
        let n = matrix.num_vertices();
        if n > VisitSet::MAX_VERTICES {
            return Err(SolveError::TooManyVertices {
                num_vertices: n,
                max_supported: VisitSet::MAX_VERTICES,
            });
        }

        let session = BnbSearchSession::new(self, matrix, monitor);
        let outcome = session.run();
        self.reset();
        Ok(outcome)
    }

    /// Resets the internal state, keeping allocated capacity.
    #[inline]
    fn reset(&mut self) {
        self.arena.reset();
        self.frontier.clear();
    }
}

/// A single search run: per-run state, statistics, and timing.
struct BnbSearchSession<'a, T, M>
where
    T: SolverNumeric,
{
    solver: &'a mut BnbSolver<T>,
    matrix: &'a DistanceMatrix<T>,
    monitor: &'a mut M,
    best_cost: T,
    best_node: Option<NodeId>,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, T, M> BnbSearchSession<'a, T, M>
where
    T: SolverNumeric,
    M: SearchMonitor<T>,
{
    #[inline]
    fn new(solver: &'a mut BnbSolver<T>, matrix: &'a DistanceMatrix<T>, monitor: &'a mut M) -> Self {
        Self {
            solver,
            matrix,
            monitor,
            best_cost: T::max_value(),
            best_node: None,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor.on_enter_search(self.matrix);

        let root = SearchNode::root(START_VERTEX).with_estimated_bound(self.matrix);
        self.stats.set_root_lower_bound(root.bound());
        let root_id = self.solver.arena.push(root);
        self.solver.frontier.push(FrontierEntry {
            bound: root.bound(),
            id: root_id,
        });

        let termination_reason: TerminationReason = loop {
            if let SearchCommand::Terminate(reason) = self.monitor.search_command(&self.stats) {
                break TerminationReason::Aborted(reason);
            }

            let Some(entry) = self.solver.frontier.pop() else {
                // Frontier exhausted: the incumbent, if any, is optimal.
                break if self.best_node.is_some() {
                    TerminationReason::OptimalityProven
                } else {
                    TerminationReason::InfeasibilityProven
                };
            };

            self.stats.on_node_expanded();
            self.monitor.on_step(self.solver.frontier.len(), &self.stats);

            // The incumbent may have improved since this entry was pushed.
            if entry.bound >= self.best_cost {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(PruneReason::BoundDominated, &self.stats);
                continue;
            }

            let node = *self.solver.arena.get(entry.id);
            self.expand(entry.id, &node);
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize(termination_reason)
    }

    /// Generates all children of `node` and routes each one into the
    /// incumbent check (complete tours) or the frontier (partial tours).
    fn expand(&mut self, node_id: NodeId, node: &SearchNode<T>) {
        let n = self.matrix.num_vertices();

        for next in 0..n {
            let next = VertexIndex::new(next);
            if node.visited().contains(next) {
                continue;
            }

            let Some(edge) = self.matrix.cost(node.vertex(), next).into_option() else {
                self.stats.on_pruning_infeasible();
                self.monitor.on_prune(PruneReason::Infeasible, &self.stats);
                continue;
            };

            let child = SearchNode::child(node_id, node, next, edge);
            self.stats.on_child_generated();
            self.stats.on_depth_update(child.level() as u64);

            if child.level() as usize == n - 1 {
                self.try_complete(child);
            } else {
                let child = child.with_estimated_bound(self.matrix);
                if child.bound() < self.best_cost {
                    let id = self.solver.arena.push(child);
                    self.solver.frontier.push(FrontierEntry {
                        bound: child.bound(),
                        id,
                    });
                    self.stats.on_frontier_len(self.solver.frontier.len() as u64);
                } else {
                    self.stats.on_pruning_bound();
                    self.monitor
                        .on_prune(PruneReason::BoundDominated, &self.stats);
                }
            }
        }
    }

    /// Closes the cycle of a child that has visited every vertex and
    /// installs it as the incumbent on strict improvement.
    fn try_complete(&mut self, child: SearchNode<T>) {
        let Some(closing) = self
            .matrix
            .cost(child.vertex(), START_VERTEX)
            .into_option()
        else {
            self.stats.on_pruning_infeasible();
            self.monitor.on_prune(PruneReason::Infeasible, &self.stats);
            return;
        };

        let Some(total) = child.cost().checked_add_val(closing) else {
            // Overflowing total cannot possibly beat the incumbent.
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(PruneReason::BoundDominated, &self.stats);
            return;
        };

        if total < self.best_cost {
            self.best_cost = total;
            let id = self.solver.arena.push(child);
            self.best_node = Some(id);
            self.stats.on_incumbent_update();

            let tour = self.materialize(id, total);
            self.monitor.on_solution_found(&tour, &self.stats);
        }
    }

    #[inline]
    fn materialize(&self, id: NodeId, total: T) -> Tour<T> {
        Tour::new(total, self.solver.arena.path_of(id).into_vec())
    }

    fn finalize(self, termination_reason: TerminationReason) -> BnbSolverOutcome<T> {
        let incumbent = self
            .best_node
            .map(|id| self.materialize(id, self.best_cost));

        match termination_reason {
            TerminationReason::OptimalityProven => {
                let tour = incumbent
                    .expect("optimality proven without an incumbent tour");
                BnbSolverOutcome::optimal(tour, self.stats)
            }
            TerminationReason::InfeasibilityProven => BnbSolverOutcome::infeasible(self.stats),
            TerminationReason::Aborted(reason) => {
                BnbSolverOutcome::aborted(incumbent, reason, self.stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::tour_cost;
    use crate::monitor::{NoOpMonitor, NodeLimitMonitor};

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
    fn test_frontier_pops_smallest_bound_first() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry {
            bound: 30i64,
            id: NodeId::new(0),
        });
        heap.push(FrontierEntry {
            bound: 10,
            id: NodeId::new(1),
        });
        heap.push(FrontierEntry {
            bound: 20,
            id: NodeId::new(2),
        });

        assert_eq!(heap.pop().unwrap().bound, 10);
        assert_eq!(heap.pop().unwrap().bound, 20);
        assert_eq!(heap.pop().unwrap().bound, 30);
    }

    #[test]
    fn test_reference_instance() {
        let mut solver = BnbSolver::new();
        let outcome = solver
            .solve(&reference_matrix(), &mut NoOpMonitor::new())
            .unwrap();

        let tour = outcome.result().tour().expect("expected a tour");
        assert_eq!(tour.total_cost(), 80);
        assert!(outcome.result().is_optimal());
        assert_eq!(
            *outcome.termination_reason(),
            TerminationReason::OptimalityProven
        );
    }

    #[test]
    fn test_reported_cost_matches_evaluated_cost() {
        let matrix = reference_matrix();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&matrix, &mut NoOpMonitor::new()).unwrap();
        let tour = outcome.result().tour().expect("expected a tour");

        assert_eq!(tour.num_vertices(), matrix.num_vertices());
        assert_eq!(tour_cost(&matrix, tour.sequence()), Some(tour.total_cost()));
    }

    #[test]
    fn test_degenerate_two_vertex_instance() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0i64, 5], vec![5, 0]]).unwrap();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&matrix, &mut NoOpMonitor::new()).unwrap();
        let tour = outcome.result().tour().expect("expected a tour");
        assert_eq!(tour.total_cost(), 10);
        assert_eq!(
            tour.sequence(),
            &[VertexIndex::new(0), VertexIndex::new(1)]
        );
    }

    #[test]
    fn test_absent_edges_are_respected() {
        // The only remaining tour is 0 -> 2 -> 1 -> 0.
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, -1, 4],
            vec![6, 0, -1],
            vec![-1, 5, 0],
        ])
        .unwrap();

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&matrix, &mut NoOpMonitor::new()).unwrap();
        let tour = outcome.result().tour().expect("expected a tour");
        assert_eq!(tour.total_cost(), 15);
        assert_eq!(
            tour.sequence(),
            &[
                VertexIndex::new(0),
                VertexIndex::new(2),
                VertexIndex::new(1)
            ]
        );
    }

    #[test]
    fn test_infeasible_instance() {
        // Vertex 1 can be entered but never left.
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0i64, 3, 3],
            vec![-1, 0, -1],
            vec![3, 3, 0],
        ])
        .unwrap();

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&matrix, &mut NoOpMonitor::new()).unwrap();
        assert!(outcome.result().is_infeasible());
        assert_eq!(
            *outcome.termination_reason(),
            TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_node_limit_aborts() {
        let mut solver = BnbSolver::new();
        let mut monitor = NodeLimitMonitor::new(0);
        let outcome = solver.solve(&reference_matrix(), &mut monitor).unwrap();

        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        assert_eq!(outcome.statistics().nodes_expanded, 0);
    }

    #[test]
    fn test_rejects_oversized_instance() {
        let n = VisitSet::MAX_VERTICES + 1;
        let rows = vec![vec![1i64; n]; n];
        let matrix = DistanceMatrix::from_rows(rows).unwrap();

        let mut solver = BnbSolver::new();
        let err = solver
            .solve(&matrix, &mut NoOpMonitor::new())
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::TooManyVertices {
                num_vertices: n,
                max_supported: VisitSet::MAX_VERTICES
            }
        );
    }

    /// A monitor that records every incumbent cost, for checking that the
    /// incumbent only ever improves.
    struct IncumbentRecorder {
        costs: Vec<i64>,
    }

    impl SearchMonitor<i64> for IncumbentRecorder {
        fn name(&self) -> &str {
            "IncumbentRecorder"
        }

        fn on_enter_search(&mut self, _matrix: &DistanceMatrix<i64>) {}

        fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<i64>) {}

        fn on_step(&mut self, _frontier_len: usize, _statistics: &BnbSolverStatistics<i64>) {}

        fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics<i64>) {}

        fn on_solution_found(
            &mut self,
            tour: &Tour<i64>,
            _statistics: &BnbSolverStatistics<i64>,
        ) {
            self.costs.push(tour.total_cost());
        }
    }

    #[test]
    fn test_incumbent_is_strictly_decreasing() {
        let mut solver = BnbSolver::new();
        let mut recorder = IncumbentRecorder { costs: Vec::new() };
        let outcome = solver.solve(&reference_matrix(), &mut recorder).unwrap();

        assert!(!recorder.costs.is_empty());
        for pair in recorder.costs.windows(2) {
            assert!(pair[1] < pair[0], "incumbent must only improve strictly");
        }
        assert_eq!(*recorder.costs.last().unwrap(), 80);
        assert_eq!(
            outcome.statistics().incumbent_updates,
            recorder.costs.len() as u64
        );
    }

    #[test]
    fn test_solver_state_is_clean_across_solves() {
        let mut solver = BnbSolver::new();
        let first = solver
            .solve(&reference_matrix(), &mut NoOpMonitor::new())
            .unwrap();
        let second = solver
            .solve(&reference_matrix(), &mut NoOpMonitor::new())
            .unwrap();

        assert_eq!(
            first.result().tour().unwrap().total_cost(),
            second.result().tour().unwrap().total_cost()
        );
    }
}
