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

use crate::monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor};
use crate::stats::BnbSolverStatistics;
use num_traits::{PrimInt, Signed};
use roundtrip_model::{matrix::DistanceMatrix, tour::Tour};

/// Terminates the search after a fixed number of expanded nodes.
///
/// Node creation — and with it frontier and arena growth — is proportional
/// to expansions, so this monitor is the explicit memory cap for instances
/// where pruning cannot keep up with expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    max_nodes: u64,
}

impl NodeLimitMonitor {
    /// Creates a monitor that stops the search after `max_nodes` node
    /// expansions.
    #[inline]
    pub fn new(max_nodes: u64) -> Self {
        Self { max_nodes }
    }

    /// Returns the configured limit.
    #[inline]
    pub fn max_nodes(&self) -> u64 {
        self.max_nodes
    }
}

impl<T> SearchMonitor<T> for NodeLimitMonitor
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &DistanceMatrix<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        if statistics.nodes_expanded >= self.max_nodes {
            return SearchCommand::Terminate(format!(
                "node limit of {} expansions reached",
                self.max_nodes
            ));
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, _frontier_len: usize, _statistics: &BnbSolverStatistics<T>) {}

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(&mut self, _tour: &Tour<T>, _statistics: &BnbSolverStatistics<T>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_reached_terminates() {
        let mut monitor = NodeLimitMonitor::new(5);
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.nodes_expanded = 5;
        let command = SearchMonitor::<i64>::search_command(&mut monitor, &stats);
        assert!(matches!(command, SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_below_limit_continues() {
        let mut monitor = NodeLimitMonitor::new(5);
        let stats = BnbSolverStatistics::<i64>::default();
        let command = SearchMonitor::<i64>::search_command(&mut monitor, &stats);
        assert_eq!(command, SearchCommand::Continue);
    }
}
