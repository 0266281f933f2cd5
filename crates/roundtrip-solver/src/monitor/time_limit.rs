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
use std::time::{Duration, Instant};

/// Terminates the search after a wall-clock time budget is spent.
///
/// The clock is only consulted every `clock_check_mask + 1` expanded nodes
/// to keep `Instant::now` out of the hot loop; the mask must be one less
/// than a power of two.
#[derive(Clone, Debug)]
pub struct TimeLimitMonitor {
    limit: Duration,
    start: Instant,
    clock_check_mask: u64,
}

impl TimeLimitMonitor {
    /// Creates a monitor enforcing the given time limit.
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            start: Instant::now(),
            clock_check_mask: 1023,
        }
    }

    /// Creates a monitor with a custom clock-check interval mask.
    pub fn with_check_mask(limit: Duration, clock_check_mask: u64) -> Self {
        debug_assert!(
            (clock_check_mask + 1).is_power_of_two(),
            "called `TimeLimitMonitor::with_check_mask` with a mask that is not one less than a power of two: {}",
            clock_check_mask
        );

        Self {
            limit,
            start: Instant::now(),
            clock_check_mask,
        }
    }

    /// Returns the configured limit.
    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &DistanceMatrix<T>) {
        self.start = Instant::now();
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        if statistics.nodes_expanded & self.clock_check_mask != 0 {
            return SearchCommand::Continue;
        }
        if self.start.elapsed() >= self.limit {
            return SearchCommand::Terminate(format!(
                "time limit of {:.2?} reached",
                self.limit
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
    fn test_elapsed_limit_terminates() {
        let mut monitor = TimeLimitMonitor::with_check_mask(Duration::ZERO, 0);
        let stats = BnbSolverStatistics::<i64>::default();
        let command = SearchMonitor::<i64>::search_command(&mut monitor, &stats);
        assert!(matches!(command, SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_generous_limit_continues() {
        let mut monitor = TimeLimitMonitor::with_check_mask(Duration::from_secs(3600), 0);
        let stats = BnbSolverStatistics::<i64>::default();
        let command = SearchMonitor::<i64>::search_command(&mut monitor, &stats);
        assert_eq!(command, SearchCommand::Continue);
    }
}
