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

/// A monitor that fans every callback out to a list of monitors.
///
/// `search_command` returns the first `Terminate` any child monitor
/// produces; the remaining monitors are not asked.
pub struct CompositeMonitor<T> {
    monitors: Vec<Box<dyn SearchMonitor<T>>>,
}

impl<T> CompositeMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Creates an empty composite monitor.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a monitor to the composite.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M) -> &mut Self
    where
        M: SearchMonitor<T> + 'static,
    {
        self.monitors.push(Box::new(monitor));
        self
    }

    /// Returns the number of registered monitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Checks whether no monitors are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<T> Default for CompositeMonitor<T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CompositeMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor(len: {})", self.monitors.len())
    }
}

impl<T> SearchMonitor<T> for CompositeMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, matrix: &DistanceMatrix<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(matrix);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        for monitor in &mut self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command(statistics) {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, frontier_len: usize, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_step(frontier_len, statistics);
        }
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_prune(reason, statistics);
        }
    }

    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(tour, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOpMonitor;

    #[test]
    fn test_composite_starts_empty() {
        let composite = CompositeMonitor::<i64>::new();
        assert!(composite.is_empty());
    }

    #[test]
    fn test_add_monitor() {
        let mut composite = CompositeMonitor::<i64>::new();
        composite.add_monitor(NoOpMonitor::new());
        composite.add_monitor(NoOpMonitor::new());
        assert_eq!(composite.len(), 2);
    }

    #[test]
    fn test_command_defaults_to_continue() {
        let mut composite = CompositeMonitor::<i64>::new();
        composite.add_monitor(NoOpMonitor::new());
        let stats = BnbSolverStatistics::default();
        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);
    }
}
