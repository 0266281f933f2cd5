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

use crate::monitor::search_monitor::{PruneReason, SearchMonitor};
use crate::stats::BnbSolverStatistics;
use num_traits::{PrimInt, Signed};
use roundtrip_model::{matrix::DistanceMatrix, tour::Tour};
use std::time::{Duration, Instant};

/// Prints a progress table while the search runs.
#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<10} | {:<14} | {:<14} | {:<12}",
            "Elapsed", "Nodes", "Frontier", "Best Cost", "Pruned", "Incumbents"
        );
        println!("{}", "-".repeat(85));
    }

    #[inline(always)]
    fn log_line(&mut self, frontier_len: usize, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_cost_str = if let Some(cost) = &self.best_cost {
            format!("{}", cost)
        } else {
            "Inf".to_string()
        };

        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<10} | {:<14} | {:<14} | {:<12}",
            elapsed_field,
            stats.nodes_expanded,
            frontier_len,
            best_cost_str,
            stats.prunings_bound,
            stats.incumbent_updates
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &DistanceMatrix<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None; // Reset
        self.print_header();
    }

    fn on_step(&mut self, frontier_len: usize, statistics: &BnbSolverStatistics<T>) {
        if (statistics.nodes_expanded & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(frontier_len, statistics);
        }
    }

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(&mut self, tour: &Tour<T>, _statistics: &BnbSolverStatistics<T>) {
        self.best_cost = Some(tour.total_cost());
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {
        println!("{}", "-".repeat(85));
        println!("Search finished.");
    }
}
