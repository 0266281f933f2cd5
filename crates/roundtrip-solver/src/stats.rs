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

use roundtrip_core::num::{constants::Zero, ops::SaturatingAddVal};
use std::time::Duration;

/// Statistics collected during a brute-force sweep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BruteForceStatistics {
    /// Total tour candidates evaluated.
    pub tours_evaluated: u64,
    /// Candidates skipped because a required edge was absent.
    pub tours_skipped: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl BruteForceStatistics {
    #[inline]
    pub fn on_tour_evaluated(&mut self) {
        self.tours_evaluated = self.tours_evaluated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_tour_skipped(&mut self) {
        self.tours_skipped = self.tours_skipped.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for BruteForceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Brute Force Statistics:")?;
        writeln!(f, "  Tours evaluated: {}", self.tours_evaluated)?;
        writeln!(f, "  Tours skipped:   {}", self.tours_skipped)?;
        writeln!(f, "  Total time:      {:.2?}", self.time_total)?;
        Ok(())
    }
}

/// Statistics collected during a Held-Karp solve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeldKarpStatistics {
    /// Distinct (visited-set, vertex) states computed.
    pub states_computed: u64,
    /// Recursion calls answered from the memo table.
    pub memo_hits: u64,
    /// Total entries allocated per table.
    pub table_entries: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl HeldKarpStatistics {
    #[inline]
    pub fn on_state_computed(&mut self) {
        self.states_computed = self.states_computed.saturating_add_val(1);
    }

    #[inline]
    pub fn on_memo_hit(&mut self) {
        self.memo_hits = self.memo_hits.saturating_add_val(1);
    }

    #[inline]
    pub fn set_table_entries(&mut self, entries: u64) {
        self.table_entries = entries;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for HeldKarpStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Held-Karp Statistics:")?;
        writeln!(f, "  States computed: {}", self.states_computed)?;
        writeln!(f, "  Memo hits:       {}", self.memo_hits)?;
        writeln!(f, "  Table entries:   {}", self.table_entries)?;
        writeln!(f, "  Total time:      {:.2?}", self.time_total)?;
        Ok(())
    }
}

/// Statistics collected during a branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Nodes popped from the frontier and expanded (or discarded).
    pub nodes_expanded: u64,
    /// Child nodes generated during expansion.
    pub children_generated: u64,
    /// Nodes discarded because their bound could not beat the incumbent,
    /// either when popped or before insertion.
    pub prunings_bound: u64,
    /// Children discarded because a required edge was absent.
    pub prunings_infeasible: u64,
    /// Times the incumbent tour was improved.
    pub incumbent_updates: u64,
    /// The largest frontier size observed. The frontier has no inherent
    /// growth bound, so this is the number to watch on hard instances.
    pub max_frontier_len: u64,
    /// The deepest node level reached.
    pub max_depth: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The bound of the root node. Together with the incumbent cost this
    /// frames the optimality gap of an aborted run.
    pub root_lower_bound: T,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            nodes_expanded: 0,
            children_generated: 0,
            prunings_bound: 0,
            prunings_infeasible: 0,
            incumbent_updates: 0,
            max_frontier_len: 0,
            max_depth: 0,
            time_total: Duration::ZERO,
            root_lower_bound: T::ZERO,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add_val(1);
    }

    #[inline]
    pub fn on_child_generated(&mut self) {
        self.children_generated = self.children_generated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add_val(1);
    }

    #[inline]
    pub fn on_incumbent_update(&mut self) {
        self.incumbent_updates = self.incumbent_updates.saturating_add_val(1);
    }

    #[inline]
    pub fn on_frontier_len(&mut self, len: u64) {
        self.max_frontier_len = self.max_frontier_len.max(len);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Branch-and-Bound Statistics:")?;
        writeln!(f, "  Nodes expanded:        {}", self.nodes_expanded)?;
        writeln!(f, "  Children generated:    {}", self.children_generated)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Incumbent updates:     {}", self.incumbent_updates)?;
        writeln!(f, "  Max frontier size:     {}", self.max_frontier_len)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Root lower bound:      {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}
