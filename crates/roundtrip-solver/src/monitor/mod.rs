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

//! Search monitors for the branch-and-bound solver.
//!
//! Monitors observe the search lifecycle and can stop it via
//! `SearchCommand`: the frontier of a best-first search has no inherent
//! growth bound, so long runs should carry a `NodeLimitMonitor` or
//! `TimeLimitMonitor` rather than trusting the instance to be easy.
//! Monitors compose via `CompositeMonitor` without touching solver logic.

pub mod composite;
pub mod log;
pub mod no_op;
pub mod node_limit;
pub mod search_monitor;
pub mod time_limit;

pub use composite::CompositeMonitor;
pub use log::LogMonitor;
pub use no_op::NoOpMonitor;
pub use node_limit::NodeLimitMonitor;
pub use search_monitor::{PruneReason, SearchCommand, SearchMonitor};
pub use time_limit::TimeLimitMonitor;
