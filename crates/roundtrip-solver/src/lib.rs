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

//! Roundtrip-Solver: exact solvers for the Asymmetric TSP
//!
//! Three independent strategies compute provably minimal Hamiltonian
//! cycles over a `roundtrip_model::matrix::DistanceMatrix`:
//!
//! - `brute_force`: exhaustive lexicographic permutation sweep. The
//!   trusted oracle for small instances.
//! - `held_karp`: bitmask dynamic programming over (visited-set, vertex)
//!   states with successor-based path reconstruction.
//! - `bnb`: best-first branch-and-bound over arena-allocated search nodes,
//!   pruned by a vertex-local lower bound against the incumbent.
//!
//! No solver depends on another; each owns its working tables for the
//! duration of a solve and leaves the matrix untouched.
//!
//! Module map
//! - `arena`, `node`, `visit`: search-state representation for the
//!   branch-and-bound engine.
//! - `eval`: the cycle cost evaluator shared by solvers and tests.
//! - `monitor`: observation and termination control (time limit, node
//!   limit, logging, composition).
//! - `result`, `stats`, `error`: outcomes, counters, and fail-fast
//!   precondition errors.
//! - `num`: the `SolverNumeric` trait alias.

pub mod arena;
pub mod bnb;
pub mod brute_force;
pub mod error;
pub mod eval;
pub mod held_karp;
pub mod monitor;
pub mod node;
pub mod num;
pub mod result;
pub mod stats;
pub mod visit;
