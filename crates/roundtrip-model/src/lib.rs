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

//! Roundtrip-Model: problem instances for the Asymmetric TSP
//!
//! This crate defines the immutable data a solver consumes and the solution
//! it produces:
//!
//! - `matrix`: the `DistanceMatrix` (dense, row-major, possibly asymmetric
//!   edge costs) and its builder, plus the log-space tour-count
//!   `Complexity`.
//! - `cost`: `EdgeCost<T>`, a sentinel-encoded optional edge cost. Absent
//!   edges ("no direct connection") are a first-class state instead of a
//!   magic value smuggled through the cost domain.
//! - `tour`: the validated `Tour<T>` solution type, anchored at the fixed
//!   start vertex.
//! - `index`: the strongly typed `VertexIndex`.
//! - `loading`: a loader for the whitespace-token instance format (leading
//!   vertex count, then the row-major matrix).
//!
//! A matrix is constructed once, validated up front, and shared read-only
//! with every solver; solvers never mutate problem data.

pub mod cost;
pub mod index;
pub mod loading;
pub mod matrix;
pub mod tour;
