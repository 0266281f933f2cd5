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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for the solver components. `SolverNumeric`
//! collects the integer capabilities the solvers rely on into a single
//! alias: intrinsic traits (`PrimInt`, `Signed`), the `-1`/`0` constants
//! used by the sentinel encodings, and by-value saturating/checked addition
//! for cost accumulation with predictable overflow semantics.
//!
//! These are usually the signed integer types `i8`, `i16`, `i32`, `i64`
//! and `isize`. `i128` is intentionally excluded for performance reasons.

use std::hash::Hash;

use num_traits::{PrimInt, Signed};
use roundtrip_core::num::{
    constants::{MinusOne, Zero},
    ops::{CheckedAddVal, SaturatingAddVal},
};

/// A trait alias for numeric types that can be used in the solvers.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + std::fmt::Debug
    + std::fmt::Display
    + MinusOne
    + Zero
    + SaturatingAddVal
    + CheckedAddVal
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + std::fmt::Debug
        + std::fmt::Display
        + MinusOne
        + Zero
        + SaturatingAddVal
        + CheckedAddVal
        + Send
        + Sync
        + Hash
{
}
