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

use num_traits::Signed;
use roundtrip_core::num::constants;

/// An edge cost that may be absent.
///
/// Instead of using `Option<T>`, this type uses a sentinel encoding to avoid
/// the additional discriminant that `Option` typically introduces for integer
/// types. The distance matrix is read in every inner loop of every solver;
/// keeping each entry to a single machine word improves cache locality and
/// memory traffic over a dense n×n table.
///
/// Encoding:
/// - Non-negative values (>= 0) represent a concrete edge cost.
/// - Negative values (<= -1) are reserved to indicate "no direct edge".
///
/// This convention assumes valid edge costs are non-negative, which the
/// bound estimation of the branch-and-bound solver requires anyway. Code
/// must only ever *compare* against the absent state (via `is_none` /
/// `into_option`), never feed the raw sentinel into cost arithmetic.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeCost<T>(T)
where
    T: Signed;

impl<T> EdgeCost<T>
where
    T: Copy + Signed + constants::MinusOne,
{
    const NONE_SENTINEL: T = T::MINUS_ONE;

    /// Creates an `EdgeCost` from an `Option<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roundtrip_model::cost::EdgeCost;
    ///
    /// let cost = EdgeCost::from_option(Some(5i64));
    /// assert!(cost.is_some());
    /// assert_eq!(cost.raw(), 5);
    /// ```
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => EdgeCost(v),
            None => EdgeCost(Self::NONE_SENTINEL),
        }
    }

    /// Creates an `EdgeCost` from a raw value.
    /// Any negative value is treated as "no edge".
    #[inline]
    pub const fn from_raw(value: T) -> Self {
        EdgeCost(value)
    }

    /// Creates an `EdgeCost` representing a present edge.
    ///
    /// # Panics
    ///
    /// This function will panic if the provided value is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roundtrip_model::cost::EdgeCost;
    ///
    /// let cost = EdgeCost::some(12i64);
    /// assert_eq!(cost.into_option(), Some(12));
    /// ```
    pub fn some(value: T) -> Self
    where
        T: PartialOrd + std::fmt::Display,
    {
        assert!(
            value > Self::NONE_SENTINEL,
            "called `EdgeCost::some` with a negative value: {}",
            value
        );

        EdgeCost(value)
    }

    /// Creates an `EdgeCost` representing "no direct edge".
    #[inline]
    pub fn none() -> Self {
        EdgeCost(Self::NONE_SENTINEL)
    }

    /// Checks if this `EdgeCost` represents "no direct edge".
    #[inline]
    pub fn is_none(&self) -> bool
    where
        T: PartialOrd,
    {
        self.0 <= Self::NONE_SENTINEL
    }

    /// Checks if this `EdgeCost` represents a present edge.
    #[inline]
    pub fn is_some(&self) -> bool
    where
        T: PartialOrd,
    {
        !self.is_none()
    }

    /// Returns the raw value, including the sentinel if absent.
    #[inline]
    pub fn raw(&self) -> T {
        self.0
    }

    /// Converts this `EdgeCost` back into an `Option<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roundtrip_model::cost::EdgeCost;
    ///
    /// let present = EdgeCost::from_option(Some(4i64));
    /// assert_eq!(present.into_option(), Some(4));
    ///
    /// let absent: EdgeCost<i64> = EdgeCost::none();
    /// assert_eq!(absent.into_option(), None);
    /// ```
    #[inline]
    pub fn into_option(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        if self.is_none() { None } else { Some(self.0) }
    }

    /// Unwraps the `EdgeCost`, panicking if the edge is absent.
    ///
    /// # Panics
    ///
    /// Panics if called on an `EdgeCost` that represents "no direct edge".
    pub fn unwrap(&self) -> T
    where
        T: PartialOrd,
    {
        if self.is_none() {
            panic!("called `EdgeCost::unwrap()` on an absent edge")
        }
        self.0
    }

    /// Unwraps the `EdgeCost`, returning a default value if the edge is
    /// absent.
    #[inline]
    pub fn unwrap_or(&self, default: T) -> T
    where
        T: PartialOrd,
    {
        if self.is_none() { default } else { self.0 }
    }
}

impl<T> std::fmt::Debug for EdgeCost<T>
where
    T: Copy + Signed + PartialOrd + constants::MinusOne + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "EdgeCost(None)")
        } else {
            write!(f, "EdgeCost(Some({:?}))", self.0)
        }
    }
}

impl<T> std::fmt::Display for EdgeCost<T>
where
    T: Copy + Signed + PartialOrd + constants::MinusOne + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "EdgeCost(None)")
        } else {
            write!(f, "EdgeCost({})", self.0)
        }
    }
}

impl<T> From<Option<T>> for EdgeCost<T>
where
    T: Copy + Signed + constants::MinusOne,
{
    #[inline]
    fn from(value: Option<T>) -> Self {
        EdgeCost::from_option(value)
    }
}

impl<T> From<EdgeCost<T>> for Option<T>
where
    T: Copy + Signed + PartialOrd + constants::MinusOne,
{
    #[inline]
    fn from(val: EdgeCost<T>) -> Self {
        val.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_some_and_none_roundtrip() {
        let present = EdgeCost::from_option(Some(7i64));
        assert!(present.is_some());
        assert_eq!(present.into_option(), Some(7));

        let absent: EdgeCost<i64> = EdgeCost::none();
        assert!(absent.is_none());
        assert_eq!(absent.into_option(), None);
    }

    #[test]
    fn test_from_raw_treats_negative_as_absent() {
        let absent = EdgeCost::from_raw(-1i64);
        assert!(absent.is_none());
        let deeply_negative = EdgeCost::from_raw(-42i64);
        assert!(deeply_negative.is_none());
        let zero = EdgeCost::from_raw(0i64);
        assert!(zero.is_some());
    }

    #[test]
    #[should_panic(expected = "called `EdgeCost::some` with a negative value")]
    fn test_some_panics_on_negative() {
        let _ = EdgeCost::some(-3i64);
    }

    #[test]
    #[should_panic(expected = "called `EdgeCost::unwrap()` on an absent edge")]
    fn test_unwrap_panics_on_absent() {
        let absent: EdgeCost<i64> = EdgeCost::none();
        let _ = absent.unwrap();
    }

    #[test]
    fn test_unwrap_or_default() {
        let absent: EdgeCost<i64> = EdgeCost::none();
        assert_eq!(absent.unwrap_or(0), 0);
        assert_eq!(EdgeCost::some(9i64).unwrap_or(0), 9);
    }
}
