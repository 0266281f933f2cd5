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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Phantom-typed wrappers around `usize` to prevent mixing indices from
//! different domains (e.g., graph vertices vs. search-arena nodes).
//! `TypedIndex<T>` carries a tag type `T: TypedIndexTag` that encodes intent
//! at the type level, while compiling down to a transparent `usize`.
//!
//! The search code juggles two index spaces at once: positions in the
//! distance matrix and slots in the branch-and-bound node arena. Raw `usize`
//! invites accidental swaps between the two; the phantom tag makes such a
//! swap a type error instead.
//!
//! ## Usage
//!
//! ```rust
//! use roundtrip_core::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct VertexTag;
//! impl TypedIndexTag for VertexTag { const NAME: &'static str = "VertexIndex"; }
//!
//! type VertexIndex = TypedIndex<VertexTag>;
//! let v = VertexIndex::new(3);
//! assert_eq!(v.get(), 3);
//! assert_eq!(format!("{}", v), "VertexIndex(3)");
//! ```

/// A trait to tag typed indices with a name for debugging and display
/// purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
///
/// This struct wraps a `usize` index and uses a phantom type parameter `T`
/// to provide type safety and prevent mixing indices of different domains.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roundtrip_core::index::{TypedIndex, TypedIndexTag};
    /// #
    /// # #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    /// # struct MyTag;
    /// # impl TypedIndexTag for MyTag { const NAME: &'static str = "MyIndex"; }
    /// type MyIndex = TypedIndex<MyTag>;
    ///
    /// let index = MyIndex::new(5);
    /// assert_eq!(index.get(), 5);
    /// ```
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Checks if the index is zero.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.index == 0
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(val: TypedIndex<T>) -> Self {
        val.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIndex";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_and_get() {
        let index = TestIndex::new(42);
        assert_eq!(index.get(), 42);
        assert!(!index.is_zero());
        assert!(TestIndex::new(0).is_zero());
    }

    #[test]
    fn test_display_and_debug_use_tag_name() {
        let index = TestIndex::new(7);
        assert_eq!(format!("{}", index), "TestIndex(7)");
        assert_eq!(format!("{:?}", index), "TestIndex(7)");
    }

    #[test]
    fn test_conversions() {
        let index: TestIndex = 9usize.into();
        let raw: usize = index.into();
        assert_eq!(raw, 9);
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        assert!(TestIndex::new(1) < TestIndex::new(2));
        assert_eq!(TestIndex::new(3), TestIndex::new(3));
    }
}
