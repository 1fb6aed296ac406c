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

//! # Core Primitives
//!
//! Small, reusable building blocks shared by the slot algebra and the model.

use std::cmp::Ordering;

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so `[start, end)`
/// includes all values `x` such that `start <= x < end`.
///
/// # Examples
///
/// ```
/// use table_alloc_core::primitives::Interval;
/// let interval = Interval::new(1, 5);
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert_eq!(interval.clamp(&Interval::new(0, 3)), Some(Interval::new(1, 3)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T: Ord + Copy> Interval<T> {
    /// Creates a new half-open interval `[start, end)`.
    ///
    /// Bounds given in reverse order are swapped.
    ///
    /// ```
    /// use table_alloc_core::primitives::Interval;
    ///
    /// let interval = Interval::new(5, 3);
    /// assert_eq!(interval.start(), 3);
    /// assert_eq!(interval.end(), 5);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self {
        let (s, e) = match a.cmp(&b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        Self {
            start_inclusive: s,
            end_exclusive: e,
        }
    }

    #[inline]
    pub fn start(&self) -> T {
        self.start_inclusive
    }

    #[inline]
    pub fn end(&self) -> T {
        self.end_exclusive
    }

    /// Clamps this interval into `boundary`.
    ///
    /// Returns `None` when nothing of `self` lies inside `boundary`, which
    /// includes intervals that only touch it at an endpoint.
    #[inline]
    pub fn clamp(&self, boundary: &Self) -> Option<Self> {
        let start = self.start_inclusive.max(boundary.start_inclusive);
        let end = self.end_exclusive.min(boundary.end_exclusive);
        (start < end).then_some(Self {
            start_inclusive: start,
            end_exclusive: end,
        })
    }
}
