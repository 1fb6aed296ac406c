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

//! # Slot Sets
//!
//! A `SlotSet` is a bit-packed set of the quarter hours of one day. It backs
//! the per-table timetables: removing a booking's run, testing that a
//! candidate start has a free run ahead of it, and intersecting with the
//! bookable window are all single word operations.

use crate::primitives::Interval;
use crate::slot::{SLOTS_PER_DAY, TimeSlot};
use std::fmt::{self, Debug, Display};
use std::iter::FusedIterator;

/// A set of [`TimeSlot`]s within a single day.
///
/// ```
/// use table_alloc_core::slot::TimeSlot;
/// use table_alloc_core::slotset::SlotSet;
///
/// let noon = TimeSlot::from_hm(12, 0).unwrap();
/// let mut set = SlotSet::between(noon, TimeSlot::from_hm(13, 0).unwrap());
/// assert_eq!(set.len(), 5);
/// set.remove_all(SlotSet::run(noon, 2));
/// assert_eq!(set.first(), TimeSlot::from_hm(12, 30));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotSet {
    bits: u128,
}

impl SlotSet {
    const WORD_BITS: usize = u128::BITS as usize;
    const DAY_MASK: u128 = Self::hi_mask(SLOTS_PER_DAY);

    #[inline]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub const fn full_day() -> Self {
        Self {
            bits: Self::DAY_MASK,
        }
    }

    #[inline(always)]
    const fn hi_mask(end: usize) -> u128 {
        if end == 0 {
            0
        } else if end >= Self::WORD_BITS {
            !0
        } else {
            (!0u128) >> (Self::WORD_BITS - end)
        }
    }

    #[inline(always)]
    const fn lo_mask(start: usize) -> u128 {
        if start >= Self::WORD_BITS {
            0
        } else {
            (!0u128) << start
        }
    }

    #[inline(always)]
    const fn range_mask(start: usize, end: usize) -> u128 {
        Self::lo_mask(start) & Self::hi_mask(end)
    }

    /// Builds the set of slot indices in `indices`, clamped to the day.
    #[inline]
    pub fn from_interval(indices: Interval<usize>) -> Self {
        match indices.clamp(&Interval::new(0, SLOTS_PER_DAY)) {
            Some(clamped) => Self {
                bits: Self::range_mask(clamped.start(), clamped.end()),
            },
            None => Self::empty(),
        }
    }

    /// The `len` consecutive slots starting at `start`.
    ///
    /// Slots that would fall past midnight are dropped.
    #[inline]
    pub fn run(start: TimeSlot, len: usize) -> Self {
        Self::from_interval(Interval::new(start.index(), start.index() + len))
    }

    /// All slots from `first` through `last`, both inclusive.
    #[inline]
    pub fn between(first: TimeSlot, last: TimeSlot) -> Self {
        if first > last {
            return Self::empty();
        }
        Self::from_interval(Interval::new(first.index(), last.index() + 1))
    }

    #[inline(always)]
    fn bit(slot: TimeSlot) -> u128 {
        1u128 << slot.index()
    }

    #[inline]
    pub fn contains(&self, slot: TimeSlot) -> bool {
        self.bits & Self::bit(slot) != 0
    }

    /// Inserts `slot`, returning `true` if it was not present.
    #[inline]
    pub fn insert(&mut self, slot: TimeSlot) -> bool {
        let was_absent = !self.contains(slot);
        self.bits |= Self::bit(slot);
        was_absent
    }

    /// Removes `slot`, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, slot: TimeSlot) -> bool {
        let was_present = self.contains(slot);
        self.bits &= !Self::bit(slot);
        was_present
    }

    #[inline]
    pub fn remove_all(&mut self, other: SlotSet) {
        self.bits &= !other.bits;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    #[inline]
    pub fn intersection(self, other: SlotSet) -> SlotSet {
        SlotSet {
            bits: self.bits & other.bits,
        }
    }

    #[inline]
    pub fn union(self, other: SlotSet) -> SlotSet {
        SlotSet {
            bits: self.bits | other.bits,
        }
    }

    #[inline]
    pub fn is_superset(&self, other: SlotSet) -> bool {
        other.bits & !self.bits == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn first(&self) -> Option<TimeSlot> {
        if self.bits == 0 {
            return None;
        }
        TimeSlot::from_index(self.bits.trailing_zeros() as usize)
    }

    #[inline]
    pub fn last(&self) -> Option<TimeSlot> {
        if self.bits == 0 {
            return None;
        }
        TimeSlot::from_index(Self::WORD_BITS - 1 - self.bits.leading_zeros() as usize)
    }

    /// Keeps only the slots for which `keep` returns `true`.
    ///
    /// Slots are visited in ascending order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(TimeSlot) -> bool,
    {
        for slot in self.iter() {
            if !keep(slot) {
                self.remove(slot);
            }
        }
    }

    #[inline]
    pub fn iter(&self) -> SlotSetIter {
        SlotSetIter { bits: self.bits }
    }
}

/// Ascending iterator over the slots of a [`SlotSet`].
#[derive(Debug, Clone)]
pub struct SlotSetIter {
    bits: u128,
}

impl Iterator for SlotSetIter {
    type Item = TimeSlot;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.bits != 0 {
            let ix = self.bits.trailing_zeros() as usize;
            self.bits &= self.bits - 1;
            if let Some(slot) = TimeSlot::from_index(ix) {
                return Some(slot);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl FusedIterator for SlotSetIter {}

impl IntoIterator for SlotSet {
    type Item = TimeSlot;
    type IntoIter = SlotSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &SlotSet {
    type Item = TimeSlot;
    type IntoIter = SlotSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<TimeSlot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        let mut set = SlotSet::empty();
        set.extend(iter);
        set
    }
}

impl Extend<TimeSlot> for SlotSet {
    fn extend<I: IntoIterator<Item = TimeSlot>>(&mut self, iter: I) {
        for slot in iter {
            self.insert(slot);
        }
    }
}

impl Debug for SlotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Display for SlotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, slot) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, "}}")
    }
}
