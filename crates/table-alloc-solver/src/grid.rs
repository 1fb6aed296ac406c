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

//! # Time Grid
//!
//! The slots of one service day and the window within them in which a
//! booking may start. The grid is fixed when an allocator is created: the
//! clock is read once, so every later query sees the same window.

use crate::clock::Clock;
use chrono::{NaiveDate, NaiveDateTime};
use std::ops::RangeInclusive;
use table_alloc_core::slot::TimeSlot;
use table_alloc_core::slotset::SlotSet;
use table_alloc_model::request::Channel;
use table_alloc_model::schedule::OpeningHours;
use table_alloc_model::site::Site;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    date: NaiveDate,
    hours: OpeningHours,
    slots: SlotSet,
    min_bookable: TimeSlot,
    max_bookable: TimeSlot,
}

impl TimeGrid {
    /// Builds the grid of `site` on `date` as seen by `channel` at the
    /// clock's current time.
    pub fn build<C: Clock + ?Sized>(
        site: &Site,
        date: NaiveDate,
        channel: Channel,
        clock: &C,
    ) -> Self {
        let hours = site.opening_hours(date);
        let policy = site.policy();
        let max_bookable = hours
            .closing()
            .saturating_sub_minutes(policy.closing_buffer_minutes());

        let now = clock.now();
        let last_permitted = policy.advance_notice().last_permitted_instant(now);
        let min_bookable = if date == now.date() && last_permitted.date() == now.date() {
            let reference = match channel {
                Channel::Public => last_permitted,
                Channel::Staff => now,
            };
            same_day_start(reference, hours)
        } else {
            hours.opening()
        };

        debug!(
            %date,
            opening = %hours.opening(),
            closing = %hours.closing(),
            min_bookable = %min_bookable,
            max_bookable = %max_bookable,
            ?channel,
            "Built time grid"
        );

        Self {
            date,
            hours,
            slots: hours.slots(),
            min_bookable,
            max_bookable,
        }
    }

    /// Replaces the bookable window, keeping the slots of the day.
    pub fn with_bookable_window(mut self, min: TimeSlot, max: TimeSlot) -> Self {
        self.min_bookable = min;
        self.max_bookable = max;
        self
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn opening(&self) -> TimeSlot {
        self.hours.opening()
    }

    #[inline]
    pub fn closing(&self) -> TimeSlot {
        self.hours.closing()
    }

    /// Every slot from opening through closing.
    #[inline]
    pub fn slots(&self) -> SlotSet {
        self.slots
    }

    /// Earliest start, never before opening.
    #[inline]
    pub fn min_bookable(&self) -> TimeSlot {
        self.min_bookable
    }

    /// Latest start, the closing time less the closing buffer.
    #[inline]
    pub fn max_bookable(&self) -> TimeSlot {
        self.max_bookable
    }

    /// The inclusive window of start slots, `None` if it is empty.
    #[inline]
    pub fn bookable_range(&self) -> Option<RangeInclusive<TimeSlot>> {
        let min = self.min_bookable;
        (min <= self.max_bookable).then_some(min..=self.max_bookable)
    }

    /// The slots of the day a booking may start at.
    pub fn bookable_slots(&self) -> SlotSet {
        match self.bookable_range() {
            Some(range) => SlotSet::between(*range.start(), *range.end()).intersection(self.slots),
            None => SlotSet::empty(),
        }
    }

    #[inline]
    pub fn is_bookable(&self, slot: TimeSlot) -> bool {
        self.bookable_range().is_some_and(|r| r.contains(&slot))
    }
}

/// First start slot on the day of `reference`, no earlier than opening.
///
/// A reference time that rounds past midnight wraps to `00:00` and is
/// clamped to opening, leaving the whole day bookable.
fn same_day_start(reference: NaiveDateTime, hours: OpeningHours) -> TimeSlot {
    TimeSlot::ceil(reference.time()).max(hours.opening())
}
