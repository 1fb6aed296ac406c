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

use crate::id::{BookingId, SiteId, TableId};
use crate::table::PartySize;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use table_alloc_core::duration::BookingDuration;
use table_alloc_core::slot::TimeSlot;
use table_alloc_core::slotset::SlotSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// A booking already held by a site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExistingBooking {
    id: BookingId,
    site: SiteId,
    tables: Vec<TableId>,
    start: NaiveDateTime,
    duration: BookingDuration,
    party: PartySize,
    status: BookingStatus,
}

impl ExistingBooking {
    /// A confirmed booking.
    pub fn confirmed(
        id: BookingId,
        site: SiteId,
        tables: Vec<TableId>,
        start: NaiveDateTime,
        duration: BookingDuration,
        party: PartySize,
    ) -> Self {
        Self {
            id,
            site,
            tables,
            start,
            duration,
            party,
            status: BookingStatus::Confirmed,
        }
    }

    #[inline]
    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn id(&self) -> BookingId {
        self.id
    }

    #[inline]
    pub fn site(&self) -> SiteId {
        self.site
    }

    #[inline]
    pub fn tables(&self) -> &[TableId] {
        &self.tables
    }

    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    #[inline]
    pub fn duration(&self) -> BookingDuration {
        self.duration
    }

    #[inline]
    pub fn party(&self) -> PartySize {
        self.party
    }

    #[inline]
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    #[inline]
    pub fn occupies(&self, table: TableId) -> bool {
        self.tables.contains(&table)
    }

    /// The slots a finite booking holds its tables for.
    ///
    /// Empty for all-day bookings and for start times off the slot grid.
    pub fn occupied_slots(&self) -> SlotSet {
        match TimeSlot::try_from(self.start.time()) {
            Ok(start) => SlotSet::run(start, self.duration.slot_count()),
            Err(_) => SlotSet::empty(),
        }
    }

    pub fn reschedule(
        &mut self,
        tables: Vec<TableId>,
        start: NaiveDateTime,
        duration: BookingDuration,
        party: PartySize,
    ) {
        self.tables = tables;
        self.start = start;
        self.duration = duration;
        self.party = party;
    }

    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }
}

impl Display for ExistingBooking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Booking({}, {} for {}, party {}, tables {:?}, {:?})",
            self.id.value(),
            self.start,
            self.duration,
            self.party,
            self.tables.iter().map(|t| t.value()).collect::<Vec<_>>(),
            self.status
        )
    }
}
