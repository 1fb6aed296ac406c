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

//! # Timetables
//!
//! Per-table free slots for one day. A timetable only tracks the tables a
//! party could be seated at; it starts with every slot of the grid free and
//! is then populated with the site's confirmed bookings.

use crate::grid::TimeGrid;
use crate::party::PartyPlan;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use table_alloc_core::slot::TimeSlot;
use table_alloc_core::slotset::SlotSet;
use table_alloc_model::booking::ExistingBooking;
use table_alloc_model::id::{BookingId, SiteId, TableId};
use table_alloc_model::table::{Seats, Table};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableTimetable {
    seats: Seats,
    available: SlotSet,
    booking_count: usize,
}

impl TableTimetable {
    #[inline]
    pub fn seats(&self) -> Seats {
        self.seats
    }

    #[inline]
    pub fn available(&self) -> SlotSet {
        self.available
    }

    /// Bookings holding this table on the day, whatever their length.
    #[inline]
    pub fn booking_count(&self) -> usize {
        self.booking_count
    }

    #[inline]
    pub fn is_free_at(&self, slot: TimeSlot) -> bool {
        self.available.contains(slot)
    }

    pub(crate) fn available_mut(&mut self) -> &mut SlotSet {
        &mut self.available
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    tables: BTreeMap<TableId, TableTimetable>,
}

impl Timetable {
    /// Creates a timetable for every table whose capacity appears in `plan`.
    pub fn build(tables: &[Table], plan: &PartyPlan, grid: &TimeGrid) -> Self {
        let capacities = plan.capacities();
        let tables: BTreeMap<_, _> = tables
            .iter()
            .filter(|t| capacities.contains(&t.seats()))
            .map(|t| {
                (
                    t.id(),
                    TableTimetable {
                        seats: t.seats(),
                        available: grid.slots(),
                        booking_count: 0,
                    },
                )
            })
            .collect();
        debug!(tables = tables.len(), "Built timetable");
        Self { tables }
    }

    /// Removes the slots held by the confirmed bookings of `site` on `date`.
    ///
    /// Bookings are applied in creation order. The booking `exclude` is
    /// skipped, as are tables the timetable does not track.
    pub fn populate<'b, I>(
        mut self,
        bookings: I,
        site: SiteId,
        date: NaiveDate,
        exclude: Option<BookingId>,
    ) -> Self
    where
        I: IntoIterator<Item = &'b ExistingBooking>,
    {
        let mut relevant: Vec<&ExistingBooking> = bookings
            .into_iter()
            .filter(|b| {
                b.is_confirmed()
                    && b.site() == site
                    && b.date() == date
                    && Some(b.id()) != exclude
            })
            .collect();
        relevant.sort_by_key(|b| b.id());

        let mut applied = 0usize;
        for booking in relevant {
            let run = booking.occupied_slots();
            for table_id in booking.tables() {
                let Some(entry) = self.tables.get_mut(table_id) else {
                    continue;
                };
                entry.booking_count += 1;
                if booking.duration().is_all_day() {
                    entry.available.clear();
                } else {
                    entry.available.remove_all(run);
                }
                applied += 1;
                trace!(
                    booking = booking.id().value(),
                    table = table_id.value(),
                    start = %booking.start(),
                    duration = %booking.duration(),
                    "Applied booking to table"
                );
            }
        }
        debug!(applied, "Populated timetable");
        self
    }

    #[inline]
    pub fn get(&self, table: TableId) -> Option<&TableTimetable> {
        self.tables.get(&table)
    }

    /// Tables in ascending id order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (TableId, &TableTimetable)> {
        self.tables.iter().map(|(id, t)| (*id, t))
    }

    #[inline]
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (TableId, &mut TableTimetable)> {
        self.tables.iter_mut().map(|(id, t)| (*id, t))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
