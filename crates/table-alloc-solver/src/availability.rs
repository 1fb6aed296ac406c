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

//! # Availability
//!
//! Reduces a populated timetable to the start slots a request can actually
//! use, then lists the slots at which some grouping of tables is free.
//!
//! A start slot survives for a table if it lies in the bookable window and
//! every slot of the booking's run that falls inside the day's grid is still
//! free. Run slots past the end of the grid are not required, so a booking
//! may run over closing time.
//!
//! Tables are matched greedily: for each capacity of a grouping, in order,
//! the first unused table (by id) of that capacity that qualifies is taken.
//! The first grouping that can be fully seated wins.

use crate::grid::TimeGrid;
use crate::party::{Grouping, PartyPlan};
use crate::timetable::{TableTimetable, Timetable};
use table_alloc_core::duration::BookingDuration;
use table_alloc_core::slot::TimeSlot;
use table_alloc_core::slotset::SlotSet;
use table_alloc_model::id::TableId;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    timetable: Timetable,
    duration: BookingDuration,
    slots: Vec<TimeSlot>,
}

impl Availability {
    pub fn reduce(
        mut timetable: Timetable,
        duration: BookingDuration,
        grid: &TimeGrid,
        plan: &PartyPlan,
    ) -> Self {
        let bookable = grid.bookable_slots();
        let grid_slots = grid.slots();
        let run_len = duration.slot_count();

        for (_, table) in timetable.iter_mut() {
            let free = table.available();
            table.available_mut().retain(|start| {
                bookable.contains(start)
                    && free.is_superset(SlotSet::run(start, run_len).intersection(grid_slots))
            });
        }

        let slots: Vec<TimeSlot> = grid_slots
            .iter()
            .filter(|&slot| {
                plan.groupings().iter().any(|grouping| {
                    first_fit(&timetable, grouping, |t| {
                        t.is_free_at(slot) && (!duration.is_all_day() || t.booking_count() == 0)
                    })
                    .is_some()
                })
            })
            .collect();

        debug!(
            available = slots.len(),
            first = ?slots.first().map(|s| s.to_string()),
            last = ?slots.last().map(|s| s.to_string()),
            "Reduced availability"
        );

        Self {
            timetable,
            duration,
            slots,
        }
    }

    /// Available start slots in ascending order.
    #[inline]
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    #[inline]
    pub fn is_available(&self, slot: TimeSlot) -> bool {
        self.slots.binary_search(&slot).is_ok()
    }

    /// The reduced timetable.
    #[inline]
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    #[inline]
    pub fn duration(&self) -> BookingDuration {
        self.duration
    }

    /// Tables for a booking starting at `slot`, empty if none fit.
    ///
    /// An all-day booking needs tables without any booking on the day; any
    /// other booking needs `slot` to be a usable start for each table.
    pub fn assign_tables(&self, slot: TimeSlot, plan: &PartyPlan) -> Vec<TableId> {
        let all_day = self.duration.is_all_day();
        plan.groupings()
            .iter()
            .find_map(|grouping| {
                first_fit(&self.timetable, grouping, |t| {
                    if all_day {
                        t.booking_count() == 0
                    } else {
                        t.is_free_at(slot)
                    }
                })
            })
            .unwrap_or_default()
    }
}

fn first_fit<F>(timetable: &Timetable, grouping: &Grouping, qualifies: F) -> Option<Vec<TableId>>
where
    F: Fn(&TableTimetable) -> bool,
{
    let mut chosen: Vec<TableId> = Vec::with_capacity(grouping.len());
    for &seats in grouping.capacities() {
        let (id, _) = timetable
            .iter()
            .find(|(id, t)| t.seats() == seats && !chosen.contains(id) && qualifies(*t))?;
        chosen.push(id);
    }
    Some(chosen)
}
