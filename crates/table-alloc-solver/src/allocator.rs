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

//! # Allocator
//!
//! Answers availability questions for one request. Construction is cheap:
//! it normalizes the party and fixes the time grid. The timetable is built,
//! populated and reduced on the first query and reused afterwards, so any
//! query may be asked first.

use crate::availability::Availability;
use crate::clock::Clock;
use crate::grid::TimeGrid;
use crate::party::PartyPlan;
use crate::store::BookingStore;
use crate::timetable::Timetable;
use std::cell::OnceCell;
use table_alloc_core::duration::BookingDuration;
use table_alloc_core::slot::TimeSlot;
use table_alloc_model::booking::ExistingBooking;
use table_alloc_model::id::TableId;
use table_alloc_model::request::BookingRequest;
use table_alloc_model::site::Site;
use tracing::{debug, instrument};

pub struct Allocator<'s> {
    site: &'s Site,
    request: BookingRequest,
    duration: BookingDuration,
    plan: PartyPlan,
    grid: TimeGrid,
    bookings: Vec<ExistingBooking>,
    availability: OnceCell<Availability>,
}

impl<'s> Allocator<'s> {
    /// Creates an allocator over a snapshot of the site's bookings.
    #[instrument(level = "debug", skip_all, fields(site = site.id().value(), date = %request.date(), party = request.party().value()))]
    pub fn new<C: Clock + ?Sized>(
        site: &'s Site,
        request: BookingRequest,
        bookings: Vec<ExistingBooking>,
        clock: &C,
    ) -> Self {
        let policy = site.policy();
        let duration = request.effective_duration(policy);
        let plan = PartyPlan::normalize(request.party(), &site.capacities(), policy.upward_scaling());
        let grid = TimeGrid::build(site, request.date(), request.channel(), clock);
        debug!(
            groupings = plan.groupings().len(),
            %duration,
            bookings = bookings.len(),
            "Created allocator"
        );
        Self {
            site,
            request,
            duration,
            plan,
            grid,
            bookings,
            availability: OnceCell::new(),
        }
    }

    /// Creates an allocator reading the confirmed bookings from `store`.
    pub fn from_store<S, C>(
        site: &'s Site,
        request: BookingRequest,
        store: &S,
        clock: &C,
    ) -> Result<Self, S::Error>
    where
        S: BookingStore + ?Sized,
        C: Clock + ?Sized,
    {
        let bookings = store.confirmed_bookings(site.id(), request.date(), request.exclude())?;
        Ok(Self::new(site, request, bookings, clock))
    }

    #[inline]
    pub fn site(&self) -> &Site {
        self.site
    }

    #[inline]
    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    #[inline]
    pub fn duration(&self) -> BookingDuration {
        self.duration
    }

    #[inline]
    pub fn plan(&self) -> &PartyPlan {
        &self.plan
    }

    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// The reduced availability, computed on first use.
    pub fn availability(&self) -> &Availability {
        self.availability.get_or_init(|| {
            let timetable = Timetable::build(self.site.tables(), &self.plan, &self.grid).populate(
                &self.bookings,
                self.site.id(),
                self.request.date(),
                self.request.exclude(),
            );
            Availability::reduce(timetable, self.duration, &self.grid, &self.plan)
        })
    }

    /// Start slots at which the party can be seated, ascending.
    #[inline]
    pub fn available_time_slots(&self) -> &[TimeSlot] {
        self.availability().slots()
    }

    /// Whether tables can be assigned for a booking starting at `slot`.
    #[inline]
    pub fn is_time_slot_available(&self, slot: TimeSlot) -> bool {
        !self.tables(slot).is_empty()
    }

    /// Tables to seat the party at `slot`. Empty means the slot cannot be
    /// booked and the caller must not commit.
    pub fn tables(&self, slot: TimeSlot) -> Vec<TableId> {
        let tables = self.availability().assign_tables(slot, &self.plan);
        debug!(%slot, tables = ?tables.iter().map(|t| t.value()).collect::<Vec<_>>(), "Assigned tables");
        tables
    }

    /// Earliest start slot of the day.
    #[inline]
    pub fn min_bookable(&self) -> TimeSlot {
        self.grid.min_bookable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};
    use table_alloc_model::id::{BookingId, SiteId};
    use table_alloc_model::policy::{AdvanceNotice, BookingPolicy};
    use table_alloc_model::request::Channel;
    use table_alloc_model::table::{PartySize, Seats};

    fn s(h: u32, m: u32) -> TimeSlot {
        TimeSlot::from_hm(h, m).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 14).unwrap()
    }

    fn future() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 17).unwrap()
    }

    fn now(h: u32, m: u32) -> FixedClock {
        FixedClock::new(today().and_hms_opt(h, m, 0).unwrap())
    }

    fn site_with(tables: &[u16], scaling: u8) -> Site {
        let policy = BookingPolicy::builder()
            .upward_scaling(scaling)
            .advance_notice(AdvanceNotice::Minutes(30))
            .build()
            .unwrap();
        let mut builder = Site::builder(SiteId::new(1), "Harbour").policy(policy);
        for (ix, &seats) in tables.iter().enumerate() {
            let id = ix as u64 + 1;
            builder = builder.table(TableId::new(id), format!("T{id}"), Seats::new(seats).unwrap());
        }
        builder.build().unwrap()
    }

    fn request(date: NaiveDate, party: u16) -> BookingRequest {
        BookingRequest::new(date, PartySize::new(party).unwrap())
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    fn range(from: TimeSlot, to: TimeSlot) -> Vec<TimeSlot> {
        TimeSlot::range_inclusive(from, to).collect()
    }

    #[test]
    fn test_open_day_for_exact_and_split_parties() {
        let site = site_with(&[2, 6], 2);
        for party in [6, 7] {
            let allocator = Allocator::new(&site, request(future(), party), vec![], &now(10, 0));
            assert_eq!(allocator.available_time_slots(), range(s(12, 0), s(22, 0)));
        }
    }

    #[test]
    fn test_booked_table_blocks_overlapping_starts() {
        let site = site_with(&[2, 6], 2);
        let booked = ExistingBooking::confirmed(
            BookingId::new(1),
            SiteId::new(1),
            vec![TableId::new(2)],
            at(future(), 14, 0),
            BookingDuration::FOUR_HOURS,
            PartySize::new(6).unwrap(),
        );
        let req = request(future(), 5).with_duration(BookingDuration::THREE_HOURS);
        let allocator = Allocator::new(&site, req, vec![booked], &now(10, 0));
        assert_eq!(allocator.available_time_slots(), range(s(18, 0), s(22, 0)));
    }

    #[test]
    fn test_infeasible_party_yields_nothing() {
        let site = site_with(&[2, 6], 0);
        let allocator = Allocator::new(&site, request(future(), 9), vec![], &now(10, 0));
        assert!(allocator.available_time_slots().is_empty());
        assert!(allocator.tables(s(12, 0)).is_empty());
        assert!(!allocator.is_time_slot_available(s(12, 0)));
    }

    #[test]
    fn test_tables_can_be_asked_first() {
        let site = site_with(&[2, 6, 6], 2);
        let allocator = Allocator::new(&site, request(future(), 12), vec![], &now(10, 0));
        assert_eq!(
            allocator.tables(s(20, 0)),
            vec![TableId::new(2), TableId::new(3)]
        );
        assert!(allocator.is_time_slot_available(s(22, 0)));
        assert!(!allocator.is_time_slot_available(s(22, 15)));
    }

    #[test]
    fn test_bookings_on_other_dates_do_not_matter() {
        let site = site_with(&[2, 4, 6], 2);
        let today_booking = ExistingBooking::confirmed(
            BookingId::new(1),
            SiteId::new(1),
            vec![TableId::new(1)],
            at(today(), 18, 0),
            BookingDuration::TWO_HOURS,
            PartySize::new(2).unwrap(),
        );
        let allocator =
            Allocator::new(&site, request(future(), 8), vec![today_booking], &now(10, 0));
        assert_eq!(allocator.available_time_slots(), range(s(12, 0), s(22, 0)));
    }

    #[test]
    fn test_same_day_public_respects_notice() {
        let site = site_with(&[2, 6], 2);
        let allocator = Allocator::new(&site, request(today(), 2), vec![], &now(12, 5));
        assert_eq!(allocator.min_bookable(), s(12, 45));
        assert_eq!(allocator.available_time_slots(), range(s(12, 45), s(22, 0)));
    }

    #[test]
    fn test_same_day_staff_books_from_now() {
        let site = site_with(&[2, 6], 2);
        let req = request(today(), 2).via(Channel::Staff);
        let allocator = Allocator::new(&site, req, vec![], &now(12, 5));
        assert_eq!(allocator.available_time_slots(), range(s(12, 15), s(22, 0)));
    }

    #[test]
    fn test_late_evening_notice_wraps_to_opening() {
        let site = site_with(&[2, 6], 2);
        let allocator = Allocator::new(&site, request(today(), 2), vec![], &now(23, 20));
        assert_eq!(allocator.min_bookable(), s(12, 0));
        assert_eq!(allocator.available_time_slots(), range(s(12, 0), s(22, 0)));
    }

    #[test]
    fn test_excluded_booking_frees_its_table() {
        let site = site_with(&[6], 0);
        let booked = ExistingBooking::confirmed(
            BookingId::new(4),
            SiteId::new(1),
            vec![TableId::new(1)],
            at(future(), 19, 0),
            BookingDuration::TWO_HOURS,
            PartySize::new(6).unwrap(),
        );
        let allocator =
            Allocator::new(&site, request(future(), 6), vec![booked.clone()], &now(10, 0));
        assert!(!allocator.is_time_slot_available(s(19, 0)));

        let moving = request(future(), 6).excluding(BookingId::new(4));
        let allocator = Allocator::new(&site, moving, vec![booked], &now(10, 0));
        assert!(allocator.is_time_slot_available(s(19, 0)));
    }

    #[test]
    fn test_slot_at_max_bookable_with_short_duration() {
        let site = site_with(&[2], 0);
        let req = request(future(), 2).with_duration(BookingDuration::Minutes(15));
        let allocator = Allocator::new(&site, req, vec![], &now(10, 0));
        assert_eq!(allocator.available_time_slots().last(), Some(&s(22, 0)));
    }

    #[test]
    fn test_availability_is_computed_once() {
        let site = site_with(&[2, 6], 2);
        let allocator = Allocator::new(&site, request(future(), 2), vec![], &now(10, 0));
        let first = allocator.availability() as *const Availability;
        let _ = allocator.tables(s(12, 0));
        let second = allocator.availability() as *const Availability;
        assert_eq!(first, second);
    }
}
