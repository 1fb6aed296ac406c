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

//! # Booking Stores
//!
//! `BookingStore` is the read side the allocator needs: the confirmed
//! bookings of a site on a date. `InMemoryBookingStore` adds the write side
//! and commits bookings while holding its write lock, re-running the
//! allocator against the locked state so that two concurrent requests can
//! never be given the same table.

use crate::allocator::Allocator;
use crate::clock::Clock;
use chrono::{NaiveDate, NaiveTime};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::Display;
use table_alloc_core::slot::TimeSlot;
use table_alloc_model::booking::ExistingBooking;
use table_alloc_model::err::RequestValidationError;
use table_alloc_model::id::{BookingId, SiteId};
use table_alloc_model::request::BookingRequest;
use table_alloc_model::site::Site;
use table_alloc_model::table::PartySize;
use table_alloc_model::validate::validate_request;
use tracing::{info, instrument, warn};

pub trait BookingStore {
    type Error: std::error::Error;

    /// Confirmed bookings of `site` on `date`, without `exclude`.
    fn confirmed_bookings(
        &self,
        site: SiteId,
        date: NaiveDate,
        exclude: Option<BookingId>,
    ) -> Result<Vec<ExistingBooking>, Self::Error>;
}

impl<S: BookingStore + ?Sized> BookingStore for &S {
    type Error = S::Error;

    #[inline]
    fn confirmed_bookings(
        &self,
        site: SiteId,
        date: NaiveDate,
        exclude: Option<BookingId>,
    ) -> Result<Vec<ExistingBooking>, Self::Error> {
        (**self).confirmed_bookings(site, date, exclude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotUnavailableError {
    date: NaiveDate,
    slot: TimeSlot,
    party: PartySize,
}

impl SlotUnavailableError {
    #[inline]
    pub fn new(date: NaiveDate, slot: TimeSlot, party: PartySize) -> Self {
        Self { date, slot, party }
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    #[inline]
    pub fn party(&self) -> PartySize {
        self.party
    }
}

impl Display for SlotUnavailableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no tables for a party of {} on {} at {}",
            self.party, self.date, self.slot
        )
    }
}

impl std::error::Error for SlotUnavailableError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReserveError {
    Validation(RequestValidationError),
    SlotUnavailable(SlotUnavailableError),
    UnknownBooking(BookingId),
    NotConfirmed(BookingId),
}

impl Display for ReserveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReserveError::Validation(e) => write!(f, "{}", e),
            ReserveError::SlotUnavailable(e) => write!(f, "{}", e),
            ReserveError::UnknownBooking(id) => write!(f, "unknown booking {}", id),
            ReserveError::NotConfirmed(id) => write!(f, "booking {} is not confirmed", id),
        }
    }
}

impl std::error::Error for ReserveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReserveError::Validation(e) => Some(e),
            ReserveError::SlotUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RequestValidationError> for ReserveError {
    fn from(err: RequestValidationError) -> Self {
        ReserveError::Validation(err)
    }
}

impl From<SlotUnavailableError> for ReserveError {
    fn from(err: SlotUnavailableError) -> Self {
        ReserveError::SlotUnavailable(err)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    bookings: BTreeMap<BookingId, ExistingBooking>,
    next_id: u64,
}

impl StoreState {
    fn confirmed(
        &self,
        site: SiteId,
        date: NaiveDate,
        exclude: Option<BookingId>,
    ) -> Vec<ExistingBooking> {
        self.bookings
            .values()
            .filter(|b| {
                b.is_confirmed() && b.site() == site && b.date() == date && Some(b.id()) != exclude
            })
            .cloned()
            .collect()
    }

    fn fresh_id(&mut self) -> BookingId {
        self.next_id += 1;
        BookingId::new(self.next_id)
    }
}

/// Bookings held in memory behind a read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    state: RwLock<StoreState>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with existing bookings. New ids continue after the
    /// largest seeded id.
    pub fn with_bookings<I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = ExistingBooking>,
    {
        let bookings: BTreeMap<_, _> = bookings.into_iter().map(|b| (b.id(), b)).collect();
        let next_id = bookings.keys().next_back().map_or(0, |id| id.value());
        Self {
            state: RwLock::new(StoreState { bookings, next_id }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().bookings.is_empty()
    }

    pub fn get(&self, id: BookingId) -> Option<ExistingBooking> {
        self.state.read().bookings.get(&id).cloned()
    }

    /// Validates and commits a new booking at `time`.
    #[instrument(level = "info", skip_all, fields(site = site.id().value(), date = %request.date(), time = %time), err(Display))]
    pub fn reserve<C: Clock + ?Sized>(
        &self,
        site: &Site,
        request: BookingRequest,
        time: NaiveTime,
        clock: &C,
    ) -> Result<ExistingBooking, ReserveError> {
        let slot = validate_request(site, &request, time, clock.now())?;

        let mut state = self.state.write();
        let snapshot = state.confirmed(site.id(), request.date(), request.exclude());
        let allocator = Allocator::new(site, request, snapshot, clock);
        let tables = allocator.tables(slot);
        if tables.is_empty() {
            warn!(party = request.party().value(), "Slot no longer available");
            return Err(SlotUnavailableError::new(request.date(), slot, request.party()).into());
        }

        let id = state.fresh_id();
        let booking = ExistingBooking::confirmed(
            id,
            site.id(),
            tables,
            request.date().and_time(slot.to_naive_time()),
            allocator.duration(),
            request.party(),
        );
        state.bookings.insert(id, booking.clone());
        info!(booking = id.value(), tables = ?booking.tables(), "Reserved");
        Ok(booking)
    }

    /// Moves an existing booking, ignoring its own tables while checking.
    ///
    /// All-day bookings start at the earliest bookable slot of the day.
    #[instrument(level = "info", skip_all, fields(booking = id.value(), date = %request.date(), time = %time), err(Display))]
    pub fn rebook<C: Clock + ?Sized>(
        &self,
        site: &Site,
        id: BookingId,
        request: BookingRequest,
        time: NaiveTime,
        clock: &C,
    ) -> Result<ExistingBooking, ReserveError> {
        let request = request.excluding(id);
        let slot = validate_request(site, &request, time, clock.now())?;

        let mut state = self.state.write();
        match state.bookings.get(&id) {
            None => return Err(ReserveError::UnknownBooking(id)),
            Some(b) if !b.is_confirmed() => return Err(ReserveError::NotConfirmed(id)),
            Some(_) => {}
        }

        let snapshot = state.confirmed(site.id(), request.date(), request.exclude());
        let allocator = Allocator::new(site, request, snapshot, clock);
        let tables = allocator.tables(slot);
        if tables.is_empty() {
            warn!(party = request.party().value(), "Slot not available for move");
            return Err(SlotUnavailableError::new(request.date(), slot, request.party()).into());
        }

        let start = if allocator.duration().is_all_day() {
            allocator.min_bookable()
        } else {
            slot
        };
        let duration = allocator.duration();
        let booking = state
            .bookings
            .get_mut(&id)
            .ok_or(ReserveError::UnknownBooking(id))?;
        booking.reschedule(
            tables,
            request.date().and_time(start.to_naive_time()),
            duration,
            request.party(),
        );
        info!(tables = ?booking.tables(), start = %booking.start(), "Rebooked");
        Ok(booking.clone())
    }

    /// Cancels a booking, releasing its tables.
    pub fn cancel(&self, id: BookingId) -> Result<ExistingBooking, ReserveError> {
        let mut state = self.state.write();
        let booking = state
            .bookings
            .get_mut(&id)
            .ok_or(ReserveError::UnknownBooking(id))?;
        if !booking.is_confirmed() {
            return Err(ReserveError::NotConfirmed(id));
        }
        booking.cancel();
        info!(booking = id.value(), "Cancelled");
        Ok(booking.clone())
    }
}

impl BookingStore for InMemoryBookingStore {
    type Error = Infallible;

    fn confirmed_bookings(
        &self,
        site: SiteId,
        date: NaiveDate,
        exclude: Option<BookingId>,
    ) -> Result<Vec<ExistingBooking>, Self::Error> {
        Ok(self.state.read().confirmed(site, date, exclude))
    }
}
