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

//! # Table Allocation Solver (`table-alloc-solver`)
//!
//! Computes when a party can be seated at a site and which tables it gets.
//! An `Allocator` runs one request through four stages:
//!
//! 1. `party`: the party size becomes a `PartyPlan` of table groupings.
//! 2. `grid`: the site's hours and the clock give the day's `TimeGrid`.
//! 3. `timetable`: each candidate table's free slots, minus the confirmed
//!    bookings of the day.
//! 4. `availability`: the free slots are reduced to valid start slots and
//!    tables are assigned greedily.
//!
//! `store` holds the `BookingStore` seam the allocator reads bookings
//! through and an in-memory store that commits bookings under a lock.

pub mod allocator;
pub mod availability;
pub mod clock;
pub mod grid;
pub mod party;
pub mod store;
pub mod timetable;

pub mod prelude {
    pub use crate::allocator::Allocator;
    pub use crate::availability::Availability;
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::grid::TimeGrid;
    pub use crate::party::{Grouping, PartyPlan};
    pub use crate::store::{BookingStore, InMemoryBookingStore, ReserveError, SlotUnavailableError};
    pub use crate::timetable::{TableTimetable, Timetable};
}
