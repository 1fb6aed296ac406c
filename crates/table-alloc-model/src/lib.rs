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

//! # Table Allocation Model (`table-alloc-model`)
//!
//! The data model of a restaurant booking system: sites with their tables,
//! weekly opening hours and booking policy, the bookings a site already
//! holds and the requests guests or staff make against it.
//!
//! ## Key Data Structures
//!
//! - **`Site`**: a restaurant, built through `SiteBuilder` or deserialized
//!   from JSON, holding its `Table`s, `WeeklySchedule` and `BookingPolicy`.
//! - **`BookingPolicy`**: default duration, closing buffer, upward scaling,
//!   accepted party sizes, early booking horizon and `AdvanceNotice`.
//! - **`ExistingBooking`**: a booking held by a site, with its tables,
//!   start, `BookingDuration` and `BookingStatus`.
//! - **`BookingRequest`**: date, party size, optional duration override,
//!   `Channel` and an optional booking to exclude when moving it.
//!
//! `validate_request` checks a request against the policy before any
//! availability is computed, and `generator::SiteGenerator` produces
//! synthetic sites and booking days for tests and benchmarks.

pub mod booking;
pub mod err;
pub mod generator;
pub mod id;
pub mod policy;
pub mod request;
pub mod schedule;
pub mod site;
pub mod table;
pub mod validate;

pub mod prelude {
    pub use crate::booking::{BookingStatus, ExistingBooking};
    pub use crate::err::{
        EmptyPartyError, OpeningAfterClosingError, PolicyBuildError, RequestValidationError,
        ScheduleError, SiteBuildError, ZeroSeatsError,
    };
    pub use crate::id::{BookingId, SiteId, TableId};
    pub use crate::policy::{AdvanceNotice, BookingPolicy, BookingPolicyBuilder, UpwardScaling};
    pub use crate::request::{BookingRequest, Channel};
    pub use crate::schedule::{OpeningHours, WeeklySchedule};
    pub use crate::site::{Site, SiteBuilder};
    pub use crate::table::{PartySize, Seats, Table};
    pub use crate::validate::validate_request;
}
