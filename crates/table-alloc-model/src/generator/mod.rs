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

mod config;
mod err;

pub use config::{SiteGenConfig, SiteGenConfigBuilder};
pub use err::SiteGenConfigBuildError;

use crate::{
    booking::ExistingBooking,
    err::SiteBuildError,
    id::{BookingId, SiteId, TableId},
    site::Site,
    table::{PartySize, Seats},
};
use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Poisson};
use table_alloc_core::{duration::BookingDuration, slot::TimeSlot, slotset::SlotSet};

/// Generates synthetic sites and a plausible day of bookings for them.
///
/// Bookings never overlap on a table, so a generated day can always be fed
/// into the timetable as if it had been booked through the allocator.
pub struct SiteGenerator {
    config: SiteGenConfig,
    rng: SmallRng,
    next_booking_id: u64,
}

impl From<SiteGenConfig> for SiteGenerator {
    fn from(config: SiteGenConfig) -> Self {
        Self::new(config)
    }
}

impl SiteGenerator {
    pub fn new(config: SiteGenConfig) -> Self {
        let seed = config.seed();
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            next_booking_id: 1,
        }
    }

    #[inline]
    pub fn config(&self) -> &SiteGenConfig {
        &self.config
    }

    #[inline]
    fn fresh_booking_id(&mut self) -> BookingId {
        let id = self.next_booking_id;
        self.next_booking_id += 1;
        BookingId::new(id)
    }

    #[inline]
    fn pick<T: Copy>(&mut self, choices: &[T]) -> Option<T> {
        if choices.is_empty() {
            return None;
        }
        let ix = self.rng.random_range(0..choices.len());
        choices.get(ix).copied()
    }

    pub fn generate_site(&mut self, id: SiteId, name: &str) -> Result<Site, SiteBuildError> {
        let seat_choices = self.config.seat_choices().to_vec();
        let mut builder = Site::builder(id, name)
            .schedule(*self.config.schedule())
            .policy(*self.config.policy());
        for ix in 0..self.config.tables() {
            let seats = self
                .pick(&seat_choices)
                .and_then(|s| Seats::new(s).ok())
                .unwrap_or(Seats::MIN);
            let table_id = TableId::new(ix as u64 + 1);
            builder = builder.table(table_id, format!("T{}", ix + 1), seats);
        }
        builder.build()
    }

    /// Generates confirmed bookings for `site` on `date`.
    pub fn generate_bookings(&mut self, site: &Site, date: NaiveDate) -> Vec<ExistingBooking> {
        let hours = site.opening_hours(date);
        let policy = *site.policy();
        let last_start = hours
            .closing()
            .saturating_sub_minutes(policy.closing_buffer_minutes());
        if last_start < hours.opening() {
            return Vec::new();
        }
        let grid = hours.slots();
        let poisson = Poisson::new(self.config.bookings_per_table()).ok();
        let durations = self.config.durations().to_vec();

        let mut bookings = Vec::new();
        for table in site.tables() {
            let attempts = poisson
                .as_ref()
                .map(|p| p.sample(&mut self.rng) as usize)
                .unwrap_or(0);
            if attempts == 0 {
                continue;
            }
            let party_max = table.seats().value().min(policy.max_party().value());
            let party_min = policy.min_party().value().min(party_max);

            if self.rng.random_bool(self.config.all_day_probability()) {
                let start = date.and_time(hours.opening().to_naive_time());
                let party = self.party_between(party_min, party_max);
                let id = self.fresh_booking_id();
                bookings.push(ExistingBooking::confirmed(
                    id,
                    site.id(),
                    vec![table.id()],
                    start,
                    BookingDuration::AllDay,
                    party,
                ));
                continue;
            }

            let mut free = grid;
            for _ in 0..attempts {
                let Some(duration) = self.pick(&durations) else {
                    break;
                };
                let start_ix = self
                    .rng
                    .random_range(hours.opening().index()..=last_start.index());
                let Some(start) = TimeSlot::from_index(start_ix) else {
                    continue;
                };
                let run = SlotSet::run(start, duration.slot_count()).intersection(grid);
                if !free.is_superset(run) {
                    continue;
                }
                free.remove_all(run);
                let party = self.party_between(party_min, party_max);
                let id = self.fresh_booking_id();
                bookings.push(ExistingBooking::confirmed(
                    id,
                    site.id(),
                    vec![table.id()],
                    date.and_time(start.to_naive_time()),
                    duration,
                    party,
                ));
            }
        }
        bookings
    }

    fn party_between(&mut self, min: u16, max: u16) -> PartySize {
        let guests = if min >= max {
            max
        } else {
            self.rng.random_range(min..=max)
        };
        PartySize::new(guests).unwrap_or(PartySize::MIN)
    }
}
