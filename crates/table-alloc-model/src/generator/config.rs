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

use super::err::SiteGenConfigBuildError;
use crate::policy::BookingPolicy;
use crate::schedule::WeeklySchedule;
use rand::Rng;
use std::fmt::Display;
use table_alloc_core::duration::BookingDuration;

/// Configuration for synthetic sites and their bookings.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteGenConfig {
    pub(crate) tables: usize,
    pub(crate) seat_choices: Vec<u16>,
    pub(crate) bookings_per_table: f64,
    pub(crate) durations: Vec<BookingDuration>,
    pub(crate) all_day_probability: f64,
    pub(crate) schedule: WeeklySchedule,
    pub(crate) policy: BookingPolicy,
    pub(crate) seed: u64,
}

impl Default for SiteGenConfig {
    fn default() -> Self {
        Self {
            tables: 12,
            seat_choices: vec![2, 2, 2, 4, 4, 4, 6, 6, 8],
            bookings_per_table: 1.5,
            durations: vec![
                BookingDuration::ONE_HOUR,
                BookingDuration::Minutes(90),
                BookingDuration::TWO_HOURS,
                BookingDuration::THREE_HOURS,
            ],
            all_day_probability: 0.02,
            schedule: WeeklySchedule::default(),
            policy: BookingPolicy::default(),
            seed: 42,
        }
    }
}

impl SiteGenConfig {
    #[inline]
    pub fn builder() -> SiteGenConfigBuilder {
        SiteGenConfigBuilder::default()
    }

    #[inline]
    pub fn tables(&self) -> usize {
        self.tables
    }

    #[inline]
    pub fn seat_choices(&self) -> &[u16] {
        &self.seat_choices
    }

    /// Mean number of bookings per table and day.
    #[inline]
    pub fn bookings_per_table(&self) -> f64 {
        self.bookings_per_table
    }

    #[inline]
    pub fn durations(&self) -> &[BookingDuration] {
        &self.durations
    }

    #[inline]
    pub fn all_day_probability(&self) -> f64 {
        self.all_day_probability
    }

    #[inline]
    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    #[inline]
    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for SiteGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SiteGenConfig {{ tables: {}, seat_choices: {:?}, bookings_per_table: {:.2}, \
             durations: {:?}, all_day_probability: {:.3}, seed: {} }}",
            self.tables,
            self.seat_choices,
            self.bookings_per_table,
            self.durations.iter().map(|d| d.minutes()).collect::<Vec<_>>(),
            self.all_day_probability,
            self.seed
        )
    }
}

/// Builder for `SiteGenConfig`.
#[derive(Debug, Clone)]
pub struct SiteGenConfigBuilder {
    tables: usize,
    seat_choices: Vec<u16>,
    bookings_per_table: f64,
    durations: Vec<BookingDuration>,
    all_day_probability: f64,
    schedule: WeeklySchedule,
    policy: BookingPolicy,
    seed: u64,
}

impl Default for SiteGenConfigBuilder {
    fn default() -> Self {
        let defaults = SiteGenConfig::default();
        Self {
            tables: defaults.tables,
            seat_choices: defaults.seat_choices,
            bookings_per_table: defaults.bookings_per_table,
            durations: defaults.durations,
            all_day_probability: defaults.all_day_probability,
            schedule: defaults.schedule,
            policy: defaults.policy,
            seed: rand::rng().random(),
        }
    }
}

impl SiteGenConfigBuilder {
    pub fn tables(mut self, tables: usize) -> Self {
        self.tables = tables;
        self
    }

    pub fn seat_choices(mut self, seats: impl Into<Vec<u16>>) -> Self {
        self.seat_choices = seats.into();
        self
    }

    pub fn bookings_per_table(mut self, lambda: f64) -> Self {
        self.bookings_per_table = lambda;
        self
    }

    pub fn durations(mut self, durations: impl Into<Vec<BookingDuration>>) -> Self {
        self.durations = durations.into();
        self
    }

    pub fn all_day_probability(mut self, p: f64) -> Self {
        self.all_day_probability = p;
        self
    }

    pub fn schedule(mut self, schedule: WeeklySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<SiteGenConfig, SiteGenConfigBuildError> {
        if self.seat_choices.is_empty() {
            return Err(SiteGenConfigBuildError::EmptySeatChoices);
        }
        if self.seat_choices.contains(&0) {
            return Err(SiteGenConfigBuildError::ZeroSeatChoice);
        }
        if self.durations.is_empty() {
            return Err(SiteGenConfigBuildError::EmptyDurations);
        }
        if !(self.bookings_per_table > 0.0 && self.bookings_per_table.is_finite()) {
            return Err(SiteGenConfigBuildError::NonPositiveLambda(
                self.bookings_per_table,
            ));
        }
        if !(0.0..=1.0).contains(&self.all_day_probability) {
            return Err(SiteGenConfigBuildError::ProbabilityOutOfRange(
                self.all_day_probability,
            ));
        }
        Ok(SiteGenConfig {
            tables: self.tables,
            seat_choices: self.seat_choices,
            bookings_per_table: self.bookings_per_table,
            durations: self.durations,
            all_day_probability: self.all_day_probability,
            schedule: self.schedule,
            policy: self.policy,
            seed: self.seed,
        })
    }
}
