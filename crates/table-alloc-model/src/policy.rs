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

//! # Booking Policy
//!
//! Per-site rules that shape availability: how long a booking lasts by
//! default, how long before closing the last booking may start, how many
//! spare seats a party may be seated with, which party sizes are accepted
//! and how far ahead (or how short-notice) bookings are taken.

use crate::err::PolicyBuildError;
use crate::table::PartySize;
use chrono::{Days, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use table_alloc_core::duration::BookingDuration;
use table_alloc_core::slot::SLOT_MINUTES;

/// Largest accepted upward scaling.
pub const MAX_UPWARD_SCALING: u8 = 5;
/// Largest accepted minimum party size.
pub const MAX_MIN_PARTY: u16 = 20;
/// Largest accepted maximum party size.
pub const MAX_MAX_PARTY: u16 = 50;

/// Number of spare seats tolerated when matching a party to a table.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UpwardScaling(u8);

impl UpwardScaling {
    pub const NONE: UpwardScaling = UpwardScaling(0);

    #[inline]
    pub fn new(seats: u8) -> Result<Self, PolicyBuildError> {
        if seats > MAX_UPWARD_SCALING {
            return Err(PolicyBuildError::ScalingOutOfRange(seats));
        }
        Ok(UpwardScaling(seats))
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for UpwardScaling {
    fn default() -> Self {
        UpwardScaling(2)
    }
}

impl Display for UpwardScaling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{}", self.0)
    }
}

impl TryFrom<u8> for UpwardScaling {
    type Error = PolicyBuildError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        UpwardScaling::new(value)
    }
}

impl From<UpwardScaling> for u8 {
    fn from(scaling: UpwardScaling) -> Self {
        scaling.0
    }
}

/// How much notice a public booking needs.
///
/// On the wire a value of `1..=3` counts whole days, anything else counts
/// minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum AdvanceNotice {
    /// Bookings close at midnight, this many days ahead of now.
    Days(u8),
    /// Bookings close this many minutes ahead of now.
    Minutes(u16),
}

impl AdvanceNotice {
    const MAX_DAYS: u16 = 3;

    /// The earliest instant a public booking may start at, seen from `now`.
    pub fn last_permitted_instant(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            AdvanceNotice::Days(days) => now
                .date()
                .checked_add_days(Days::new(days as u64))
                .unwrap_or(now.date())
                .and_time(chrono::NaiveTime::MIN),
            AdvanceNotice::Minutes(minutes) => now + TimeDelta::minutes(minutes as i64),
        }
    }
}

impl Default for AdvanceNotice {
    fn default() -> Self {
        AdvanceNotice::Days(1)
    }
}

impl From<u16> for AdvanceNotice {
    fn from(value: u16) -> Self {
        match value {
            1..=Self::MAX_DAYS => AdvanceNotice::Days(value as u8),
            minutes => AdvanceNotice::Minutes(minutes),
        }
    }
}

impl From<AdvanceNotice> for u16 {
    fn from(notice: AdvanceNotice) -> Self {
        match notice {
            AdvanceNotice::Days(d) => d as u16,
            AdvanceNotice::Minutes(m) => m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BookingPolicyRepr", into = "BookingPolicyRepr")]
pub struct BookingPolicy {
    default_duration: BookingDuration,
    closing_buffer_minutes: u16,
    upward_scaling: UpwardScaling,
    min_party: PartySize,
    max_party: PartySize,
    early_booking_days: u16,
    advance_notice: AdvanceNotice,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct BookingPolicyRepr {
    default_duration: BookingDuration,
    closing_buffer_minutes: u16,
    upward_scaling: u8,
    min_party: PartySize,
    max_party: PartySize,
    early_booking_days: u16,
    advance_notice: AdvanceNotice,
}

impl TryFrom<BookingPolicyRepr> for BookingPolicy {
    type Error = PolicyBuildError;

    fn try_from(repr: BookingPolicyRepr) -> Result<Self, Self::Error> {
        BookingPolicyBuilder::new()
            .default_duration(repr.default_duration)
            .closing_buffer_minutes(repr.closing_buffer_minutes)
            .upward_scaling(repr.upward_scaling)
            .party_bounds(repr.min_party, repr.max_party)
            .early_booking_days(repr.early_booking_days)
            .advance_notice(repr.advance_notice)
            .build()
    }
}

impl From<BookingPolicy> for BookingPolicyRepr {
    fn from(p: BookingPolicy) -> Self {
        Self {
            default_duration: p.default_duration,
            closing_buffer_minutes: p.closing_buffer_minutes,
            upward_scaling: p.upward_scaling.value(),
            min_party: p.min_party,
            max_party: p.max_party,
            early_booking_days: p.early_booking_days,
            advance_notice: p.advance_notice,
        }
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            default_duration: BookingDuration::TWO_HOURS,
            closing_buffer_minutes: 60,
            upward_scaling: UpwardScaling::default(),
            min_party: PartySize::MIN,
            max_party: PartySize::new(6).unwrap_or(PartySize::MIN),
            early_booking_days: 90,
            advance_notice: AdvanceNotice::default(),
        }
    }
}

impl BookingPolicy {
    #[inline]
    pub fn builder() -> BookingPolicyBuilder {
        BookingPolicyBuilder::new()
    }

    #[inline]
    pub fn default_duration(&self) -> BookingDuration {
        self.default_duration
    }

    /// Minutes before closing after which no booking may start.
    #[inline]
    pub fn closing_buffer_minutes(&self) -> u16 {
        self.closing_buffer_minutes
    }

    #[inline]
    pub fn upward_scaling(&self) -> UpwardScaling {
        self.upward_scaling
    }

    #[inline]
    pub fn min_party(&self) -> PartySize {
        self.min_party
    }

    #[inline]
    pub fn max_party(&self) -> PartySize {
        self.max_party
    }

    #[inline]
    pub fn accepts_party(&self, party: PartySize) -> bool {
        self.min_party <= party && party <= self.max_party
    }

    #[inline]
    pub fn early_booking_days(&self) -> u16 {
        self.early_booking_days
    }

    /// The last date bookings are taken for, seen from `today`.
    #[inline]
    pub fn early_booking_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(self.early_booking_days as u64))
            .unwrap_or(NaiveDate::MAX)
    }

    #[inline]
    pub fn advance_notice(&self) -> AdvanceNotice {
        self.advance_notice
    }
}

/// Builder for [`BookingPolicy`]. Unset fields keep their defaults.
#[derive(Debug, Clone)]
pub struct BookingPolicyBuilder {
    default_duration: BookingDuration,
    closing_buffer_minutes: u16,
    upward_scaling: u8,
    min_party: PartySize,
    max_party: PartySize,
    early_booking_days: u16,
    advance_notice: AdvanceNotice,
}

impl Default for BookingPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingPolicyBuilder {
    pub fn new() -> Self {
        let defaults = BookingPolicy::default();
        Self {
            default_duration: defaults.default_duration,
            closing_buffer_minutes: defaults.closing_buffer_minutes,
            upward_scaling: defaults.upward_scaling.value(),
            min_party: defaults.min_party,
            max_party: defaults.max_party,
            early_booking_days: defaults.early_booking_days,
            advance_notice: defaults.advance_notice,
        }
    }

    pub fn default_duration(mut self, duration: BookingDuration) -> Self {
        self.default_duration = duration;
        self
    }

    pub fn closing_buffer_minutes(mut self, minutes: u16) -> Self {
        self.closing_buffer_minutes = minutes;
        self
    }

    pub fn upward_scaling(mut self, seats: u8) -> Self {
        self.upward_scaling = seats;
        self
    }

    pub fn party_bounds(mut self, min: PartySize, max: PartySize) -> Self {
        self.min_party = min;
        self.max_party = max;
        self
    }

    pub fn early_booking_days(mut self, days: u16) -> Self {
        self.early_booking_days = days;
        self
    }

    pub fn advance_notice(mut self, notice: AdvanceNotice) -> Self {
        self.advance_notice = notice;
        self
    }

    pub fn build(self) -> Result<BookingPolicy, PolicyBuildError> {
        let upward_scaling = UpwardScaling::new(self.upward_scaling)?;
        if self.closing_buffer_minutes % SLOT_MINUTES != 0 {
            return Err(PolicyBuildError::ClosingBufferNotAligned(
                self.closing_buffer_minutes,
            ));
        }
        if self.min_party.value() > MAX_MIN_PARTY {
            return Err(PolicyBuildError::MinPartyTooLarge(self.min_party));
        }
        if self.max_party.value() > MAX_MAX_PARTY {
            return Err(PolicyBuildError::MaxPartyTooLarge(self.max_party));
        }
        if self.min_party > self.max_party {
            return Err(PolicyBuildError::PartyBoundsInverted {
                min: self.min_party,
                max: self.max_party,
            });
        }
        Ok(BookingPolicy {
            default_duration: self.default_duration,
            closing_buffer_minutes: self.closing_buffer_minutes,
            upward_scaling,
            min_party: self.min_party,
            max_party: self.max_party,
            early_booking_days: self.early_booking_days,
            advance_notice: self.advance_notice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(n: u16) -> PartySize {
        PartySize::new(n).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let policy = BookingPolicy::default();
        assert_eq!(policy.default_duration(), BookingDuration::TWO_HOURS);
        assert_eq!(policy.closing_buffer_minutes(), 60);
        assert_eq!(policy.upward_scaling().value(), 2);
        assert_eq!(policy.min_party(), party(1));
        assert_eq!(policy.max_party(), party(6));
        assert_eq!(policy.early_booking_days(), 90);
        assert_eq!(policy.advance_notice(), AdvanceNotice::Days(1));
    }

    #[test]
    fn test_builder_rejects_bad_scaling() {
        let err = BookingPolicy::builder().upward_scaling(6).build().unwrap_err();
        assert_eq!(err, PolicyBuildError::ScalingOutOfRange(6));
    }

    #[test]
    fn test_builder_rejects_inverted_bounds() {
        let err = BookingPolicy::builder()
            .party_bounds(party(8), party(4))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            PolicyBuildError::PartyBoundsInverted {
                min: party(8),
                max: party(4)
            }
        );
    }

    #[test]
    fn test_builder_rejects_unaligned_buffer() {
        let err = BookingPolicy::builder()
            .closing_buffer_minutes(50)
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyBuildError::ClosingBufferNotAligned(50));
    }

    #[test]
    fn test_builder_rejects_large_parties() {
        let err = BookingPolicy::builder()
            .party_bounds(party(21), party(30))
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyBuildError::MinPartyTooLarge(party(21)));
        let err = BookingPolicy::builder()
            .party_bounds(party(1), party(51))
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyBuildError::MaxPartyTooLarge(party(51)));
    }

    #[test]
    fn test_advance_notice_in_days_lands_on_midnight() {
        let now = at(2021, 6, 14, 15, 20);
        assert_eq!(
            AdvanceNotice::Days(1).last_permitted_instant(now),
            at(2021, 6, 15, 0, 0)
        );
        assert_eq!(
            AdvanceNotice::Days(3).last_permitted_instant(now),
            at(2021, 6, 17, 0, 0)
        );
    }

    #[test]
    fn test_advance_notice_in_minutes_is_relative_to_now() {
        let now = at(2021, 6, 14, 15, 20);
        assert_eq!(
            AdvanceNotice::Minutes(30).last_permitted_instant(now),
            at(2021, 6, 14, 15, 50)
        );
        assert_eq!(
            AdvanceNotice::Minutes(720).last_permitted_instant(now),
            at(2021, 6, 15, 3, 20)
        );
    }

    #[test]
    fn test_advance_notice_wire_format() {
        assert_eq!(AdvanceNotice::from(2), AdvanceNotice::Days(2));
        assert_eq!(AdvanceNotice::from(30), AdvanceNotice::Minutes(30));
        assert_eq!(AdvanceNotice::from(0), AdvanceNotice::Minutes(0));
        assert_eq!(u16::from(AdvanceNotice::Days(3)), 3);
    }

    #[test]
    fn test_early_booking_date() {
        let today = NaiveDate::from_ymd_opt(2021, 6, 14).unwrap();
        let policy = BookingPolicy::default();
        assert_eq!(
            policy.early_booking_date(today),
            NaiveDate::from_ymd_opt(2021, 9, 12).unwrap()
        );
    }

    #[test]
    fn test_serde_validates() {
        let json = serde_json::to_string(&BookingPolicy::default()).unwrap();
        let back: BookingPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BookingPolicy::default());
        let bad = json.replace("\"upward_scaling\":2", "\"upward_scaling\":9");
        assert!(serde_json::from_str::<BookingPolicy>(&bad).is_err());
    }
}
