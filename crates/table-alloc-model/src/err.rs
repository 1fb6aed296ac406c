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

use crate::id::TableId;
use crate::table::PartySize;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::fmt::Display;
use table_alloc_core::slot::{SlotNotAlignedError, TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSeatsError;

impl Display for ZeroSeatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a table must seat at least one guest")
    }
}

impl std::error::Error for ZeroSeatsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyPartyError;

impl Display for EmptyPartyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a party must have at least one guest")
    }
}

impl std::error::Error for EmptyPartyError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpeningAfterClosingError {
    opening: TimeSlot,
    closing: TimeSlot,
}

impl OpeningAfterClosingError {
    #[inline]
    pub fn new(opening: TimeSlot, closing: TimeSlot) -> Self {
        Self { opening, closing }
    }

    #[inline]
    pub fn opening(&self) -> TimeSlot {
        self.opening
    }

    #[inline]
    pub fn closing(&self) -> TimeSlot {
        self.closing
    }
}

impl Display for OpeningAfterClosingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "opening time {} is after closing time {}",
            self.opening, self.closing
        )
    }
}

impl std::error::Error for OpeningAfterClosingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleError {
    weekday: Weekday,
    source: OpeningAfterClosingError,
}

impl ScheduleError {
    #[inline]
    pub fn new(weekday: Weekday, source: OpeningAfterClosingError) -> Self {
        Self { weekday, source }
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid opening hours on {}: {}", self.weekday, self.source)
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyBuildError {
    ScalingOutOfRange(u8),
    MinPartyTooLarge(PartySize),
    MaxPartyTooLarge(PartySize),
    PartyBoundsInverted { min: PartySize, max: PartySize },
    ClosingBufferNotAligned(u16),
}

impl Display for PolicyBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use PolicyBuildError::*;
        match self {
            ScalingOutOfRange(s) => write!(f, "upward scaling {} is out of range", s),
            MinPartyTooLarge(p) => write!(f, "minimum party size {} is too large", p),
            MaxPartyTooLarge(p) => write!(f, "maximum party size {} is too large", p),
            PartyBoundsInverted { min, max } => write!(
                f,
                "minimum party size {} exceeds maximum party size {}",
                min, max
            ),
            ClosingBufferNotAligned(m) => write!(
                f,
                "closing buffer of {} minutes is not on a quarter hour",
                m
            ),
        }
    }
}

impl std::error::Error for PolicyBuildError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteBuildError {
    EmptyName,
    DuplicateTable(TableId),
}

impl Display for SiteBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteBuildError::EmptyName => write!(f, "site name must not be empty"),
            SiteBuildError::DuplicateTable(id) => write!(f, "table {} is listed twice", id),
        }
    }
}

impl std::error::Error for SiteBuildError {}

/// Reasons a booking request is refused before availability is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestValidationError {
    TimeNotOnSlot(SlotNotAlignedError),
    DateInPast {
        date: NaiveDate,
        today: NaiveDate,
    },
    PartySizeOutOfBounds {
        party: PartySize,
        min: PartySize,
        max: PartySize,
    },
    BeyondEarlyBooking {
        date: NaiveDate,
        latest: NaiveDate,
    },
    InsideAdvanceNotice {
        requested: NaiveDateTime,
        earliest: NaiveDateTime,
    },
    TimeOutsideOpeningHours {
        time: NaiveTime,
        opening: TimeSlot,
        closing: TimeSlot,
    },
}

impl Display for RequestValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RequestValidationError::*;
        match self {
            TimeNotOnSlot(e) => write!(f, "{}", e),
            DateInPast { date, today } => {
                write!(f, "{} is in the past (today is {})", date, today)
            }
            PartySizeOutOfBounds { party, min, max } => write!(
                f,
                "party of {} is outside the accepted range {}..={}",
                party, min, max
            ),
            BeyondEarlyBooking { date, latest } => write!(
                f,
                "{} is too far ahead, bookings are taken up to {}",
                date, latest
            ),
            InsideAdvanceNotice {
                requested,
                earliest,
            } => write!(
                f,
                "{} is too short notice, the earliest bookable time is {}",
                requested, earliest
            ),
            TimeOutsideOpeningHours {
                time,
                opening,
                closing,
            } => write!(
                f,
                "{} is outside of the opening hours {}-{}",
                time, opening, closing
            ),
        }
    }
}

impl std::error::Error for RequestValidationError {}

impl From<SlotNotAlignedError> for RequestValidationError {
    fn from(err: SlotNotAlignedError) -> Self {
        RequestValidationError::TimeNotOnSlot(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_error_exposes_source() {
        let opening = TimeSlot::from_hm(23, 0).unwrap();
        let closing = TimeSlot::from_hm(12, 0).unwrap();
        let err = ScheduleError::new(Weekday::Sat, OpeningAfterClosingError::new(opening, closing));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(
            err.to_string(),
            "invalid opening hours on Sat: opening time 23:00 is after closing time 12:00"
        );
    }

    #[test]
    fn test_party_bounds_message() {
        let err = RequestValidationError::PartySizeOutOfBounds {
            party: PartySize::new(9).unwrap(),
            min: PartySize::new(1).unwrap(),
            max: PartySize::new(6).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "party of 9 is outside the accepted range 1..=6"
        );
    }
}
