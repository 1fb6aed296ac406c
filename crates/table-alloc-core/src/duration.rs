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

//! Booking durations.

use crate::slot::SLOT_MINUTES;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationNotAlignedError {
    minutes: u16,
}

impl DurationNotAlignedError {
    #[inline]
    pub fn minutes(&self) -> u16 {
        self.minutes
    }
}

impl Display for DurationNotAlignedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "booking duration of {} minutes is not a multiple of {} minutes",
            self.minutes, SLOT_MINUTES
        )
    }
}

impl std::error::Error for DurationNotAlignedError {}

/// How long a booking holds its tables.
///
/// `AllDay` reserves a table for the rest of the service day. It is stored
/// as `0` minutes on the wire.
///
/// ```
/// use table_alloc_core::duration::BookingDuration;
///
/// let d = BookingDuration::from_minutes(90).unwrap();
/// assert_eq!(d.slot_count(), 6);
/// assert_eq!(BookingDuration::from_minutes(0).unwrap(), BookingDuration::AllDay);
/// assert!(BookingDuration::from_minutes(50).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BookingDuration {
    AllDay,
    Minutes(u16),
}

impl BookingDuration {
    pub const ONE_HOUR: BookingDuration = BookingDuration::Minutes(60);
    pub const TWO_HOURS: BookingDuration = BookingDuration::Minutes(120);
    pub const THREE_HOURS: BookingDuration = BookingDuration::Minutes(180);
    pub const FOUR_HOURS: BookingDuration = BookingDuration::Minutes(240);

    pub fn from_minutes(minutes: u16) -> Result<Self, DurationNotAlignedError> {
        match minutes {
            0 => Ok(BookingDuration::AllDay),
            m if m % SLOT_MINUTES == 0 => Ok(BookingDuration::Minutes(m)),
            m => Err(DurationNotAlignedError { minutes: m }),
        }
    }

    /// Minutes held by the booking, `0` for `AllDay`.
    #[inline]
    pub fn minutes(self) -> u16 {
        match self {
            BookingDuration::AllDay => 0,
            BookingDuration::Minutes(m) => m,
        }
    }

    /// Number of consecutive slots a booking of this duration occupies.
    ///
    /// `AllDay` occupies no run of its own; it is handled as a whole-day
    /// claim by the timetable.
    #[inline]
    pub fn slot_count(self) -> usize {
        (self.minutes() / SLOT_MINUTES) as usize
    }

    #[inline]
    pub fn is_all_day(self) -> bool {
        matches!(self, BookingDuration::AllDay)
    }
}

impl TryFrom<u16> for BookingDuration {
    type Error = DurationNotAlignedError;

    #[inline]
    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        BookingDuration::from_minutes(minutes)
    }
}

impl From<BookingDuration> for u16 {
    #[inline]
    fn from(duration: BookingDuration) -> Self {
        duration.minutes()
    }
}

impl Display for BookingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingDuration::AllDay => write!(f, "all day"),
            BookingDuration::Minutes(m) if m % 60 == 0 => write!(f, "{}h", m / 60),
            BookingDuration::Minutes(m) => write!(f, "{}h{:02}m", m / 60, m % 60),
        }
    }
}
