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

//! # Time Slots
//!
//! A service day is cut into quarter hours. Every bookable start time, every
//! opening and closing time and every unit of table occupancy is one of the
//! 96 quarter hours of a day.
//!
//! - `TimeSlot`: a quarter-hour aligned time of day, `00:00` through `23:45`.
//! - `round_time`: rounds a clock time up to the next quarter hour.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Width of a single slot in minutes.
pub const SLOT_MINUTES: u16 = 15;

/// Number of slots in a day.
pub const SLOTS_PER_DAY: usize = 96;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotNotAlignedReason {
    NotOnQuarterHour,
    HasSeconds,
    OutOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotNotAlignedError {
    minutes: u32,
    reason: SlotNotAlignedReason,
}

impl SlotNotAlignedError {
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    #[inline]
    pub fn reason(&self) -> SlotNotAlignedReason {
        self.reason
    }
}

impl Display for SlotNotAlignedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SlotNotAlignedReason::NotOnQuarterHour => write!(
                f,
                "{} minutes past midnight is not a multiple of {} minutes",
                self.minutes, SLOT_MINUTES
            ),
            SlotNotAlignedReason::HasSeconds => write!(
                f,
                "time {} minutes past midnight carries seconds",
                self.minutes
            ),
            SlotNotAlignedReason::OutOfDay => write!(
                f,
                "{} minutes past midnight is outside of a day",
                self.minutes
            ),
        }
    }
}

impl std::error::Error for SlotNotAlignedError {}

/// A quarter-hour aligned time of day.
///
/// Internally the slot stores minutes past midnight, always a multiple of
/// [`SLOT_MINUTES`] and below [`MINUTES_PER_DAY`]. Slots serialize as
/// `"HH:MM:SS"` strings.
///
/// ```
/// use table_alloc_core::slot::TimeSlot;
///
/// let slot = TimeSlot::from_hm(18, 30).unwrap();
/// assert_eq!(slot.index(), 74);
/// assert_eq!(slot.to_string(), "18:30");
/// assert!(TimeSlot::from_hm(18, 20).is_none());
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "NaiveTime", into = "NaiveTime")]
pub struct TimeSlot(u16);

impl TimeSlot {
    pub const MIDNIGHT: TimeSlot = TimeSlot(0);
    pub const LAST: TimeSlot = TimeSlot(MINUTES_PER_DAY - SLOT_MINUTES);

    /// Creates a slot from minutes past midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, SlotNotAlignedError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SlotNotAlignedError {
                minutes: minutes as u32,
                reason: SlotNotAlignedReason::OutOfDay,
            });
        }
        if minutes % SLOT_MINUTES != 0 {
            return Err(SlotNotAlignedError {
                minutes: minutes as u32,
                reason: SlotNotAlignedReason::NotOnQuarterHour,
            });
        }
        Ok(TimeSlot(minutes))
    }

    #[inline]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Self::from_minutes((hour * 60 + minute) as u16).ok()
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SLOTS_PER_DAY).then(|| TimeSlot(index as u16 * SLOT_MINUTES))
    }

    /// Position of the slot within the day, `0..96`.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 / SLOT_MINUTES) as usize
    }

    #[inline]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u32 {
        (self.0 / 60) as u32
    }

    #[inline]
    pub const fn minute(self) -> u32 {
        (self.0 % 60) as u32
    }

    /// Adds `minutes`, returning `None` when the result leaves the day or is
    /// not on a quarter hour.
    #[inline]
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        self.0
            .checked_add(minutes)
            .and_then(|m| Self::from_minutes(m).ok())
    }

    /// Subtracts `minutes`, stopping at midnight.
    ///
    /// `minutes` is expected to be a multiple of [`SLOT_MINUTES`]; any
    /// remainder is truncated towards the earlier slot.
    #[inline]
    pub fn saturating_sub_minutes(self, minutes: u16) -> Self {
        let m = self.0.saturating_sub(minutes);
        TimeSlot(m - m % SLOT_MINUTES)
    }

    /// The slot following this one, if it is still in the same day.
    #[inline]
    pub fn next(self) -> Option<Self> {
        self.checked_add_minutes(SLOT_MINUTES)
    }

    /// Rounds a clock time up to the next slot with [`round_time`].
    ///
    /// Anything after `23:45` wraps to [`TimeSlot::MIDNIGHT`].
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use table_alloc_core::slot::TimeSlot;
    ///
    /// let t = NaiveTime::from_hms_opt(12, 5, 0).unwrap();
    /// assert_eq!(Some(TimeSlot::ceil(t)), TimeSlot::from_hm(12, 15));
    /// let late = NaiveTime::from_hms_opt(23, 50, 0).unwrap();
    /// assert_eq!(TimeSlot::ceil(late), TimeSlot::MIDNIGHT);
    /// ```
    pub fn ceil(time: NaiveTime) -> Self {
        TimeSlot::try_from(round_time(time)).unwrap_or(TimeSlot::MIDNIGHT)
    }

    /// Iterates `first..=last` in slot steps.
    pub fn range_inclusive(first: TimeSlot, last: TimeSlot) -> impl Iterator<Item = TimeSlot> {
        (first.index()..=last.index()).filter_map(TimeSlot::from_index)
    }

    #[inline]
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<NaiveTime> for TimeSlot {
    type Error = SlotNotAlignedError;

    fn try_from(time: NaiveTime) -> Result<Self, Self::Error> {
        let minutes = time.hour() * 60 + time.minute();
        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(SlotNotAlignedError {
                minutes,
                reason: SlotNotAlignedReason::HasSeconds,
            });
        }
        TimeSlot::from_minutes(minutes as u16)
    }
}

impl From<TimeSlot> for NaiveTime {
    #[inline]
    fn from(slot: TimeSlot) -> Self {
        slot.to_naive_time()
    }
}

/// Rounds `time` up to the next quarter hour, dropping seconds.
///
/// Exact quarter hours are returned unchanged. Minutes in `(45, 60)` move
/// to the next full hour, and `23:46` through `23:59` wrap to `00:00`.
///
/// ```
/// use chrono::NaiveTime;
/// use table_alloc_core::slot::round_time;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(round_time(t(12, 31)), t(12, 45));
/// assert_eq!(round_time(t(23, 55)), t(0, 0));
/// ```
pub fn round_time(time: NaiveTime) -> NaiveTime {
    let hour = time.hour();
    let minute = time.minute();
    let (hour, minute) = match minute {
        0 | 15 | 30 | 45 => (hour, minute),
        1..=14 => (hour, 15),
        16..=29 => (hour, 30),
        31..=44 => (hour, 45),
        _ => ((hour + 1) % 24, 0),
    };
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_round_time_keeps_quarter_hours() {
        for (h, m) in [(0, 0), (12, 15), (18, 30), (23, 45)] {
            assert_eq!(round_time(t(h, m)), t(h, m));
        }
    }

    #[test]
    fn test_round_time_rounds_up_within_hour() {
        assert_eq!(round_time(t(12, 1)), t(12, 15));
        assert_eq!(round_time(t(12, 14)), t(12, 15));
        assert_eq!(round_time(t(12, 16)), t(12, 30));
        assert_eq!(round_time(t(12, 29)), t(12, 30));
        assert_eq!(round_time(t(12, 31)), t(12, 45));
        assert_eq!(round_time(t(12, 44)), t(12, 45));
    }

    #[test]
    fn test_round_time_moves_to_next_hour() {
        assert_eq!(round_time(t(12, 46)), t(13, 0));
        assert_eq!(round_time(t(12, 59)), t(13, 0));
    }

    #[test]
    fn test_round_time_wraps_after_last_quarter() {
        assert_eq!(round_time(t(23, 55)), t(0, 0));
    }

    #[test]
    fn test_round_time_drops_seconds() {
        let time = NaiveTime::from_hms_opt(12, 0, 30).unwrap();
        assert_eq!(round_time(time), t(12, 0));
    }

    #[test]
    fn test_ceil_wraps_to_midnight() {
        assert_eq!(Some(TimeSlot::ceil(t(23, 45))), TimeSlot::from_hm(23, 45));
        assert_eq!(TimeSlot::ceil(t(23, 46)), TimeSlot::MIDNIGHT);
        assert_eq!(Some(TimeSlot::ceil(t(18, 31))), TimeSlot::from_hm(18, 45));
    }

    #[test]
    fn test_from_minutes_rejects_unaligned_and_out_of_day() {
        let err = TimeSlot::from_minutes(20).unwrap_err();
        assert_eq!(err.reason(), SlotNotAlignedReason::NotOnQuarterHour);
        let err = TimeSlot::from_minutes(MINUTES_PER_DAY).unwrap_err();
        assert_eq!(err.reason(), SlotNotAlignedReason::OutOfDay);
    }

    #[test]
    fn test_try_from_naive_time_rejects_seconds() {
        let time = NaiveTime::from_hms_opt(12, 0, 1).unwrap();
        let err = TimeSlot::try_from(time).unwrap_err();
        assert_eq!(err.reason(), SlotNotAlignedReason::HasSeconds);
        assert_eq!(TimeSlot::try_from(t(12, 0)), Ok(TimeSlot::from_hm(12, 0).unwrap()));
    }

    #[test]
    fn test_index_round_trips() {
        for index in [0, 1, 48, 95] {
            assert_eq!(TimeSlot::from_index(index).unwrap().index(), index);
        }
        assert_eq!(TimeSlot::from_index(SLOTS_PER_DAY), None);
    }

    #[test]
    fn test_arithmetic_stays_inside_the_day() {
        let slot = TimeSlot::from_hm(23, 0).unwrap();
        assert_eq!(slot.checked_add_minutes(45), TimeSlot::from_hm(23, 45));
        assert_eq!(slot.checked_add_minutes(60), None);
        assert_eq!(
            TimeSlot::from_hm(0, 30).unwrap().saturating_sub_minutes(60),
            TimeSlot::MIDNIGHT
        );
        assert_eq!(TimeSlot::LAST.next(), None);
    }

    #[test]
    fn test_range_inclusive_steps_by_quarter_hours() {
        let first = TimeSlot::from_hm(12, 0).unwrap();
        let last = TimeSlot::from_hm(13, 0).unwrap();
        let slots: Vec<_> = TimeSlot::range_inclusive(first, last)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(slots, ["12:00", "12:15", "12:30", "12:45", "13:00"]);
    }

    #[test]
    fn test_serde_uses_clock_time() {
        let slot = TimeSlot::from_hm(18, 30).unwrap();
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "\"18:30:00\"");
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
        assert!(serde_json::from_str::<TimeSlot>("\"18:20:00\"").is_err());
    }
}
