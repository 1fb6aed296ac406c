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

//! Opening hours.

use crate::err::{OpeningAfterClosingError, ScheduleError};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use table_alloc_core::slot::{TimeSlot, round_time};
use table_alloc_core::slotset::SlotSet;

/// Opening and closing time of a single service day.
///
/// Both ends are slots and `opening <= closing`; a day closing at midnight
/// is not representable, the latest closing time is `23:45`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OpeningHoursRepr")]
pub struct OpeningHours {
    opening: TimeSlot,
    closing: TimeSlot,
}

#[derive(Deserialize)]
struct OpeningHoursRepr {
    opening: TimeSlot,
    closing: TimeSlot,
}

impl TryFrom<OpeningHoursRepr> for OpeningHours {
    type Error = OpeningAfterClosingError;

    fn try_from(repr: OpeningHoursRepr) -> Result<Self, Self::Error> {
        OpeningHours::new(repr.opening, repr.closing)
    }
}

impl OpeningHours {
    pub fn new(opening: TimeSlot, closing: TimeSlot) -> Result<Self, OpeningAfterClosingError> {
        if opening > closing {
            return Err(OpeningAfterClosingError::new(opening, closing));
        }
        Ok(Self { opening, closing })
    }

    #[inline]
    pub fn opening(&self) -> TimeSlot {
        self.opening
    }

    #[inline]
    pub fn closing(&self) -> TimeSlot {
        self.closing
    }

    /// Every slot from opening through closing.
    #[inline]
    pub fn slots(&self) -> SlotSet {
        SlotSet::between(self.opening, self.closing)
    }

    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.opening.to_naive_time() <= time && time <= self.closing.to_naive_time()
    }
}

impl Default for OpeningHours {
    /// Noon to 23:00.
    fn default() -> Self {
        Self {
            opening: TimeSlot::from_hm(12, 0).unwrap_or(TimeSlot::MIDNIGHT),
            closing: TimeSlot::from_hm(23, 0).unwrap_or(TimeSlot::LAST),
        }
    }
}

/// Opening hours for each day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [OpeningHours; 7],
}

impl WeeklySchedule {
    #[inline]
    pub fn uniform(hours: OpeningHours) -> Self {
        Self { days: [hours; 7] }
    }

    /// Builds a schedule from free-form clock times, Monday first.
    ///
    /// Each time is rounded up to the next quarter hour first. A closing time
    /// after `23:45` therefore wraps to midnight and fails validation.
    pub fn from_times(times: [(NaiveTime, NaiveTime); 7]) -> Result<Self, ScheduleError> {
        let mut days = [OpeningHours::default(); 7];
        for (ix, (opening, closing)) in times.into_iter().enumerate() {
            let weekday = weekday_from_index(ix);
            let opening = quarter_hour(opening);
            let closing = quarter_hour(closing);
            days[ix] = OpeningHours::new(opening, closing)
                .map_err(|e| ScheduleError::new(weekday, e))?;
        }
        Ok(Self { days })
    }

    #[inline]
    pub fn with_day(mut self, weekday: Weekday, hours: OpeningHours) -> Self {
        self.days[weekday.num_days_from_monday() as usize] = hours;
        self
    }

    #[inline]
    pub fn hours(&self, weekday: Weekday) -> OpeningHours {
        self.days[weekday.num_days_from_monday() as usize]
    }

    #[inline]
    pub fn for_date(&self, date: NaiveDate) -> OpeningHours {
        self.hours(date.weekday())
    }
}

fn quarter_hour(time: NaiveTime) -> TimeSlot {
    TimeSlot::try_from(round_time(time)).unwrap_or(TimeSlot::MIDNIGHT)
}

fn weekday_from_index(ix: usize) -> Weekday {
    match ix {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(h: u32, m: u32) -> TimeSlot {
        TimeSlot::from_hm(h, m).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_hours_are_noon_to_eleven() {
        let hours = OpeningHours::default();
        assert_eq!(hours.opening(), s(12, 0));
        assert_eq!(hours.closing(), s(23, 0));
        assert_eq!(hours.slots().len(), 45);
    }

    #[test]
    fn test_opening_after_closing_is_rejected() {
        let err = OpeningHours::new(s(18, 0), s(12, 0)).unwrap_err();
        assert_eq!(err.opening(), s(18, 0));
    }

    #[test]
    fn test_for_date_picks_weekday() {
        let friday = OpeningHours::new(s(17, 0), s(23, 45)).unwrap();
        let schedule = WeeklySchedule::default().with_day(Weekday::Fri, friday);
        let fri = NaiveDate::from_ymd_opt(2021, 6, 18).unwrap();
        let thu = NaiveDate::from_ymd_opt(2021, 6, 17).unwrap();
        assert_eq!(schedule.for_date(fri), friday);
        assert_eq!(schedule.for_date(thu), OpeningHours::default());
    }

    #[test]
    fn test_from_times_rounds_up() {
        let mut times = [(t(12, 0), t(23, 0)); 7];
        times[0] = (t(11, 50), t(22, 10));
        let schedule = WeeklySchedule::from_times(times).unwrap();
        let monday = schedule.hours(Weekday::Mon);
        assert_eq!(monday.opening(), s(12, 0));
        assert_eq!(monday.closing(), s(22, 15));
    }

    #[test]
    fn test_from_times_rejects_closing_that_wraps() {
        let mut times = [(t(12, 0), t(23, 0)); 7];
        times[6] = (t(12, 0), t(23, 55));
        let err = WeeklySchedule::from_times(times).unwrap_err();
        assert_eq!(err.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_deserialize_validates_hours() {
        let ok: OpeningHours =
            serde_json::from_str(r#"{"opening":"10:00:00","closing":"14:00:00"}"#).unwrap();
        assert_eq!(ok.opening(), s(10, 0));
        assert!(
            serde_json::from_str::<OpeningHours>(r#"{"opening":"14:00:00","closing":"10:00:00"}"#)
                .is_err()
        );
    }
}
