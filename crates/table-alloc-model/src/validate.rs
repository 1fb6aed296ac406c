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

//! Checks a booking request has to pass before its availability is looked up.

use crate::err::RequestValidationError;
use crate::request::{BookingRequest, Channel};
use crate::site::Site;
use chrono::{NaiveDateTime, NaiveTime};
use table_alloc_core::slot::TimeSlot;

/// Validates `request` at `time` against the site's policy, seen from `now`.
///
/// The early-booking limit and the advance notice only bind the public
/// channel.
pub fn validate_request(
    site: &Site,
    request: &BookingRequest,
    time: NaiveTime,
    now: NaiveDateTime,
) -> Result<TimeSlot, RequestValidationError> {
    let slot = TimeSlot::try_from(time)?;
    let policy = site.policy();
    let today = now.date();
    let date = request.date();

    if date < today {
        return Err(RequestValidationError::DateInPast { date, today });
    }

    if !policy.accepts_party(request.party()) {
        return Err(RequestValidationError::PartySizeOutOfBounds {
            party: request.party(),
            min: policy.min_party(),
            max: policy.max_party(),
        });
    }

    let hours = site.opening_hours(date);
    if !hours.contains(time) {
        return Err(RequestValidationError::TimeOutsideOpeningHours {
            time,
            opening: hours.opening(),
            closing: hours.closing(),
        });
    }

    if request.channel() == Channel::Public {
        let latest = policy.early_booking_date(today);
        if date > latest {
            return Err(RequestValidationError::BeyondEarlyBooking { date, latest });
        }

        let requested = date.and_time(time);
        let earliest = policy.advance_notice().last_permitted_instant(now);
        if requested < earliest {
            return Err(RequestValidationError::InsideAdvanceNotice {
                requested,
                earliest,
            });
        }
    }

    Ok(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{SiteId, TableId};
    use crate::policy::{AdvanceNotice, BookingPolicy};
    use crate::table::{PartySize, Seats};
    use chrono::NaiveDate;

    fn site(notice: AdvanceNotice) -> Site {
        Site::builder(SiteId::new(1), "Harbour")
            .policy(
                BookingPolicy::builder()
                    .advance_notice(notice)
                    .build()
                    .unwrap(),
            )
            .table(TableId::new(1), "T1", Seats::new(4).unwrap())
            .build()
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 6, 14)
            .unwrap()
            .and_hms_opt(12, 5, 0)
            .unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request(day: u32, party: u16) -> BookingRequest {
        BookingRequest::new(
            NaiveDate::from_ymd_opt(2021, 6, day).unwrap(),
            PartySize::new(party).unwrap(),
        )
    }

    #[test]
    fn test_valid_request_yields_slot() {
        let site = site(AdvanceNotice::Minutes(30));
        let slot = validate_request(&site, &request(17, 4), t(18, 30), now()).unwrap();
        assert_eq!(slot, TimeSlot::from_hm(18, 30).unwrap());
    }

    #[test]
    fn test_time_off_the_grid() {
        let site = site(AdvanceNotice::Minutes(30));
        let err = validate_request(&site, &request(17, 4), t(18, 20), now()).unwrap_err();
        assert!(matches!(err, RequestValidationError::TimeNotOnSlot(_)));
    }

    #[test]
    fn test_date_in_past() {
        let site = site(AdvanceNotice::Minutes(30));
        let err = validate_request(&site, &request(13, 4), t(18, 0), now()).unwrap_err();
        assert!(matches!(err, RequestValidationError::DateInPast { .. }));
    }

    #[test]
    fn test_party_outside_bounds() {
        let site = site(AdvanceNotice::Minutes(30));
        let err = validate_request(&site, &request(17, 7), t(18, 0), now()).unwrap_err();
        assert!(matches!(
            err,
            RequestValidationError::PartySizeOutOfBounds { .. }
        ));
    }

    #[test]
    fn test_beyond_early_booking() {
        let site = site(AdvanceNotice::Minutes(30));
        let far = BookingRequest::new(
            NaiveDate::from_ymd_opt(2021, 9, 13).unwrap(),
            PartySize::new(2).unwrap(),
        );
        let err = validate_request(&site, &far, t(18, 0), now()).unwrap_err();
        assert_eq!(
            err,
            RequestValidationError::BeyondEarlyBooking {
                date: NaiveDate::from_ymd_opt(2021, 9, 13).unwrap(),
                latest: NaiveDate::from_ymd_opt(2021, 9, 12).unwrap(),
            }
        );
    }

    #[test]
    fn test_staff_may_book_beyond_early_booking() {
        let site = site(AdvanceNotice::Minutes(30));
        let far = BookingRequest::new(
            NaiveDate::from_ymd_opt(2021, 12, 1).unwrap(),
            PartySize::new(2).unwrap(),
        )
        .via(Channel::Staff);
        let slot = validate_request(&site, &far, t(18, 0), now()).unwrap();
        assert_eq!(slot, TimeSlot::from_hm(18, 0).unwrap());
    }

    #[test]
    fn test_outside_opening_hours() {
        let site = site(AdvanceNotice::Minutes(30));
        let err = validate_request(&site, &request(17, 2), t(11, 0), now()).unwrap_err();
        assert!(matches!(
            err,
            RequestValidationError::TimeOutsideOpeningHours { .. }
        ));
    }

    #[test]
    fn test_advance_notice_binds_public_only() {
        let site = site(AdvanceNotice::Minutes(30));
        let public = request(14, 2);
        let err = validate_request(&site, &public, t(12, 30), now()).unwrap_err();
        assert!(matches!(
            err,
            RequestValidationError::InsideAdvanceNotice { .. }
        ));
        assert!(validate_request(&site, &public, t(12, 45), now()).is_ok());
        let staff = public.via(Channel::Staff);
        assert!(validate_request(&site, &staff, t(12, 30), now()).is_ok());
    }

    #[test]
    fn test_day_notice_closes_today() {
        let site = site(AdvanceNotice::Days(1));
        let err = validate_request(&site, &request(14, 2), t(20, 0), now()).unwrap_err();
        assert!(matches!(
            err,
            RequestValidationError::InsideAdvanceNotice { .. }
        ));
        assert!(validate_request(&site, &request(15, 2), t(12, 0), now()).is_ok());
    }
}
