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

use crate::id::BookingId;
use crate::policy::BookingPolicy;
use crate::table::PartySize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use table_alloc_core::duration::BookingDuration;

/// Who is asking for availability.
///
/// Guests booking through the public channel are bound by the site's
/// advance notice; staff may book up to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Public,
    Staff,
}

/// A request for availability on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingRequest {
    date: NaiveDate,
    party: PartySize,
    #[serde(default)]
    duration: Option<BookingDuration>,
    #[serde(default)]
    channel: Channel,
    #[serde(default)]
    exclude: Option<BookingId>,
}

impl BookingRequest {
    #[inline]
    pub fn new(date: NaiveDate, party: PartySize) -> Self {
        Self {
            date,
            party,
            duration: None,
            channel: Channel::Public,
            exclude: None,
        }
    }

    /// Overrides the site's default duration.
    #[inline]
    pub fn with_duration(mut self, duration: BookingDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[inline]
    pub fn via(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Ignores one existing booking, so that it can be moved.
    #[inline]
    pub fn excluding(mut self, booking: BookingId) -> Self {
        self.exclude = Some(booking);
        self
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn party(&self) -> PartySize {
        self.party
    }

    #[inline]
    pub fn duration(&self) -> Option<BookingDuration> {
        self.duration
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[inline]
    pub fn exclude(&self) -> Option<BookingId> {
        self.exclude
    }

    #[inline]
    pub fn effective_duration(&self, policy: &BookingPolicy) -> BookingDuration {
        self.duration.unwrap_or(policy.default_duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_public_and_site_duration() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 17).unwrap();
        let request = BookingRequest::new(date, PartySize::new(4).unwrap());
        assert_eq!(request.channel(), Channel::Public);
        assert_eq!(request.exclude(), None);
        assert_eq!(
            request.effective_duration(&BookingPolicy::default()),
            BookingDuration::TWO_HOURS
        );
        let request = request
            .with_duration(BookingDuration::AllDay)
            .via(Channel::Staff)
            .excluding(BookingId::new(12));
        assert_eq!(
            request.effective_duration(&BookingPolicy::default()),
            BookingDuration::AllDay
        );
        assert_eq!(request.channel(), Channel::Staff);
        assert_eq!(request.exclude(), Some(BookingId::new(12)));
    }

    #[test]
    fn test_deserialize_minimal() {
        let request: BookingRequest =
            serde_json::from_str(r#"{"date":"2021-06-17","party":3}"#).unwrap();
        assert_eq!(request.party().value(), 3);
        assert_eq!(request.duration(), None);
        assert_eq!(request.channel(), Channel::Public);
    }
}
