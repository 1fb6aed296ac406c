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

use crate::err::{EmptyPartyError, ZeroSeatsError};
use crate::id::TableId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Seating capacity of a table.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Seats(u16);

impl Seats {
    pub const MIN: Seats = Seats(1);

    #[inline]
    pub fn new(seats: u16) -> Result<Self, ZeroSeatsError> {
        if seats == 0 {
            return Err(ZeroSeatsError);
        }
        Ok(Seats(seats))
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Display for Seats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Seats {
    type Error = ZeroSeatsError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Seats::new(value)
    }
}

impl From<Seats> for u16 {
    fn from(seats: Seats) -> Self {
        seats.0
    }
}

/// Number of guests in a booking.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct PartySize(u16);

impl PartySize {
    pub const MIN: PartySize = PartySize(1);

    #[inline]
    pub fn new(guests: u16) -> Result<Self, EmptyPartyError> {
        if guests == 0 {
            return Err(EmptyPartyError);
        }
        Ok(PartySize(guests))
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Display for PartySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for PartySize {
    type Error = EmptyPartyError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        PartySize::new(value)
    }
}

impl From<PartySize> for u16 {
    fn from(party: PartySize) -> Self {
        party.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    id: TableId,
    name: String,
    seats: Seats,
}

impl Table {
    #[inline]
    pub fn new(id: TableId, name: impl Into<String>, seats: Seats) -> Self {
        Self {
            id,
            name: name.into(),
            seats,
        }
    }

    #[inline]
    pub fn id(&self) -> TableId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn seats(&self) -> Seats {
        self.seats
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table({}, {:?}, seats: {})", self.id.value(), self.name, self.seats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(Seats::new(0), Err(ZeroSeatsError));
        assert_eq!(PartySize::new(0), Err(EmptyPartyError));
    }

    #[test]
    fn test_table_serde() {
        let table = Table::new(TableId::new(3), "Window", Seats::new(4).unwrap());
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"Window","seats":4}"#);
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        assert!(serde_json::from_str::<Table>(r#"{"id":3,"name":"Bar","seats":0}"#).is_err());
    }
}
