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

//! # Sites
//!
//! A `Site` is a restaurant: its tables, its weekly opening hours and its
//! booking policy. Sites are immutable once built; `SiteBuilder` checks
//! that table ids are unique.

use crate::err::SiteBuildError;
use crate::id::{SiteId, TableId};
use crate::policy::BookingPolicy;
use crate::schedule::{OpeningHours, WeeklySchedule};
use crate::table::{Seats, Table};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SiteRepr")]
pub struct Site {
    id: SiteId,
    name: String,
    schedule: WeeklySchedule,
    policy: BookingPolicy,
    tables: Vec<Table>,
}

#[derive(Deserialize)]
struct SiteRepr {
    id: SiteId,
    name: String,
    #[serde(default)]
    schedule: WeeklySchedule,
    #[serde(default)]
    policy: BookingPolicy,
    tables: Vec<Table>,
}

impl TryFrom<SiteRepr> for Site {
    type Error = SiteBuildError;

    fn try_from(repr: SiteRepr) -> Result<Self, Self::Error> {
        SiteBuilder::new(repr.id, repr.name)
            .schedule(repr.schedule)
            .policy(repr.policy)
            .tables(repr.tables)
            .build()
    }
}

impl Site {
    #[inline]
    pub fn builder(id: SiteId, name: impl Into<String>) -> SiteBuilder {
        SiteBuilder::new(id, name)
    }

    #[inline]
    pub fn id(&self) -> SiteId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    #[inline]
    pub fn opening_hours(&self, date: NaiveDate) -> OpeningHours {
        self.schedule.for_date(date)
    }

    #[inline]
    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    #[inline]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    #[inline]
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id() == id)
    }

    /// Capacities of all tables, one entry per table.
    pub fn capacities(&self) -> Vec<Seats> {
        self.tables.iter().map(Table::seats).collect()
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Site({}, {:?}, tables: {})",
            self.id.value(),
            self.name,
            self.tables.len()
        )
    }
}

pub struct SiteBuilder {
    id: SiteId,
    name: String,
    schedule: WeeklySchedule,
    policy: BookingPolicy,
    tables: Vec<Table>,
}

impl SiteBuilder {
    pub fn new(id: SiteId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            schedule: WeeklySchedule::default(),
            policy: BookingPolicy::default(),
            tables: Vec::new(),
        }
    }

    pub fn schedule(mut self, schedule: WeeklySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn table(mut self, id: TableId, name: impl Into<String>, seats: Seats) -> Self {
        self.tables.push(Table::new(id, name, seats));
        self
    }

    pub fn tables<I>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = Table>,
    {
        self.tables.extend(tables);
        self
    }

    pub fn build(self) -> Result<Site, SiteBuildError> {
        if self.name.trim().is_empty() {
            return Err(SiteBuildError::EmptyName);
        }
        let mut seen = HashSet::with_capacity(self.tables.len());
        for table in &self.tables {
            if !seen.insert(table.id()) {
                return Err(SiteBuildError::DuplicateTable(table.id()));
            }
        }
        Ok(Site {
            id: self.id,
            name: self.name,
            schedule: self.schedule,
            policy: self.policy,
            tables: self.tables,
        })
    }
}
