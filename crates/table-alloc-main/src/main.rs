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

use chrono::{Days, Local, NaiveDate, NaiveTime};
use rayon::prelude::*;
use serde::Serialize;
use std::{error::Error, fs::File, io::BufReader, io::BufWriter, time::Instant};
use table_alloc_model::prelude::*;
use table_alloc_model::generator::{SiteGenConfig, SiteGenerator};
use table_alloc_solver::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

const REPORT_PATH: &str = "availability_report.json";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct PartyReport {
    party: u16,
    duration: String,
    groupings: Vec<String>,
    available_slots: Vec<String>,
    first_slot_tables: Vec<u64>,
    elapsed_us: u128,
}

#[derive(Debug, Clone, Serialize)]
struct AvailabilityReport {
    site: String,
    date: NaiveDate,
    tables: usize,
    existing_bookings: usize,
    opening: String,
    closing: String,
    parties: Vec<PartyReport>,
    demo_booking: Option<String>,
}

fn load_site(path: &str) -> Result<Site, Box<dyn Error>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn party_report<C: Clock + Sync>(
    site: &Site,
    date: NaiveDate,
    party: PartySize,
    store: &InMemoryBookingStore,
    clock: &C,
) -> Result<PartyReport, Box<dyn Error + Send + Sync>> {
    let t0 = Instant::now();
    let allocator = Allocator::from_store(site, BookingRequest::new(date, party), store, clock)?;
    let slots = allocator.available_time_slots();
    let first_slot_tables = slots
        .first()
        .map(|&slot| allocator.tables(slot))
        .unwrap_or_default();
    Ok(PartyReport {
        party: party.value(),
        duration: allocator.duration().to_string(),
        groupings: allocator
            .plan()
            .groupings()
            .iter()
            .map(|g| g.to_string())
            .collect(),
        available_slots: slots.iter().map(|s| s.to_string()).collect(),
        first_slot_tables: first_slot_tables.iter().map(|t| t.value()).collect(),
        elapsed_us: t0.elapsed().as_micros(),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let mut args = std::env::args().skip(1);
    let mut generator = SiteGenerator::new(SiteGenConfig::default());
    let site = match args.next() {
        Some(path) if path != "-" => load_site(&path)?,
        _ => generator.generate_site(SiteId::new(1), "Generated Bistro")?,
    };
    let date = match args.next() {
        Some(raw) => raw.parse::<NaiveDate>()?,
        None => Local::now()
            .date_naive()
            .checked_add_days(Days::new(7))
            .ok_or("date out of range")?,
    };

    let store = InMemoryBookingStore::with_bookings(generator.generate_bookings(&site, date));
    let hours = site.opening_hours(date);
    info!(
        site = site.name(),
        %date,
        tables = site.tables().len(),
        bookings = store.len(),
        "Computing availability"
    );

    let clock = SystemClock;
    let policy = site.policy();
    let parties: Vec<PartySize> = (policy.min_party().value()..=policy.max_party().value())
        .filter_map(|p| PartySize::new(p).ok())
        .collect();
    let reports = parties
        .into_par_iter()
        .map(|party| party_report(&site, date, party, &store, &clock))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e as Box<dyn Error>)?;

    let demo_booking = reports
        .iter()
        .find(|r| !r.available_slots.is_empty())
        .and_then(|r| {
            let party = PartySize::new(r.party).ok()?;
            let time = NaiveTime::parse_from_str(r.available_slots.first()?, "%H:%M").ok()?;
            let request = BookingRequest::new(date, party).via(Channel::Staff);
            match store.reserve(&site, request, time, &clock) {
                Ok(booking) => Some(booking.to_string()),
                Err(err) => {
                    warn!(%err, "Demo booking rejected");
                    None
                }
            }
        });

    let report = AvailabilityReport {
        site: site.name().to_string(),
        date,
        tables: site.tables().len(),
        existing_bookings: store.len(),
        opening: hours.opening().to_string(),
        closing: hours.closing().to_string(),
        parties: reports,
        demo_booking,
    };

    let file = File::create(REPORT_PATH)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;

    println!("Wrote: {REPORT_PATH}");
    Ok(())
}
