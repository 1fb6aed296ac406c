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

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{env, hint::black_box};
use table_alloc_core::slot::TimeSlot;
use table_alloc_model::booking::ExistingBooking;
use table_alloc_model::generator::{SiteGenConfig, SiteGenerator};
use table_alloc_model::id::SiteId;
use table_alloc_model::request::BookingRequest;
use table_alloc_model::site::Site;
use table_alloc_model::table::PartySize;
use table_alloc_solver::allocator::Allocator;
use table_alloc_solver::clock::FixedClock;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn clock() -> FixedClock {
    let now: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    FixedClock::new(now)
}

fn prepare_day(tables: usize, lambda: f64, seed: u64) -> (Site, Vec<ExistingBooking>) {
    let config = SiteGenConfig::builder()
        .tables(tables)
        .bookings_per_table(lambda)
        .seed(seed)
        .build()
        .unwrap();
    let mut generator = SiteGenerator::new(config);
    let site = generator
        .generate_site(SiteId::new(1), "Bench")
        .unwrap();
    let bookings = generator.generate_bookings(&site, date());
    (site, bookings)
}

fn gen_parties(site: &Site, n: usize, rng: &mut impl Rng) -> Vec<PartySize> {
    let min = site.policy().min_party().value();
    let max = site.policy().max_party().value();
    (0..n)
        .map(|_| PartySize::new(rng.random_range(min..=max)).unwrap())
        .collect()
}

fn register_available(c: &mut Criterion, tables: usize, lambda: f64, parties_n: usize) {
    let mut group = c.benchmark_group(format!("allocator_available/{tables}"));
    group.throughput(Throughput::Elements(parties_n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0xA11C_0CA7);
    let (site, bookings) = prepare_day(tables, lambda, rng.random());
    let parties = gen_parties(&site, parties_n, &mut rng);
    let clock = clock();

    group.bench_function(BenchmarkId::new("slots", format!("lambda_{lambda}")), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &party in &parties {
                let allocator = Allocator::new(
                    &site,
                    BookingRequest::new(date(), party),
                    bookings.clone(),
                    &clock,
                );
                count += allocator.available_time_slots().len();
            }
            black_box(count)
        })
    });
    group.finish();
}

fn register_assign(c: &mut Criterion, tables: usize, lambda: f64) {
    let mut group = c.benchmark_group(format!("allocator_assign/{tables}"));

    let mut rng = ChaCha8Rng::seed_from_u64(0x7AB1_E5);
    let (site, bookings) = prepare_day(tables, lambda, rng.random());
    let clock = clock();
    let party = PartySize::new(2).unwrap();
    let allocator = Allocator::new(&site, BookingRequest::new(date(), party), bookings, &clock);
    let slots: Vec<TimeSlot> = site.opening_hours(date()).slots().iter().collect();
    group.throughput(Throughput::Elements(slots.len() as u64));

    group.bench_function(BenchmarkId::new("tables", format!("lambda_{lambda}")), |b| {
        b.iter(|| {
            let mut assigned = 0usize;
            for &slot in &slots {
                assigned += allocator.tables(slot).len();
            }
            black_box(assigned)
        })
    });
    group.finish();
}

fn allocator_benches(c: &mut Criterion) {
    let parties_n = env::var("ALLOC_PARTIES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(64usize);
    let lambda = env::var("ALLOC_LAMBDA")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2.0f64);

    for tables in [8usize, 32, 128] {
        register_available(c, tables, lambda, parties_n);
        register_assign(c, tables, lambda);
    }
}

criterion_group!(benches, allocator_benches);
criterion_main!(benches);
