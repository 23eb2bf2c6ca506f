use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use studiofit_booking::logic::generate_day_slots;
use studiofit_booking::service::{FixedCapacity, RandomizedCapacity};

fn benchmark_generate_day_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_day_slots");

    let date = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();

    group.bench_function("fixed_capacity", |b| {
        let provider = FixedCapacity(2);
        b.iter(|| {
            let slots = generate_day_slots(
                black_box(date),
                black_box(now),
                chrono_tz::Europe::Zurich,
                &provider,
            );
            black_box(slots)
        })
    });

    group.bench_function("randomized_capacity", |b| {
        let provider = RandomizedCapacity;
        b.iter(|| {
            let slots = generate_day_slots(
                black_box(date),
                black_box(now),
                chrono_tz::Europe::Zurich,
                &provider,
            );
            black_box(slots)
        })
    });

    // Mid-day clock: half the grid takes the past-slot short circuit
    group.bench_function("partially_elapsed_day", |b| {
        let provider = RandomizedCapacity;
        let midday = Utc.with_ymd_and_hms(2025, 10, 5, 13, 0, 0).unwrap();
        b.iter(|| {
            let slots = generate_day_slots(
                black_box(date),
                black_box(midday),
                chrono_tz::Europe::Zurich,
                &provider,
            );
            black_box(slots)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_generate_day_slots);
criterion_main!(benches);
