// Benchmark for day layout
// Measures overlap counting on dense days, sweep against the pairwise reference

use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use schedule_grid::grid::layout::{overlap_counts, overlap_counts_pairwise};
use schedule_grid::grid::{layout_day, GridGeometry, LayoutConfig, TimeSpaceMapper};
use schedule_grid::models::event::Event;

fn dense_day(count: usize) -> Vec<Event> {
    let base = Local.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            // staggered starts every 7 minutes, 20-110 minute lengths
            let start = base + Duration::minutes((i as i64 * 7) % (12 * 60));
            let end = start + Duration::minutes(20 + (i as i64 * 13) % 90);
            Event::new(i as i64, format!("Event {i}"), 1, start, end)
        })
        .collect()
}

fn mapper() -> TimeSpaceMapper {
    TimeSpaceMapper::for_day(
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        GridGeometry {
            hour_height_px: 64.0,
            snap_interval_minutes: 15,
            visible_minutes: 14 * 60,
        },
    )
}

fn bench_overlap_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_counts");

    for count in [10usize, 100, 500] {
        let events = dense_day(count);
        let refs: Vec<&Event> = events.iter().collect();

        group.bench_with_input(BenchmarkId::new("sweep", count), &refs, |b, refs| {
            b.iter(|| overlap_counts(black_box(refs)));
        });
        group.bench_with_input(BenchmarkId::new("pairwise", count), &refs, |b, refs| {
            b.iter(|| overlap_counts_pairwise(black_box(refs)));
        });
    }

    group.finish();
}

fn bench_layout_day(c: &mut Criterion) {
    let events = dense_day(200);
    let refs: Vec<&Event> = events.iter().collect();
    let mapper = mapper();
    let config = LayoutConfig {
        min_height_px: 32.0,
        stack_step_px: 20.0,
    };

    c.bench_function("layout_day_200", |b| {
        b.iter(|| layout_day(black_box(&refs), &mapper, config));
    });
}

criterion_group!(benches, bench_overlap_counts, bench_layout_day);
criterion_main!(benches);
