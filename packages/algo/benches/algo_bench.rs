//! Benchmark suite for wortschatz-srs
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wortschatz_srs::{
    advance, select_session, Grade, ProgressMap, ProgressRecord, SchedulerConfig, MS_PER_DAY,
};

const NOW: i64 = 1_700_000_000_000;

fn progress_map(size: usize) -> ProgressMap {
    (0..size)
        .map(|i| {
            let id = format!("w{i}");
            let record = ProgressRecord {
                mastery_count: (i % 14) as i64,
                due_at: NOW + ((i % 7) as i64 - 3) * MS_PER_DAY,
                ..ProgressRecord::new(id.clone())
            };
            (id, record)
        })
        .collect()
}

fn bench_select_session(c: &mut Criterion) {
    let progress = progress_map(5_000);
    let vocabulary: Vec<String> = (0..6_000).map(|i| format!("w{i}")).collect();
    let config = SchedulerConfig::default();

    c.bench_function("select_session 5k", |b| {
        b.iter(|| select_session(black_box(&vocabulary), black_box(&progress), NOW, &config))
    });
}

fn bench_advance(c: &mut Criterion) {
    let prev = ProgressRecord {
        repetition: 4,
        interval: 40,
        ..ProgressRecord::new("w1")
    };

    c.bench_function("advance easy", |b| {
        b.iter(|| advance(black_box(Some(&prev)), Grade::Easy, "w1", NOW))
    });
}

criterion_group!(benches, bench_select_session, bench_advance);
criterion_main!(benches);
