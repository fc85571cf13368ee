use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fiphot::{extract, FiberRecords, Normalization, Recording, Window};
use fiphot::smooth::savgol_filter;

fn synthetic_fiber(rate: f64, duration: f64) -> FiberRecords {
    let n = (rate * duration) as usize + 1;
    let time: Vec<f64> = (0..n).map(|i| i as f64 / rate).collect();
    let signal: Vec<f64> = time.iter().map(|&t| 2.0 + 0.3 * (0.7 * t).sin()).collect();
    let control = vec![1.0; n];
    FiberRecords::new(vec![Recording::new(time, signal, control).unwrap()])
}

fn bench_extract(c: &mut Criterion) {
    let fiber = synthetic_fiber(1000.0, 600.0);
    c.bench_function("extract [1 kHz, 10 s window]", |b| {
        b.iter(|| {
            let res = extract(
                black_box(&fiber),
                black_box(300.0),
                Window::new(5.0, 5.0),
                Normalization::DeltaFOverF,
            )
            .unwrap();
            black_box(res.zscore.stats.post.auc)
        })
    });
}

fn bench_savgol(c: &mut Criterion) {
    let fiber = synthetic_fiber(1000.0, 600.0);
    let res = extract(&fiber, 300.0, Window::new(5.0, 5.0), Normalization::DeltaFOverF).unwrap();
    c.bench_function("savgol_filter [10 001 × w=251]", |b| {
        b.iter(|| {
            let sm = savgol_filter(black_box(res.dff.full.view()), 251, 3).unwrap();
            black_box(sm[sm.len() / 2])
        })
    });
}

criterion_group!(benches, bench_extract, bench_savgol);
criterion_main!(benches);
