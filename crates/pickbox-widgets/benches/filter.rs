//! Benchmarks for the filter engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pickbox_core::State;
use pickbox_widgets::{filter, Catalog, ComboMessage, ComboState};

fn catalog(size: usize) -> Catalog {
    (0..size)
        .map(|i| (format!("opt_{i}"), format!("Option number {i}")))
        .collect()
}

fn bench_filter_substring(c: &mut Criterion) {
    let catalog = catalog(1000);
    c.bench_function("filter_1000_substring", |b| {
        b.iter(|| filter(black_box("number 9"), &catalog, false))
    });
}

fn bench_filter_exact(c: &mut Criterion) {
    let catalog = catalog(1000);
    c.bench_function("filter_1000_exact", |b| {
        b.iter(|| filter(black_box("option NUMBER 500"), &catalog, true))
    });
}

fn bench_filter_empty_query(c: &mut Criterion) {
    let catalog = catalog(1000);
    c.bench_function("filter_1000_empty", |b| {
        b.iter(|| filter(black_box(""), &catalog, false))
    });
}

fn bench_keystroke_update(c: &mut Criterion) {
    let state = ComboState::new(catalog(1000));
    c.bench_function("state_keystroke_1000", |b| {
        b.iter(|| {
            let mut state = state.clone();
            state.update(ComboMessage::Input(black_box("num".to_string())))
        })
    });
}

criterion_group!(
    benches,
    bench_filter_substring,
    bench_filter_exact,
    bench_filter_empty_query,
    bench_keystroke_update,
);
criterion_main!(benches);
