//! Benchmark for chain handle overhead.
//!
//! # Benchmark Categories
//!
//! 1. **Map Chains**: `map` chains of increasing length in both modes
//! 2. **Generator Idiom**: wrap, transform each element, join
//! 3. **Render**: the colour table rendered through each mode

use chainwrap::chain::{Deferred, chain};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// =============================================================================
// Map Chain Benchmarks
// =============================================================================

fn benchmark_map_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_chain");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    for length in [1_usize, 10, 100] {
        group.bench_with_input(BenchmarkId::new("immediate", length), &length, |bencher, &length| {
            bencher.iter(|| {
                let mut handle = chain(0_u64);
                for _ in 0..length {
                    handle = handle.map(|value| value.wrapping_add(1));
                }
                black_box(handle.raw_value())
            });
        });

        group.bench_with_input(BenchmarkId::new("deferred", length), &length, |bencher, &length| {
            bencher.to_async(&runtime).iter(|| async move {
                let mut handle = Deferred::ready(0_u64);
                for _ in 0..length {
                    handle = handle.map(|value| value.wrapping_add(1));
                }
                black_box(handle.await.unwrap())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Generator Idiom Benchmarks
// =============================================================================

fn benchmark_map_each_join(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_each_join");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let names: Vec<String> = (0..64).map(|index| format!("name{index}")).collect();

    group.bench_function("immediate", |bencher| {
        bencher.iter(|| {
            let text = chain(names.clone())
                .map_each(|name| format!("{name}-fn"))
                .join("")
                .raw_value();
            black_box(text)
        });
    });

    group.bench_function("deferred", |bencher| {
        bencher.to_async(&runtime).iter(|| {
            let names = names.clone();
            async move {
                let text = chain(names)
                    .to_async()
                    .map_each(|name| format!("{name}-fn"))
                    .join("")
                    .await
                    .unwrap();
                black_box(text)
            }
        });
    });

    group.finish();
}

// =============================================================================
// Render Benchmarks
// =============================================================================

#[cfg(feature = "chalk")]
fn benchmark_render(criterion: &mut Criterion) {
    use chainwrap::chalk::{Color, SourceKind, render};

    let mut group = criterion.benchmark_group("render");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    for kind in [SourceKind::Declarations, SourceKind::Definitions] {
        let label = format!("{kind:?}");
        group.bench_with_input(BenchmarkId::new("immediate", &label), &kind, |bencher, &kind| {
            bencher.iter(|| black_box(render(chain(Color::ALL.to_vec()), kind).raw_value()));
        });
        group.bench_with_input(BenchmarkId::new("deferred", &label), &kind, |bencher, &kind| {
            bencher.to_async(&runtime).iter(|| async move {
                black_box(render(Deferred::ready(Color::ALL.to_vec()), kind).await.unwrap())
            });
        });
    }

    group.finish();
}

#[cfg(not(feature = "chalk"))]
fn benchmark_render(_criterion: &mut Criterion) {}

criterion_group!(
    benches,
    benchmark_map_chain,
    benchmark_map_each_join,
    benchmark_render
);
criterion_main!(benches);
