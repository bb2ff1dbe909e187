//! Benchmark of the collection façades over large inputs.
//!
//! Run with: cargo bench --package cairn-core --bench collection_benchmark

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use mimalloc::MiMalloc;

use cairn_core::{Collection, DeferredSource, MutableCollection, ReadableCollection, Value};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn tag(value: &Value) -> Value {
    let tag: u64 = rand::random();
    Value::from(format!("{tag:016x}{value}"))
}

// ============================================================================
// Pipelines
// ============================================================================

fn bench_immutable_pipeline(count: usize) -> usize {
    let collection = Collection::fill(0, count, "hey hey").unwrap();
    let picked = collection
        .each(|value, _| tag(value))
        .unwrap()
        .filter(|value, _| value.as_str().is_some_and(|text| !text.contains('g')))
        .remove([100, 200, 300, 400])
        .unique()
        .reverse();
    picked.rand().map(|value| value.to_string().len()).unwrap_or(0)
}

fn bench_mutable_pipeline(count: usize) -> usize {
    let mut collection = MutableCollection::fill(0, count, "hey hey").unwrap();
    collection
        .each(|value, _| tag(value))
        .unwrap()
        .filter(|value, _| value.as_str().is_some_and(|text| !text.contains('g')))
        .remove([100, 200, 300, 400])
        .unique()
        .reverse();
    collection.rand().map(|value| value.to_string().len()).unwrap_or(0)
}

fn bench_sort(count: usize) -> usize {
    let collection =
        Collection::from_values((0..count).map(|i| ((i * 7919) % count) as i64)).unwrap();
    collection.sort().count()
}

fn bench_later_construction(count: usize) -> Collection {
    Collection::later(DeferredSource::from_values((0..count).map(|_| "hey hey")))
}

fn bench_later_materialization(count: usize) -> usize {
    bench_later_construction(count).count()
}

// ============================================================================
// Criterion benchmark groups
// ============================================================================

fn pipeline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_benchmark_collection");
    group.sample_size(10);

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("pipeline_benchmark_immutable", count),
            &count,
            |b, &count| b.iter(|| bench_immutable_pipeline(black_box(count))),
        );

        group.bench_with_input(
            BenchmarkId::new("pipeline_benchmark_mutable", count),
            &count,
            |b, &count| b.iter(|| bench_mutable_pipeline(black_box(count))),
        );
    }

    group.finish();
}

fn sort_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_benchmark_collection");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("sort_benchmark", count), &count, |b, &count| {
            b.iter(|| bench_sort(black_box(count)))
        });
    }

    group.finish();
}

fn later_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("later_benchmark_collection");

    for count in [10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("later_benchmark_construction", count),
            &count,
            |b, &count| b.iter(|| bench_later_construction(black_box(count))),
        );

        group.bench_with_input(
            BenchmarkId::new("later_benchmark_materialization", count),
            &count,
            |b, &count| b.iter(|| bench_later_materialization(black_box(count))),
        );
    }

    group.finish();
}

criterion_group!(benches, pipeline_benchmark, sort_benchmark, later_benchmark);
criterion_main!(benches);
