//! Criterion micro-benchmarks for segmented storage allocation and lookup.

use std::hint::black_box;

use aos_bench::{narrow_segments, LINE_LEN};
use aos_storage::{PartitionedStorage, StorageConfig};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: allocate and fill 100K slots in one segment vs many.
fn bench_fill_100k(c: &mut Criterion) {
    for (name, config) in [
        ("fill_100k_single_segment", StorageConfig::default()),
        ("fill_100k_narrow_segments", narrow_segments()),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let storage = PartitionedStorage::try_from_fn(LINE_LEN, &config, Ok).unwrap();
                black_box(storage)
            });
        });
    }
}

/// Benchmark: random-access reads across segment boundaries.
fn bench_get_100k(c: &mut Criterion) {
    let config = narrow_segments();
    let storage = PartitionedStorage::try_from_fn(LINE_LEN, &config, Ok).unwrap();
    // Stride coprime with the segment size so reads hop between segments.
    let stride = 257u64;
    c.bench_function("get_narrow_segments_100k", |b| {
        b.iter(|| {
            let mut index = 0u64;
            let mut sum = 0u64;
            for _ in 0..LINE_LEN {
                sum = sum.wrapping_add(*storage.get(index).unwrap());
                index = (index + stride) % LINE_LEN;
            }
            black_box(sum)
        });
    });
}

/// Benchmark: forward iteration over many segments.
fn bench_iter_100k(c: &mut Criterion) {
    let config = narrow_segments();
    let storage = PartitionedStorage::try_from_fn(LINE_LEN, &config, Ok).unwrap();
    c.bench_function("iter_narrow_segments_100k", |b| {
        b.iter(|| black_box(storage.iter().copied().sum::<u64>()));
    });
}

criterion_group!(benches, bench_fill_100k, bench_get_100k, bench_iter_100k);
criterion_main!(benches);
