//! Performance benchmarks for colhash
//!
//! Run with: cargo bench

use colhash::column::{Column, Coord};
use colhash::config::EngineConfig;
use colhash::hash::{DigestAlgorithm, Digester, FastHashAlgorithm, FastHasher, SeedSlot};
use colhash::registry::{Kwargs, OperationRegistry};
use colhash::dispatch::Dispatcher;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const ROWS: usize = 256 * 1024;

fn text_rows(rows: usize) -> Vec<Option<String>> {
    (0..rows)
        .map(|i| if i % 97 == 0 { None } else { Some(format!("row-{:08}", i)) })
        .collect()
}

fn bench_digest_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest_algorithms");
    let input = text_rows(ROWS);
    let dispatcher = Dispatcher::default();

    group.throughput(Throughput::Elements(ROWS as u64));

    for algorithm in DigestAlgorithm::ALL {
        let digester = Digester::new(algorithm, algorithm.is_xof().then_some(32)).unwrap();
        group.bench_with_input(BenchmarkId::new("hex", algorithm.name()), &input, |b, input| {
            b.iter(|| black_box(colhash::hash::hex_column(&dispatcher, &digester, input).unwrap()));
        });
    }

    group.finish();
}

fn bench_fast_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_algorithms");
    let input = text_rows(ROWS);
    let dispatcher = Dispatcher::default();

    group.throughput(Throughput::Elements(ROWS as u64));

    for algorithm in FastHashAlgorithm::ALL {
        let hasher = FastHasher::new(algorithm, SeedSlot::Value(42));
        group.bench_with_input(BenchmarkId::new("hash", algorithm.name()), &input, |b, input| {
            b.iter(|| black_box(hasher.hash_column(&dispatcher, input, None).unwrap()));
        });
    }

    group.finish();
}

fn bench_geo(c: &mut Criterion) {
    let mut group = c.benchmark_group("geo");
    let registry = OperationRegistry::new(&EngineConfig::default()).unwrap();

    let coords = Column::Coord(
        (0..ROWS)
            .map(|i| {
                let t = i as f64 / ROWS as f64;
                Some(Coord::new(-180.0 + 360.0 * t, -90.0 + 180.0 * t))
            })
            .collect(),
    );
    let encode = registry.plan("ghash_encode", &Kwargs::default()).unwrap();
    let hashes = encode.execute(std::slice::from_ref(&coords)).unwrap();

    group.throughput(Throughput::Elements(ROWS as u64));

    for (name, input) in [
        ("ghash_encode", &coords),
        ("ghash_decode", &hashes),
        ("ghash_neighbors", &hashes),
        ("h3_encode", &coords),
    ] {
        let plan = registry.plan(name, &Kwargs::default()).unwrap();
        group.bench_with_input(BenchmarkId::new("op", name), input, |b, input| {
            b.iter(|| black_box(plan.execute(std::slice::from_ref(input)).unwrap()));
        });
    }

    group.finish();
}

fn bench_dispatch_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let input = text_rows(ROWS);
    let hasher = FastHasher::new(FastHashAlgorithm::Xxh3_64, SeedSlot::Absent);

    group.throughput(Throughput::Elements(ROWS as u64));

    for (mode, dispatcher) in [
        ("sequential", Dispatcher::default().with_parallel_threshold(usize::MAX)),
        ("parallel", Dispatcher::default().with_chunk_size(8 * 1024)),
    ] {
        group.bench_with_input(BenchmarkId::new("xxh3_64", mode), &input, |b, input| {
            b.iter(|| black_box(hasher.hash_column(&dispatcher, input, None).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_digest_algorithms,
    bench_fast_algorithms,
    bench_geo,
    bench_dispatch_modes
);

criterion_main!(benches);
