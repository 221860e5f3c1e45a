use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vampire_hunt::cache::DigitCache;
use vampire_hunt::kernel;
use vampire_hunt::partition;

fn criterion_benchmark(c: &mut Criterion) {
    let cache = DigitCache::build(partition::plan(6, partition::DEFAULT_CACHE_BUDGET));

    c.bench_function("search 6-digit class", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            kernel::search(black_box(100_000), black_box(999_999), black_box(999), &cache, &mut out);
            out
        })
    });

    let mut group = c.benchmark_group("cache");
    group.bench_function("build width 6", |b| {
        b.iter(|| DigitCache::build(partition::plan(6, 6)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
