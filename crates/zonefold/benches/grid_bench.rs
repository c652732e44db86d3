//! Criterion benchmarks for the grid-sampling classifier.
//! Focus sizes: line counts in {2, 10, 60, 250}, spanning all three grid tiers.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geo::{line_string, MultiLineString};
use rand::{rngs::StdRng, Rng, SeedableRng};
use zonefold::nearest_line::classify;
use zonefold::{EngineCfg, Region};

fn random_lines(m: usize, seed: u64) -> Vec<MultiLineString<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m)
        .map(|_| {
            let (x0, y0) = (rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let (x1, y1) = (rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            MultiLineString::new(vec![line_string![(x: x0, y: y0), (x: x1, y: y1)]])
        })
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    group.sample_size(10);
    let region = Region::from_bbox(-1.0, -1.0, 1.0, 1.0);
    let cfg = EngineCfg::default();
    for &m in &[2usize, 10, 60, 250] {
        let lines = random_lines(m, 43);
        group.bench_with_input(BenchmarkId::new("classify", m), &m, |b, _| {
            b.iter(|| classify(&region, &lines, 0, &cfg))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
