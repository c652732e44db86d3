//! Criterion benchmark for a representative clue sequence folded over the world.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;
use zonefold::ops::{compute_aggregate_region, Operation};

fn clues() -> Vec<Operation> {
    serde_json::from_value(json!([
        { "id": "1", "operation": "draw-circle", "points": [[2.35, 48.85]], "radius": 40.0, "inside": true },
        { "id": "2", "operation": "split-by-direction", "points": [[2.35, 48.85]], "direction": "North" },
        { "id": "3", "operation": "hotter-colder", "points": [[2.2, 48.9], [2.5, 48.95]], "preferredPoint": 1 },
        { "id": "4", "operation": "closer-to-line", "points": [[2.3, 48.9]], "proximity": "further",
          "multiLineString": { "type": "LineString", "coordinates": [[2.0, 48.8], [2.7, 48.9]] } },
        { "id": "5", "operation": "same-closest-line", "lineIndex": 1, "same": true,
          "multiLineString": { "type": "MultiLineString", "coordinates": [
            [[2.0, 48.7], [2.7, 48.8]], [[2.0, 49.0], [2.7, 49.1]], [[2.4, 48.6], [2.4, 49.2]]
          ]}}
    ]))
    .expect("bench clues")
}

fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold");
    group.sample_size(10);
    group.bench_function("five_clues_world", |b| {
        b.iter_batched(
            clues,
            |ops| {
                let _region = compute_aggregate_region(None, &ops);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_fold);
criterion_main!(benches);
