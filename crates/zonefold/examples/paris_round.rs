//! Fold a short round of clues around Paris and print how the area shrinks.
//!
//! Usage:
//!   cargo run -p zonefold --example paris_round
//!   cargo run -p zonefold --example paris_round -- threaded

use serde_json::json;
use zonefold::ops::{fold_trace, Executor, FoldRequest, Inline, Operation, Worker};
use zonefold::EngineCfg;

fn main() {
    let ops: Vec<Operation> = serde_json::from_value(json!([
        { "id": "1", "operation": "draw-circle", "points": [[2.35, 48.85]], "radius": 25.0, "inside": true },
        { "id": "2", "operation": "split-by-direction", "points": [[2.30, 48.86]], "direction": "East" },
        { "id": "3", "operation": "hotter-colder", "points": [[2.30, 48.80], [2.45, 48.90]], "preferredPoint": 1 }
    ]))
    .expect("clue json");

    let cfg = EngineCfg::default();
    for (op, region) in ops.iter().zip(fold_trace(None, &ops, &cfg)) {
        println!(
            "{:>20}: area {:.5} deg², {} polygon(s)",
            op.kind.name(),
            region.area_deg2(),
            region.polygon_count()
        );
    }

    let request = FoldRequest::new(None, ops);
    let region = match std::env::args().nth(1).as_deref() {
        Some("threaded") => Worker { cfg }.run(request).wait(),
        _ => Inline { cfg }.run(request).wait(),
    };
    println!("final bbox: {:?}", region.bounding_rect());
}
