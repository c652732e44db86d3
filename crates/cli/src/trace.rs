//! Per-step fold table for the `trace` subcommand.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use zonefold::{Operation, Region};

/// One row per clue: step, id, kind, area (deg²), polygon count, empty flag.
pub fn trace_frame(operations: &[Operation], steps: &[Region]) -> PolarsResult<DataFrame> {
    let n = operations.len().min(steps.len());
    let step: Vec<u32> = (1..=n as u32).collect();
    let id: Vec<String> = operations[..n].iter().map(|op| op.id.clone()).collect();
    let kind: Vec<String> = operations[..n]
        .iter()
        .map(|op| op.kind.name().to_string())
        .collect();
    let area: Vec<f64> = steps[..n].iter().map(Region::area_deg2).collect();
    let polygons: Vec<u32> = steps[..n]
        .iter()
        .map(|r| r.polygon_count() as u32)
        .collect();
    let empty: Vec<bool> = steps[..n].iter().map(Region::is_empty).collect();
    df!(
        "step" => step,
        "id" => id,
        "kind" => kind,
        "area_deg2" => area,
        "polygons" => polygons,
        "empty" => empty
    )
}

pub fn write_csv(df: &mut DataFrame, out: &Path) -> Result<()> {
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use zonefold::ops::fold_trace;
    use zonefold::EngineCfg;

    fn ops() -> Vec<Operation> {
        serde_json::from_value(json!([
            { "id": "a", "operation": "split-by-direction", "points": [[0.0, 0.0]], "direction": "North" },
            { "id": "b", "operation": "split-by-direction", "points": [[0.0, 10.0]], "direction": "South" },
            { "id": "c", "operation": "split-by-direction", "points": [[0.0, 20.0]], "direction": "North" }
        ]))
        .unwrap()
    }

    #[test]
    fn frame_has_one_row_per_clue() {
        let ops = ops();
        let steps = fold_trace(None, &ops, &EngineCfg::default());
        let df = trace_frame(&ops, &steps).unwrap();
        assert_eq!(df.shape(), (3, 6));
        let empty = df.column("empty").unwrap().bool().unwrap();
        assert_eq!(empty.get(0), Some(false));
        assert_eq!(empty.get(2), Some(true));
    }

    #[test]
    fn csv_round_trips_through_lazy_reader() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("steps.csv");
        let ops = ops();
        let steps = fold_trace(None, &ops, &EngineCfg::default());
        let mut df = trace_frame(&ops, &steps).unwrap();
        write_csv(&mut df, &out).unwrap();
        let back = LazyCsvReader::new(&out).finish().unwrap().collect().unwrap();
        assert_eq!(back.height(), 3);
        assert!(back.column("kind").is_ok());
    }
}
