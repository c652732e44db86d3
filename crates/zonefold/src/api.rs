//! Curated surface for collaborators (UI layer, fact store, CLI).
//!
//! Everything here is also reachable through its module; this file only
//! gathers the entry points that make up the engine's boundary.

// The fold boundary
pub use crate::ops::{
    apply_operation, apply_operation_with, compute_aggregate_region,
    compute_aggregate_region_with, fold_trace, Executor, FoldRequest, Inline, Pending, Worker,
};
// Clue records and fact intake
pub use crate::ops::{display_order, merge_operations, operations_from_facts, Fact, Operation};
// Auxiliary geometry for display
pub use crate::bisect::bisector_line;
pub use crate::containment::find_containing_feature;
pub use crate::geojson::{play_area_region, to_region, GeoJson};
pub use crate::geom::{relative_heading, Heading};

use geo::Point;

/// Parse `"lon,lat"` (whitespace tolerated) into a point.
pub fn parse_lon_lat(s: &str) -> crate::Result<Point<f64>> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|_| crate::Error::InvalidCoordinate(s.to_string()))?;
    match parts.as_slice() {
        [lon, lat] => Ok(Point::new(*lon, *lat)),
        _ => Err(crate::Error::InvalidPoint { len: parts.len() }),
    }
}
