//! Voronoi bisection of a region between two reference points.
//!
//! Algorithm
//! 1. Box = bounds of (region ∪ {p1, p2}) padded by `EngineCfg::bbox_pad_deg`.
//! 2. Two-site Voronoi diagram clipped to the box → two convex cells.
//! 3. Select the cell of the point being shaded out (identity, then vertex-mean fallback).
//! 4. Intersect that cell with the region.
//!
//! Failure policy is fail-open: fewer than two cells (coincident points) leaves
//! the region unchanged, so a malformed clue never wipes established constraints.
//!
//! Code cross-refs: `halfplane::HalfPlanes`, `geom::algebra::{intersect, difference}`.

mod halfplane;
mod voronoi;

pub use halfplane::{HalfPlane, HalfPlanes, Intersection};
pub use voronoi::{cell_for_site, shared_boundary, voronoi_cells, VoronoiCell};

use geo::{coord, LineString, Point, Rect};

use crate::cfg::EngineCfg;
use crate::geom::{self, Region};

/// Bounds of `region` and `points`, padded by `pad` degrees on every side.
pub fn enclosing_bbox(region: &Region, points: &[Point<f64>], pad: f64) -> Option<Rect<f64>> {
    let mut min = coord! { x: f64::INFINITY, y: f64::INFINITY };
    let mut max = coord! { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };
    let mut grow = |c: geo::Coord<f64>| {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    };
    if let Some(r) = region.bounding_rect() {
        grow(r.min());
        grow(r.max());
    }
    points.iter().for_each(|p| grow(p.0));
    if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
        return None;
    }
    Some(Rect::new(
        coord! { x: min.x - pad, y: min.y - pad },
        coord! { x: max.x + pad, y: max.y + pad },
    ))
}

/// The part of `region` closer to `sites[keep]` than to the other site.
///
/// `None` when the diagram is degenerate (fewer than two cells).
pub fn closer_half(
    region: &Region,
    sites: [Point<f64>; 2],
    keep: usize,
    cfg: &EngineCfg,
) -> Option<Region> {
    let bbox = enclosing_bbox(region, &sites, cfg.bbox_pad_deg)?;
    let cells = voronoi_cells(&sites, bbox);
    if cells.len() < 2 {
        tracing::warn!(
            cells = cells.len(),
            p1 = ?sites[0].x_y(),
            p2 = ?sites[1].x_y(),
            "degenerate voronoi bisection"
        );
        return None;
    }
    let cell = cell_for_site(&cells, &sites, keep)?;
    Some(geom::intersect(region, &Region::Polygon(cell.polygon.clone())))
}

/// Hotter/colder clue: the hider is closer to `sites[preferred]`.
///
/// The other point's half is shaded out and subtracted from the region.
/// Degenerate input returns the region unchanged.
pub fn hotter_colder(
    region: &Region,
    sites: [Point<f64>; 2],
    preferred: usize,
    cfg: &EngineCfg,
) -> Region {
    let shaded_site = if preferred == 0 { 1 } else { 0 };
    match closer_half(region, sites, shaded_site, cfg) {
        Some(shaded) => geom::difference(region, &shaded),
        None => region.clone(),
    }
}

/// The perpendicular bisector between `sites`, clipped to the padded box
/// around `region` and the sites. For display only.
pub fn bisector_line(
    region: &Region,
    sites: [Point<f64>; 2],
    cfg: &EngineCfg,
) -> Option<LineString<f64>> {
    let bbox = enclosing_bbox(region, &sites, cfg.bbox_pad_deg)?;
    let cells = voronoi_cells(&sites, bbox);
    if cells.len() < 2 {
        tracing::warn!(cells = cells.len(), "no bisector for degenerate sites");
        return None;
    }
    shared_boundary(&cells[0].polygon, &cells[1].polygon, cfg.boundary_tol)
}
