//! Operation dispatcher and the fold.
//!
//! `apply_operation` is an exhaustive match over `OperationKind`: each arm
//! extracts what its kind requires and returns `None` when something is
//! missing, which the caller turns into a no-op. Nothing here panics or
//! errors; geometry failures are handled by the fail-empty algebra and the
//! fail-open bisection underneath.

use geo::{MultiLineString, Point};

use super::operation::{
    Areas, CloserToLine, Direction, DrawCircle, HotterColder, LonLat, Operation, OperationKind,
    PolygonLocation, SameClosestLine, SplitByDirection,
};
use crate::bisect;
use crate::cfg::EngineCfg;
use crate::containment::find_containing_feature;
use crate::geojson::{self, extract_lines, member_region, GeoJson};
use crate::geom::{self, circle_polygon, Region};
use crate::nearest_line;

/// Apply one clue with default configuration.
pub fn apply_operation(op: &Operation, region: &Region) -> Region {
    apply_operation_with(op, region, &EngineCfg::default())
}

/// Apply one clue. Missing required fields leave `region` unchanged.
pub fn apply_operation_with(op: &Operation, region: &Region, cfg: &EngineCfg) -> Region {
    let applied = match &op.kind {
        OperationKind::DrawCircle(p) => draw_circle(p, region, cfg),
        OperationKind::SplitByDirection(p) => split_by_direction(p, region),
        OperationKind::HotterColder(p) => hotter_colder(p, region, cfg),
        OperationKind::Areas(p) => areas(p, region),
        OperationKind::CloserToLine(p) => closer_to_line(p, region, cfg),
        OperationKind::SameClosestLine(p) => same_closest_line(p, region, cfg),
        OperationKind::PolygonLocation(p) => polygon_location(p, region),
    };
    match applied {
        Some(out) => out,
        None => {
            tracing::debug!(id = %op.id, kind = op.kind.name(), "missing fields; clue is a no-op");
            region.clone()
        }
    }
}

/// Fold `operations` over the normalized play area, with default configuration.
pub fn compute_aggregate_region(play_area: Option<&GeoJson>, operations: &[Operation]) -> Region {
    compute_aggregate_region_with(play_area, operations, &EngineCfg::default())
}

/// Left fold in slice order. Order matters: the grid classifier rasterizes the
/// running region, so permuting clues can change the result.
pub fn compute_aggregate_region_with(
    play_area: Option<&GeoJson>,
    operations: &[Operation],
    cfg: &EngineCfg,
) -> Region {
    let start = geojson::play_area_region(play_area);
    operations
        .iter()
        .fold(start, |region, op| apply_operation_with(op, &region, cfg))
}

/// Region after each clue, in order (`len == operations.len()`).
pub fn fold_trace(
    play_area: Option<&GeoJson>,
    operations: &[Operation],
    cfg: &EngineCfg,
) -> Vec<Region> {
    let mut region = geojson::play_area_region(play_area);
    let mut steps = Vec::with_capacity(operations.len());
    for op in operations {
        region = apply_operation_with(op, &region, cfg);
        tracing::debug!(
            id = %op.id,
            kind = op.kind.name(),
            polygons = region.polygon_count(),
            "clue applied"
        );
        steps.push(region.clone());
    }
    steps
}

#[inline]
fn point_at(points: &[LonLat], i: usize) -> Option<Point<f64>> {
    points.get(i).map(|[lon, lat]| Point::new(*lon, *lat))
}

fn draw_circle(p: &DrawCircle, region: &Region, cfg: &EngineCfg) -> Option<Region> {
    let center = point_at(&p.points, 0)?;
    let radius = p.radius.filter(|r| r.is_finite() && *r >= 0.0)?;
    let circle = Region::Polygon(circle_polygon(center, radius, cfg.circle_steps));
    Some(if p.inside {
        geom::intersect(region, &circle)
    } else {
        geom::difference(region, &circle)
    })
}

/// Half of the world on the `direction` side of `at`.
pub fn direction_half_plane(at: Point<f64>, direction: Direction) -> Region {
    let (lon, lat) = at.x_y();
    match direction {
        Direction::North => Region::from_bbox(-180.0, lat, 180.0, 90.0),
        Direction::South => Region::from_bbox(-180.0, -90.0, 180.0, lat),
        Direction::East => Region::from_bbox(lon, -90.0, 180.0, 90.0),
        Direction::West => Region::from_bbox(-180.0, -90.0, lon, 90.0),
    }
}

fn split_by_direction(p: &SplitByDirection, region: &Region) -> Option<Region> {
    let at = point_at(&p.points, 0)?;
    let half = direction_half_plane(at, p.direction?);
    Some(geom::intersect(region, &half))
}

fn hotter_colder(p: &HotterColder, region: &Region, cfg: &EngineCfg) -> Option<Region> {
    let sites = [point_at(&p.points, 0)?, point_at(&p.points, 1)?];
    let preferred = p.preferred_point.filter(|i| *i < 2)?;
    Some(bisect::hotter_colder(region, sites, preferred, cfg))
}

fn areas(p: &Areas, region: &Region) -> Option<Region> {
    let area = geojson::to_region(p.uploaded_area.as_ref()?, p.feature_index)?;
    Some(if p.inside {
        geom::intersect(region, &area)
    } else {
        geom::difference(region, &area)
    })
}

fn lines_of(gj: Option<&GeoJson>) -> Option<Vec<MultiLineString<f64>>> {
    let lines = extract_lines(gj?);
    (!lines.is_empty()).then_some(lines)
}

fn closer_to_line(p: &CloserToLine, region: &Region, cfg: &EngineCfg) -> Option<Region> {
    let seeker = point_at(&p.points, 0)?;
    let lines = lines_of(p.multi_line_string.as_ref())?;
    let line = lines.get(p.line_index)?;
    Some(nearest_line::closer_to_line(region, seeker, line, p.proximity?, cfg))
}

fn same_closest_line(p: &SameClosestLine, region: &Region, cfg: &EngineCfg) -> Option<Region> {
    let lines = lines_of(p.multi_line_string.as_ref())?;
    if p.line_index >= lines.len() {
        return None;
    }
    Some(nearest_line::same_closest_line(region, &lines, p.line_index, p.same?, cfg))
}

fn polygon_location(p: &PolygonLocation, region: &Region) -> Option<Region> {
    let seeker = point_at(&p.points, 0)?;
    let polygons = p.polygon_geojson.as_ref()?;
    let containing = find_containing_feature(seeker, polygons)
        .and_then(|f| f.geometry.as_deref().and_then(member_region));
    Some(match containing {
        Some(area) => geom::intersect(region, &area),
        None => {
            tracing::debug!("seeker is in no polygon; nothing can match");
            Region::empty()
        }
    })
}
