//! Buffer-based nearest-line clue ("closer to / further from this line than
//! the seeker is").

use geo::{ConvexHull, Coord, MultiLineString, MultiPoint, Point};
use serde::{Deserialize, Serialize};

use crate::cfg::{EngineCfg, BUFFER_UNION_CHUNK};
use crate::geom::primitives::circle_coords;
use crate::geom::{self, point_to_lines_distance_km, Region};

/// Which side of the seeker's distance the hider is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    Closer,
    Further,
}

/// Polygon covering every point within `radius_km` of `lines`.
///
/// Each segment contributes the convex hull of the circles around its two
/// endpoints (a stadium); stadiums are combined with a cascading union.
pub fn line_buffer(lines: &MultiLineString<f64>, radius_km: f64, cfg: &EngineCfg) -> Region {
    let steps = cfg.circle_steps;
    let mut parts: Vec<Region> = Vec::new();
    for line in &lines.0 {
        let pts = &line.0;
        if pts.len() == 1 {
            parts.push(stadium(pts[0], pts[0], radius_km, steps));
            continue;
        }
        for seg in pts.windows(2) {
            parts.push(stadium(seg[0], seg[1], radius_km, steps));
        }
    }
    geom::union_all(parts, BUFFER_UNION_CHUNK)
}

fn stadium(a: Coord<f64>, b: Coord<f64>, radius_km: f64, steps: usize) -> Region {
    let mut coords = circle_coords(Point::from(a), radius_km, steps);
    if a != b {
        coords.extend(circle_coords(Point::from(b), radius_km, steps));
    }
    Region::Polygon(MultiPoint::from(coords).convex_hull())
}

/// Apply a closer-to-line clue.
///
/// `d` is the seeker's distance to `line`; the buffer of radius `d` is kept
/// (`Closer`) or removed (`Further`).
pub fn closer_to_line(
    region: &Region,
    seeker: Point<f64>,
    line: &MultiLineString<f64>,
    proximity: Proximity,
    cfg: &EngineCfg,
) -> Region {
    let d = point_to_lines_distance_km(seeker, line);
    if !d.is_finite() {
        tracing::warn!("designated line has no coordinates; clue skipped");
        return region.clone();
    }
    let buffer = line_buffer(line, d, cfg);
    tracing::debug!(distance_km = d, ?proximity, "line buffer built");
    match proximity {
        Proximity::Closer => geom::intersect(region, &buffer),
        Proximity::Further => geom::difference(region, &buffer),
    }
}
