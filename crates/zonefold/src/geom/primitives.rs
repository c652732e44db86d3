//! Point-level primitives: distances, circles, headings.
//!
//! Conventions
//! - Coordinates are `[lon, lat]` degrees; `x = lon`, `y = lat`.
//! - Distances are great-circle (haversine) kilometres.
//! - Shapes are built in planar lon/lat space; no datum transforms.

use geo::{
    Closest, Coord, HaversineClosestPoint, HaversineDestination, HaversineDistance, LineString,
    MultiLineString, Point, Polygon,
};
use serde::{Deserialize, Serialize};

use crate::cfg::KM_PER_M;

/// Great-circle distance in kilometres.
#[inline]
pub fn distance_km(a: Point<f64>, b: Point<f64>) -> f64 {
    a.haversine_distance(&b) * KM_PER_M
}

/// Circle of `radius_km` around `center` as a `steps`-sided polygon.
///
/// Vertices are geodesic destinations at bearings `360·i/steps`, so each one
/// sits exactly `radius_km` from the centre. Radius 0 yields a degenerate ring.
/// Longitudes are kept continuous around the centre, so a circle crossing the
/// antimeridian extends past ±180 and is clipped by whatever it is intersected with.
pub fn circle_polygon(center: Point<f64>, radius_km: f64, steps: usize) -> Polygon<f64> {
    Polygon::new(LineString::new(circle_coords(center, radius_km, steps)), Vec::new())
}

pub(crate) fn circle_coords(center: Point<f64>, radius_km: f64, steps: usize) -> Vec<Coord<f64>> {
    let steps = steps.max(3);
    let radius_m = radius_km.max(0.0) / KM_PER_M;
    (0..steps)
        .map(|i| {
            // Negated bearings walk the ring counter-clockwise from north.
            let bearing = -360.0 * i as f64 / steps as f64;
            let dest = center.haversine_destination(bearing, radius_m).0;
            Coord {
                x: center.x() + wrap180(dest.x - center.x()),
                y: dest.y,
            }
        })
        .collect()
}

/// Longitude difference folded into `[-180, 180)`.
#[inline]
fn wrap180(dx: f64) -> f64 {
    (dx + 180.0).rem_euclid(360.0) - 180.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatHeading {
    North,
    South,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LonHeading {
    East,
    West,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub lat: LatHeading,
    pub lon: LonHeading,
}

/// Heading of `to` as seen from `from`, by component sign.
///
/// Strictly-greater comparisons: equal latitude reads `South`, equal longitude
/// reads `West`. There is no "same latitude" answer.
pub fn relative_heading(from: Point<f64>, to: Point<f64>) -> Heading {
    Heading {
        lat: if to.y() > from.y() {
            LatHeading::North
        } else {
            LatHeading::South
        },
        lon: if to.x() > from.x() {
            LonHeading::East
        } else {
            LonHeading::West
        },
    }
}

/// Minimum distance (km) from `p` to `line`.
///
/// Segments are great-circle arcs; the nearest point on them is found on the
/// sphere, not in lon/lat degree space. An empty line is infinitely far away.
pub fn point_to_line_distance_km(p: Point<f64>, line: &LineString<f64>) -> f64 {
    match line.0.len() {
        0 => return f64::INFINITY,
        1 => return distance_km(p, Point::from(line.0[0])),
        _ => {}
    }
    match line.haversine_closest_point(&p) {
        Closest::Intersection(c) | Closest::SinglePoint(c) => distance_km(p, c),
        Closest::Indeterminate => f64::INFINITY,
    }
}

/// Minimum distance (km) from `p` to any component of `lines`.
pub fn point_to_lines_distance_km(p: Point<f64>, lines: &MultiLineString<f64>) -> f64 {
    lines
        .0
        .iter()
        .map(|l| point_to_line_distance_km(p, l))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, HaversineIntermediate};
    use proptest::prelude::*;

    #[test]
    fn one_degree_at_equator_is_about_111_km() {
        let d = distance_km(point! { x: 0.0, y: 0.0 }, point! { x: 1.0, y: 0.0 });
        assert!((d - 111.19).abs() < 0.1, "d = {d}");
    }

    #[test]
    fn circle_vertices_sit_on_radius() {
        let c = point! { x: 10.0, y: 45.0 };
        let poly = circle_polygon(c, 25.0, 64);
        // closed ring: 64 vertices + closing coordinate
        assert_eq!(poly.exterior().0.len(), 65);
        for v in poly.exterior().points() {
            assert!((distance_km(c, v) - 25.0).abs() < 1e-6);
        }
    }

    #[test]
    fn heading_basic_quadrants() {
        let o = point! { x: 0.0, y: 0.0 };
        let h = relative_heading(o, point! { x: 1.0, y: 1.0 });
        assert_eq!(h.lat, LatHeading::North);
        assert_eq!(h.lon, LonHeading::East);
        let h = relative_heading(o, point! { x: -1.0, y: -1.0 });
        assert_eq!(h.lat, LatHeading::South);
        assert_eq!(h.lon, LonHeading::West);
    }

    #[test]
    fn point_to_line_uses_nearest_segment() {
        let line = line_string![(x: -1.0, y: 1.0), (x: 1.0, y: 1.0)];
        let d = point_to_line_distance_km(point! { x: 0.0, y: 0.0 }, &line);
        let expected = distance_km(point! { x: 0.0, y: 0.0 }, point! { x: 0.0, y: 1.0 });
        // the great-circle arc bows slightly poleward of the parallel
        assert!(d >= expected && d - expected < 0.05, "d = {d}");
        // beyond the segment end, distance goes to the endpoint
        let d_end = point_to_line_distance_km(point! { x: 3.0, y: 1.0 }, &line);
        let expected_end = distance_km(point! { x: 3.0, y: 1.0 }, point! { x: 1.0, y: 1.0 });
        assert!((d_end - expected_end).abs() < 1e-6);
    }

    #[test]
    fn high_latitude_diagonal_matches_dense_minimum() {
        // Planar nearest points drift badly this far north.
        let (a, b) = (point! { x: 0.0, y: 60.0 }, point! { x: 4.0, y: 62.0 });
        let line = LineString::from(vec![a.0, b.0]);
        let p = point! { x: 3.0, y: 60.0 };
        let dense = (0..=4000)
            .map(|i| distance_km(p, a.haversine_intermediate(&b, i as f64 / 4000.0)))
            .fold(f64::INFINITY, f64::min);
        let d = point_to_line_distance_km(p, &line);
        assert!((d - dense).abs() < 0.05, "d = {d}, dense = {dense}");
    }

    #[test]
    fn circle_near_antimeridian_stays_continuous() {
        let c = point! { x: 179.8, y: 10.0 };
        let ring = circle_coords(c, 100.0, 64);
        for v in &ring {
            assert!((v.x - c.x()).abs() < 2.0, "vertex jumped to {}", v.x);
            assert!((distance_km(c, Point::from(*v)) - 100.0).abs() < 1e-6);
        }
        assert!(ring.iter().any(|v| v.x > 180.0));
    }

    #[test]
    fn empty_line_is_infinitely_far() {
        let line: LineString<f64> = LineString::new(vec![]);
        assert!(point_to_line_distance_km(point! { x: 0.0, y: 0.0 }, &line).is_infinite());
    }

    proptest! {
        // Known approximation: ties fall to South/West rather than being
        // reported as "same latitude/longitude".
        #[test]
        fn heading_ties_resolve_south_west(x in -180.0f64..180.0, y in -90.0f64..90.0) {
            let p = point! { x: x, y: y };
            let h = relative_heading(p, p);
            prop_assert_eq!(h.lat, LatHeading::South);
            prop_assert_eq!(h.lon, LonHeading::West);
        }

        #[test]
        fn distance_is_symmetric(
            ax in -179.0f64..179.0, ay in -80.0f64..80.0,
            bx in -179.0f64..179.0, by in -80.0f64..80.0,
        ) {
            let a = point! { x: ax, y: ay };
            let b = point! { x: bx, y: by };
            prop_assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-6);
        }
    }
}
