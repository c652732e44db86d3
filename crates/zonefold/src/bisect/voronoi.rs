//! Voronoi cells restricted to a box, and the shared boundary between two cells.
//!
//! Each cell is built directly as a half-plane intersection: the box sides plus
//! one "closer to my site than to yours" half-plane per other site. Cells keep
//! the index of their generating site so callers can select by identity.

use geo::{Coord, LineString, Point, Polygon, Rect};
use nalgebra::Vector2;

use super::halfplane::{HalfPlane, HalfPlanes};
use crate::cfg::FEAS_EPS;
use crate::geom::distance_km;

/// One Voronoi cell clipped to the enclosing box.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiCell {
    /// Index into the `sites` slice the cell was built from.
    pub site: usize,
    pub polygon: Polygon<f64>,
}

/// Build the box-clipped Voronoi diagram of `sites`.
///
/// Sites coinciding with an earlier site (within `FEAS_EPS` per axis) and
/// sites whose cell is empty produce no cell, so degenerate input yields fewer
/// cells than sites.
pub fn voronoi_cells(sites: &[Point<f64>], bbox: Rect<f64>) -> Vec<VoronoiCell> {
    let vs: Vec<Vector2<f64>> = sites.iter().map(|p| Vector2::new(p.x(), p.y())).collect();
    let mut cells = Vec::with_capacity(vs.len());
    'sites: for (i, &site) in vs.iter().enumerate() {
        if vs[..i].iter().any(|&q| coincident(q, site)) {
            continue;
        }
        let mut planes = HalfPlanes::from_rect(bbox);
        for (j, &other) in vs.iter().enumerate() {
            if i == j || coincident(other, site) {
                continue;
            }
            if !planes.insert(HalfPlane::closer_to(site, other)) {
                continue 'sites;
            }
        }
        if let Some(verts) = planes.intersection().vertices() {
            let ring: Vec<Coord<f64>> = verts.iter().map(|v| Coord { x: v.x, y: v.y }).collect();
            cells.push(VoronoiCell {
                site: i,
                polygon: Polygon::new(LineString::new(ring), Vec::new()),
            });
        }
    }
    cells
}

/// Pick the cell generated by `sites[target]`.
///
/// Identity match first. If no cell carries that index, fall back to the cell
/// whose vertex mean is strictly nearer to `sites[target]` than to any other
/// site (a single vertex can sit on the bisector and tie).
pub fn cell_for_site<'a>(
    cells: &'a [VoronoiCell],
    sites: &[Point<f64>],
    target: usize,
) -> Option<&'a VoronoiCell> {
    if let Some(cell) = cells.iter().find(|c| c.site == target) {
        return Some(cell);
    }
    let target_pt = *sites.get(target)?;
    cells.iter().find(|cell| {
        let Some(sample) = vertex_mean(&cell.polygon) else {
            return false;
        };
        let d_target = distance_km(sample, target_pt);
        sites
            .iter()
            .enumerate()
            .filter(|(k, _)| *k != target)
            .all(|(_, s)| d_target < distance_km(sample, *s))
    })
}

fn vertex_mean(poly: &Polygon<f64>) -> Option<Point<f64>> {
    let ring = &poly.exterior().0;
    // Skip the closing coordinate.
    let open = &ring[..ring.len().saturating_sub(1)];
    if open.is_empty() {
        return None;
    }
    let n = open.len() as f64;
    let (sx, sy) = open.iter().fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
    Some(Point::new(sx / n, sy / n))
}

/// Coordinates common to both cells, within `tol` per axis, as a polyline.
///
/// For two sites this is the perpendicular bisector clipped to the box.
/// `None` when fewer than two shared coordinates exist.
pub fn shared_boundary(a: &Polygon<f64>, b: &Polygon<f64>, tol: f64) -> Option<LineString<f64>> {
    let mut shared: Vec<Coord<f64>> = Vec::new();
    for ca in a.exterior().coords() {
        let on_b = b
            .exterior()
            .coords()
            .any(|cb| (ca.x - cb.x).abs() <= tol && (ca.y - cb.y).abs() <= tol);
        let seen = shared
            .iter()
            .any(|s| (ca.x - s.x).abs() <= tol && (ca.y - s.y).abs() <= tol);
        if on_b && !seen {
            shared.push(*ca);
        }
    }
    (shared.len() >= 2).then(|| LineString::new(shared))
}

#[inline]
fn coincident(a: Vector2<f64>, b: Vector2<f64>) -> bool {
    (a.x - b.x).abs() <= FEAS_EPS && (a.y - b.y).abs() <= FEAS_EPS
}
