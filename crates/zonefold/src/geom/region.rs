//! The `Region` value folded by the dispatcher.
//!
//! Invariants
//! - A `Region` is never mutated in place; every algebra op builds a new one.
//! - The canonical empty region is a `Polygon` with an empty exterior ring and
//!   no interiors. `MultiPolygon` results with zero members normalize to it.
//! - Polygons with an empty exterior are dropped on normalization.

use geo::{coord, Area, BoundingRect, Contains, LineString, MultiPolygon, Point, Polygon, Rect};

/// A Polygon or MultiPolygon candidate set.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Region {
    /// Canonical empty region (no rings).
    pub fn empty() -> Self {
        Region::Polygon(Polygon::new(LineString::new(Vec::new()), Vec::new()))
    }

    /// The whole-world rectangle `[-180, -90, 180, 90]`.
    pub fn world() -> Self {
        Self::from_bbox(-180.0, -90.0, 180.0, 90.0)
    }

    /// Axis-aligned rectangle `[min_x, min_y, max_x, max_y]` in degrees.
    pub fn from_bbox(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let rect = Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y });
        Region::Polygon(rect.to_polygon())
    }

    /// Collapse a boolean-op result to the smallest matching variant.
    pub fn from_multi(mp: MultiPolygon<f64>) -> Self {
        let mut polys: Vec<Polygon<f64>> = mp
            .0
            .into_iter()
            .filter(|p| !p.exterior().0.is_empty())
            .collect();
        match polys.len() {
            0 => Region::empty(),
            1 => Region::Polygon(polys.remove(0)),
            _ => Region::MultiPolygon(MultiPolygon::new(polys)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            Region::Polygon(p) => p.exterior().0.is_empty(),
            Region::MultiPolygon(mp) => mp.0.iter().all(|p| p.exterior().0.is_empty()),
        }
    }

    /// Owned MultiPolygon view (empty region → zero members).
    pub fn to_multi(&self) -> MultiPolygon<f64> {
        match self {
            Region::Polygon(p) if p.exterior().0.is_empty() => MultiPolygon::new(Vec::new()),
            Region::Polygon(p) => MultiPolygon::new(vec![p.clone()]),
            Region::MultiPolygon(mp) => mp.clone(),
        }
    }

    /// Number of member polygons (0 for the empty region).
    pub fn polygon_count(&self) -> usize {
        match self {
            Region::Polygon(p) if p.exterior().0.is_empty() => 0,
            Region::Polygon(_) => 1,
            Region::MultiPolygon(mp) => mp.0.len(),
        }
    }

    /// Planar area in square degrees.
    pub fn area_deg2(&self) -> f64 {
        match self {
            Region::Polygon(p) => p.unsigned_area(),
            Region::MultiPolygon(mp) => mp.unsigned_area(),
        }
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        if self.is_empty() {
            return None;
        }
        match self {
            Region::Polygon(p) => p.bounding_rect(),
            Region::MultiPolygon(mp) => mp.bounding_rect(),
        }
    }

    /// Point-in-region test (boundary points are not contained).
    pub fn contains_point(&self, p: Point<f64>) -> bool {
        match self {
            Region::Polygon(poly) => !poly.exterior().0.is_empty() && poly.contains(&p),
            Region::MultiPolygon(mp) => mp.contains(&p),
        }
    }

    /// All exterior and interior coordinates, in ring order.
    pub fn coords(&self) -> Vec<geo::Coord<f64>> {
        let mut out = Vec::new();
        let mut push = |p: &Polygon<f64>| {
            out.extend(p.exterior().coords().copied());
            for ring in p.interiors() {
                out.extend(ring.coords().copied());
            }
        };
        match self {
            Region::Polygon(p) => push(p),
            Region::MultiPolygon(mp) => mp.0.iter().for_each(push),
        }
        out
    }
}

impl From<Polygon<f64>> for Region {
    fn from(p: Polygon<f64>) -> Self {
        Region::Polygon(p)
    }
}

impl From<MultiPolygon<f64>> for Region {
    fn from(mp: MultiPolygon<f64>) -> Self {
        Region::from_multi(mp)
    }
}

impl From<Rect<f64>> for Region {
    fn from(r: Rect<f64>) -> Self {
        Region::Polygon(r.to_polygon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;

    #[test]
    fn empty_region_has_no_rings() {
        let e = Region::empty();
        assert!(e.is_empty());
        assert_eq!(e.polygon_count(), 0);
        assert_eq!(e.area_deg2(), 0.0);
        assert!(e.bounding_rect().is_none());
        assert!(!e.contains_point(point! { x: 0.0, y: 0.0 }));
        assert!(e.to_multi().0.is_empty());
    }

    #[test]
    fn from_multi_collapses() {
        assert!(Region::from_multi(MultiPolygon::new(vec![])).is_empty());
        let world = Region::world();
        let single = Region::from_multi(world.to_multi());
        assert!(matches!(single, Region::Polygon(_)));
        assert!((single.area_deg2() - 360.0 * 180.0).abs() < 1e-6);
    }
}
