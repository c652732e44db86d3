//! GeoJSON intake and output.
//!
//! Every boundary that accepts caller geometry (play area, uploaded areas,
//! line sets, polygon sets) goes through this module, so Feature, bare
//! geometry, and FeatureCollection shapes are unwrapped in exactly one place.
//!
//! - `to_region`: Polygon-bearing GeoJSON → `Region`.
//! - `extract_lines`: line-bearing GeoJSON → candidate line entities.
//! - `From<&Region> for GeoJson`: output for rendering collaborators.

use std::str::FromStr;

use geo::{Coord, LineString, MultiLineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::geom::Region;

/// `[lon, lat]` plus optional extra components (altitude is ignored).
pub type Position = Vec<f64>;

/// GeoJSON object, tagged by its `type` member. Foreign members are ignored.
///
/// FeatureCollection members are full `GeoJson` values, which is how nested
/// collections (seen in hand-edited uploads) are represented.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<GeoJson> },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<Box<GeoJson>>,
    #[serde(default)]
    pub properties: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<GeoJson>,
}

impl FromStr for GeoJson {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Feature {
    /// Wrap a bare geometry with empty properties.
    pub fn from_geometry(geometry: GeoJson) -> Self {
        Self {
            id: None,
            geometry: Some(Box::new(geometry)),
            properties: None,
        }
    }
}

impl GeoJson {
    /// Members of a collection in document order, with nested collections
    /// flattened. A non-collection value is its own single member.
    pub fn members(&self) -> Vec<&GeoJson> {
        let mut out = Vec::new();
        collect_members(self, &mut out);
        out
    }
}

fn collect_members<'a>(gj: &'a GeoJson, out: &mut Vec<&'a GeoJson>) {
    match gj {
        GeoJson::FeatureCollection(fc) => fc.features.iter().for_each(|f| collect_members(f, out)),
        GeoJson::GeometryCollection { geometries } => {
            geometries.iter().for_each(|g| collect_members(g, out))
        }
        other => out.push(other),
    }
}

/// Normalize polygon-bearing GeoJSON into a `Region`.
///
/// Collections select the member at `index` (document order, nested
/// collections flattened) or, without an index, the first polygon-bearing
/// member. `None` when nothing polygonal is found.
pub fn to_region(gj: &GeoJson, index: Option<usize>) -> Option<Region> {
    let members = gj.members();
    match index {
        Some(i) => members.get(i).and_then(|m| member_region(m)),
        None => members.into_iter().find_map(member_region),
    }
}

/// Starting region of a fold: the normalized play area, else the world.
pub fn play_area_region(play_area: Option<&GeoJson>) -> Region {
    match play_area.and_then(|gj| to_region(gj, None)) {
        Some(region) => region,
        None => {
            if play_area.is_some() {
                tracing::warn!("play area has no polygon; using the whole world");
            }
            Region::world()
        }
    }
}

/// Region of a single (non-collection) member.
pub(crate) fn member_region(gj: &GeoJson) -> Option<Region> {
    match gj {
        GeoJson::Feature(f) => f.geometry.as_deref().and_then(member_region),
        GeoJson::Polygon { coordinates } => polygon_from_rings(coordinates).map(Region::Polygon),
        GeoJson::MultiPolygon { coordinates } => {
            let polys: Vec<Polygon<f64>> =
                coordinates.iter().filter_map(|p| polygon_from_rings(p)).collect();
            (!polys.is_empty()).then(|| Region::from_multi(MultiPolygon::new(polys)))
        }
        _ => None,
    }
}

/// Candidate line entities, in document order.
///
/// Each line-bearing feature is one entity (a MultiLineString feature stays
/// whole); a bare MultiLineString contributes one entity per component.
pub fn extract_lines(gj: &GeoJson) -> Vec<MultiLineString<f64>> {
    let mut out = Vec::new();
    for member in gj.members() {
        match member {
            GeoJson::MultiLineString { coordinates } => {
                out.extend(
                    coordinates
                        .iter()
                        .filter_map(|l| line_from_positions(l))
                        .map(|l| MultiLineString::new(vec![l])),
                );
            }
            other => {
                if let Some(lines) = member_lines(other) {
                    out.push(lines);
                }
            }
        }
    }
    out
}

fn member_lines(gj: &GeoJson) -> Option<MultiLineString<f64>> {
    match gj {
        GeoJson::Feature(f) => f.geometry.as_deref().and_then(member_lines),
        GeoJson::LineString { coordinates } => {
            line_from_positions(coordinates).map(|l| MultiLineString::new(vec![l]))
        }
        GeoJson::MultiLineString { coordinates } => {
            let lines: Vec<LineString<f64>> =
                coordinates.iter().filter_map(|l| line_from_positions(l)).collect();
            (!lines.is_empty()).then(|| MultiLineString::new(lines))
        }
        _ => None,
    }
}

/// `[lon, lat, ..]` → `Coord`.
pub fn coord_of(pos: &[f64]) -> Result<Coord<f64>> {
    match pos {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(Error::InvalidPoint { len: pos.len() }),
    }
}

fn coords_of(positions: &[Position]) -> Vec<Coord<f64>> {
    positions
        .iter()
        .filter_map(|p| match coord_of(p) {
            Ok(c) => Some(c),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed position");
                None
            }
        })
        .collect()
}

fn line_from_positions(positions: &[Position]) -> Option<LineString<f64>> {
    let coords = coords_of(positions);
    (!coords.is_empty()).then(|| LineString::new(coords))
}

fn polygon_from_rings(rings: &[Vec<Position>]) -> Option<Polygon<f64>> {
    let mut rings = rings.iter().map(|r| LineString::new(coords_of(r)));
    let exterior = rings.next()?;
    if exterior.0.len() < 3 {
        return None;
    }
    Some(Polygon::new(exterior, rings.filter(|r| r.0.len() >= 3).collect()))
}

fn positions_of(ring: &LineString<f64>) -> Vec<Position> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}

fn polygon_positions(p: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(p.exterior())
        .chain(p.interiors())
        .map(positions_of)
        .collect()
}

impl From<&Region> for GeoJson {
    fn from(region: &Region) -> Self {
        match region {
            Region::Polygon(_) if region.is_empty() => GeoJson::Polygon {
                coordinates: Vec::new(),
            },
            Region::Polygon(p) => GeoJson::Polygon {
                coordinates: polygon_positions(p),
            },
            Region::MultiPolygon(mp) => GeoJson::MultiPolygon {
                coordinates: mp.0.iter().map(polygon_positions).collect(),
            },
        }
    }
}

impl From<LineString<f64>> for GeoJson {
    fn from(line: LineString<f64>) -> Self {
        GeoJson::LineString {
            coordinates: positions_of(&line),
        }
    }
}
