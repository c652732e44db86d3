//! Clue records: the `Operation` sum type, fact-record intake, and id-based merging.
//!
//! JSON shape (one flat object per clue):
//! `{ "id": "...", "timestamp": "...", "operation": "draw-circle", "points": [[lon, lat]], "radius": 5.0, "inside": true }`
//!
//! Kind-specific fields are optional: a clue missing what its kind
//! requires is kept and later treated as a no-op by the dispatcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::geojson::GeoJson;
use crate::nearest_line::Proximity;

/// `[lon, lat]` in degrees.
pub type LonLat = [f64; 2];

/// One player-submitted clue. Immutable; edits are new values with the same `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    /// Display ordering only; the fold uses slice order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: OperationKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "kebab-case")]
pub enum OperationKind {
    DrawCircle(DrawCircle),
    SplitByDirection(SplitByDirection),
    HotterColder(HotterColder),
    Areas(Areas),
    CloserToLine(CloserToLine),
    SameClosestLine(SameClosestLine),
    PolygonLocation(PolygonLocation),
}

impl OperationKind {
    /// Wire name of the kind (`draw-circle`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::DrawCircle(_) => "draw-circle",
            OperationKind::SplitByDirection(_) => "split-by-direction",
            OperationKind::HotterColder(_) => "hotter-colder",
            OperationKind::Areas(_) => "areas",
            OperationKind::CloserToLine(_) => "closer-to-line",
            OperationKind::SameClosestLine(_) => "same-closest-line",
            OperationKind::PolygonLocation(_) => "polygon-location",
        }
    }
}

fn inside_by_default() -> bool {
    true
}

/// Hider is inside (or outside) `radius` km of `points[0]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCircle {
    #[serde(default)]
    pub points: Vec<LonLat>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default = "inside_by_default")]
    pub inside: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// Hider is on the `direction` side of `points[0]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitByDirection {
    #[serde(default)]
    pub points: Vec<LonLat>,
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// Hider is closer to `points[preferred_point]` than to the other point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotterColder {
    #[serde(default)]
    pub points: Vec<LonLat>,
    #[serde(default)]
    pub preferred_point: Option<usize>,
}

/// Hider is inside (or outside) an uploaded area.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Areas {
    #[serde(default)]
    pub uploaded_area: Option<GeoJson>,
    #[serde(default)]
    pub feature_index: Option<usize>,
    #[serde(default = "inside_by_default")]
    pub inside: bool,
}

/// Hider is closer to / further from line `line_index` than the seeker at `points[0]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloserToLine {
    #[serde(default)]
    pub points: Vec<LonLat>,
    #[serde(default)]
    pub multi_line_string: Option<GeoJson>,
    #[serde(default)]
    pub line_index: usize,
    #[serde(default)]
    pub proximity: Option<Proximity>,
}

/// Hider's nearest line is (or is not) line `line_index`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SameClosestLine {
    #[serde(default)]
    pub multi_line_string: Option<GeoJson>,
    #[serde(default)]
    pub line_index: usize,
    #[serde(default)]
    pub same: Option<bool>,
}

/// Hider is in the same polygon as the seeker at `points[0]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonLocation {
    #[serde(default)]
    pub points: Vec<LonLat>,
    #[serde(rename = "polygonGeoJSON", default)]
    pub polygon_geojson: Option<GeoJson>,
}

/// Persisted fact record: `{ id, fact_type: "GEO", fact_info: { operation, .. }, created_at }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub id: Value,
    pub fact_type: String,
    #[serde(default)]
    pub fact_info: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Fact {
    pub const GEO: &'static str = "GEO";

    /// Rebuild the clue stored in a `GEO` fact.
    pub fn to_operation(&self) -> Result<Operation> {
        if self.fact_type != Self::GEO {
            return Err(Error::NotGeoFact {
                fact_type: self.fact_type.clone(),
            });
        }
        let mut info = match &self.fact_info {
            Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        let id = match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        info.insert("id".into(), Value::String(id));
        if let Some(ts) = self.created_at {
            info.entry("timestamp").or_insert(serde_json::to_value(ts)?);
        }
        Ok(serde_json::from_value(Value::Object(info))?)
    }
}

/// Clues from fact records, in record order. Non-GEO and unreadable facts are skipped.
pub fn operations_from_facts(facts: &[Fact]) -> Vec<Operation> {
    facts
        .iter()
        .filter_map(|f| match f.to_operation() {
            Ok(op) => Some(op),
            Err(Error::NotGeoFact { fact_type }) => {
                tracing::debug!(%fact_type, "skipping non-geo fact");
                None
            }
            Err(err) => {
                tracing::warn!(id = %f.id, %err, "unreadable geo fact");
                None
            }
        })
        .collect()
}

/// Merge locally drafted clues into server-confirmed ones.
///
/// A draft with a confirmed id replaces it in place; other drafts are
/// appended in draft order. The result order is the fold order.
pub fn merge_operations(confirmed: &[Operation], drafts: &[Operation]) -> Vec<Operation> {
    let mut merged: Vec<Operation> = confirmed.to_vec();
    for draft in drafts {
        match merged.iter_mut().find(|op| op.id == draft.id) {
            Some(slot) => *slot = draft.clone(),
            None => merged.push(draft.clone()),
        }
    }
    merged
}

/// Clues sorted by timestamp for display (stable; undated last). Never fold in this order.
pub fn display_order(ops: &[Operation]) -> Vec<&Operation> {
    let mut sorted: Vec<&Operation> = ops.iter().collect();
    sorted.sort_by_key(|op| (op.timestamp.is_none(), op.timestamp));
    sorted
}
