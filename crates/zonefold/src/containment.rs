//! Which polygon feature contains a point.
//!
//! Walks Feature / FeatureCollection / GeometryCollection / bare geometry in
//! document order and returns the first polygonal member containing the point.
//! Overlaps resolve to first-found, not smallest-area.

use geo::Point;

use crate::geojson::{member_region, Feature, GeoJson};

/// First feature whose Polygon/MultiPolygon geometry contains `point`.
///
/// Bare geometries are returned wrapped in a property-less `Feature`.
pub fn find_containing_feature(point: Point<f64>, gj: &GeoJson) -> Option<Feature> {
    match gj {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .iter()
            .find_map(|f| find_containing_feature(point, f)),
        GeoJson::GeometryCollection { geometries } => geometries
            .iter()
            .find_map(|g| find_containing_feature(point, g)),
        GeoJson::Feature(f) => {
            let region = f.geometry.as_deref().and_then(member_region)?;
            region.contains_point(point).then(|| f.clone())
        }
        bare => {
            let region = member_region(bare)?;
            region
                .contains_point(point)
                .then(|| Feature::from_geometry(bare.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;
    use serde_json::json;

    fn collection() -> GeoJson {
        serde_json::from_value(json!({ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": { "name": "A" }, "geometry": { "type": "Polygon",
              "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]] } },
            { "type": "Feature", "properties": { "name": "B" }, "geometry": { "type": "Polygon",
              "coordinates": [[[5.0, 5.0], [7.0, 5.0], [7.0, 7.0], [5.0, 7.0], [5.0, 5.0]]] } }
        ]}))
        .unwrap()
    }

    fn name(f: &Feature) -> &str {
        f.properties.as_ref().and_then(|p| p["name"].as_str()).unwrap_or("")
    }

    #[test]
    fn finds_the_containing_polygon() {
        let found = find_containing_feature(point! { x: 1.0, y: 1.0 }, &collection()).unwrap();
        assert_eq!(name(&found), "A");
        let found = find_containing_feature(point! { x: 6.0, y: 6.5 }, &collection()).unwrap();
        assert_eq!(name(&found), "B");
    }

    #[test]
    fn point_outside_everything_is_none() {
        assert!(find_containing_feature(point! { x: 3.5, y: 3.5 }, &collection()).is_none());
    }

    #[test]
    fn overlapping_polygons_resolve_to_document_order() {
        let gj: GeoJson = serde_json::from_value(json!({ "type": "FeatureCollection", "features": [
            { "type": "FeatureCollection", "features": [
                { "type": "Feature", "properties": { "name": "big" }, "geometry": { "type": "Polygon",
                  "coordinates": [[[-10.0, -10.0], [10.0, -10.0], [10.0, 10.0], [-10.0, 10.0], [-10.0, -10.0]]] } }
            ]},
            { "type": "Feature", "properties": { "name": "small" }, "geometry": { "type": "Polygon",
              "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]] } }
        ]}))
        .unwrap();
        let found = find_containing_feature(point! { x: 0.5, y: 0.5 }, &gj).unwrap();
        assert_eq!(name(&found), "big");
    }

    #[test]
    fn bare_geometry_is_wrapped() {
        let gj: GeoJson = serde_json::from_value(json!({ "type": "MultiPolygon",
            "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]] }))
        .unwrap();
        let found = find_containing_feature(point! { x: 0.5, y: 0.5 }, &gj).unwrap();
        assert!(found.properties.is_none());
        assert!(found.geometry.is_some());
    }
}
