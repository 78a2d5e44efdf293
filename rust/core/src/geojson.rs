// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal GeoJSON model
//!
//! Only `features[].geometry.coordinates` and `features[].properties.name`
//! are read. CRS, bounding boxes and foreign members are ignored.

use serde::Deserialize;

use crate::error::{Error, Result};

/// A 2D position; altitude and further ordinates are dropped
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        match values.as_slice() {
            [x, y, ..] => Ok(Self::new(*x, *y)),
            _ => Err(Error::InvalidPosition(format!(
                "expected at least 2 ordinates, got {}",
                values.len()
            ))),
        }
    }
}

/// Linear ring; the first ring of a polygon is its outer boundary
pub type Ring = Vec<Position>;

/// Geometry member of a feature
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Non-empty outer rings of every polygon part (holes are not consumed)
    pub fn outer_rings(&self) -> Vec<&Ring> {
        let rings: Vec<&Ring> = match self {
            Geometry::Polygon { coordinates } => coordinates.first().into_iter().collect(),
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().filter_map(|rings| rings.first()).collect()
            }
            Geometry::Unsupported => Vec::new(),
        };
        rings.into_iter().filter(|ring| !ring.is_empty()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.outer_rings().is_empty()
    }
}

/// Feature properties; only the display name is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    /// Display name from `properties.name`, empty when absent
    pub fn display_name(&self) -> &str {
        self.properties
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("")
    }

    /// True when the feature carries a geometry with at least one vertex
    pub fn has_geometry(&self) -> bool {
        self.geometry.as_ref().is_some_and(|g| !g.is_empty())
    }

    pub fn outer_rings(&self) -> Vec<&Ring> {
        self.geometry
            .as_ref()
            .map(Geometry::outer_rings)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse GeoJSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Features that carry geometry, in document order
    pub fn polygon_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.has_geometry())
    }

    /// Number of features filtered out for lacking geometry
    pub fn features_without_geometry(&self) -> usize {
        self.features.iter().filter(|f| !f.has_geometry()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "name": "ShinjukuTerminal_2_Floor",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::6677" } },
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Shop A", "id": 17 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [10.0, 0.0], [10.0, 5.0, 12.5], [0.0, 0.0]]]
                }
            },
            { "type": "Feature", "properties": { "name": "Ghost" }, "geometry": null },
            { "type": "Feature", "properties": {} },
            {
                "type": "Feature",
                "properties": null,
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let collection = FeatureCollection::from_json(SAMPLE).unwrap();
        assert_eq!(collection.features.len(), 4);

        let features: Vec<_> = collection.polygon_features().collect();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].display_name(), "Shop A");

        let rings = features[0].outer_rings();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][2], Position::new(10.0, 5.0));
        assert_eq!(collection.features_without_geometry(), 3);
    }

    #[test]
    fn test_multipolygon_outer_rings() {
        let text = r#"{"features": [{"geometry": {"type": "MultiPolygon", "coordinates": [
            [[[0,0],[1,0],[1,1],[0,0]], [[0.2,0.2],[0.4,0.2],[0.4,0.4],[0.2,0.2]]],
            [[[5,5],[6,5],[6,6],[5,5]]]
        ]}}]}"#;
        let collection = FeatureCollection::from_json(text).unwrap();
        let rings = collection.features[0].outer_rings();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[1][0], Position::new(5.0, 5.0));
        assert_eq!(collection.features[0].display_name(), "");
    }

    #[test]
    fn test_empty_multipolygon_part_is_skipped() {
        let text = r#"{"features": [{"geometry": {"type": "MultiPolygon", "coordinates": [
            [[]],
            [[[0,0],[1,0],[1,1],[0,0]]]
        ]}}]}"#;
        let collection = FeatureCollection::from_json(text).unwrap();
        let feature = &collection.features[0];
        assert!(feature.has_geometry());
        let rings = feature.outer_rings();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][1], Position::new(1.0, 0.0));
    }

    #[test]
    fn test_empty_coordinates_have_no_geometry() {
        let text = r#"{"features": [{"geometry": {"type": "Polygon", "coordinates": []}}]}"#;
        let collection = FeatureCollection::from_json(text).unwrap();
        assert_eq!(collection.polygon_features().count(), 0);
    }

    #[test]
    fn test_malformed_json() {
        assert!(FeatureCollection::from_json("{\"features\": [").is_err());
        assert!(FeatureCollection::from_json(
            r#"{"features": [{"geometry": {"type": "Polygon", "coordinates": [[[1.0]]]}}]}"#
        )
        .is_err());
    }
}
