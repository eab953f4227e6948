//! GeoJSON input for point layers.
//!
//! Only `Point` geometries are rendered; any other geometry type is rejected
//! rather than silently dropped.

use crate::{
    data::feature::{Feature, FeatureCollection},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

/// GeoJSON geometry. Only `Point` keeps typed coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Vec<f64> },
    MultiPoint { coordinates: Value },
    LineString { coordinates: Value },
    MultiLineString { coordinates: Value },
    Polygon { coordinates: Value },
    MultiPolygon { coordinates: Value },
    GeometryCollection { geometries: Value },
}

impl GeoJsonGeometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            GeoJsonGeometry::Point { .. } => "Point",
            GeoJsonGeometry::MultiPoint { .. } => "MultiPoint",
            GeoJsonGeometry::LineString { .. } => "LineString",
            GeoJsonGeometry::MultiLineString { .. } => "MultiLineString",
            GeoJsonGeometry::Polygon { .. } => "Polygon",
            GeoJsonGeometry::MultiPolygon { .. } => "MultiPolygon",
            GeoJsonGeometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<JsonMap<String, Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Point { coordinates: Vec<f64> },
}

impl GeoJson {
    /// Converts the document into point features, in document order
    pub fn into_features(self) -> Result<Vec<Feature>> {
        match self {
            GeoJson::FeatureCollection { features } => features
                .into_iter()
                .enumerate()
                .map(|(index, feature)| point_feature(index, feature))
                .collect(),
            GeoJson::Feature(feature) => Ok(vec![point_feature(0, feature)?]),
            GeoJson::Point { coordinates } => Ok(vec![position_feature(0, &coordinates)?]),
        }
    }
}

fn point_feature(index: usize, feature: GeoJsonFeature) -> Result<Feature> {
    let coordinates = match feature.geometry {
        Some(GeoJsonGeometry::Point { coordinates }) => coordinates,
        Some(other) => {
            return Err(MapError::UnsupportedGeometry(format!(
                "feature {} has {} geometry; only Point is supported",
                index,
                other.type_name()
            )))
        }
        None => {
            return Err(MapError::UnsupportedGeometry(format!(
                "feature {} has no geometry",
                index
            )))
        }
    };

    let mut point = position_feature(index, &coordinates)?;
    point.id = feature.id;
    if let Some(properties) = feature.properties {
        point = point.with_properties(properties);
    }
    Ok(point)
}

fn position_feature(index: usize, coordinates: &[f64]) -> Result<Feature> {
    match coordinates {
        [lng, lat, ..] => Ok(Feature::new(*lng, *lat)),
        _ => Err(MapError::InvalidCoordinates(format!(
            "feature {} position needs at least two numbers, got {}",
            index,
            coordinates.len()
        ))),
    }
}

/// Parses a GeoJSON string into a point feature collection
pub fn parse_points(geojson: &str) -> Result<FeatureCollection> {
    let data: GeoJson = serde_json::from_str(geojson)
        .map_err(|e| MapError::ParseError(format!("Invalid GeoJSON: {}", e)))?;
    FeatureCollection::new(data.into_features()?)
}

/// Builds a point feature collection from an already parsed GeoJSON value
pub fn from_value(value: Value) -> Result<FeatureCollection> {
    let data: GeoJson = serde_json::from_value(value)?;
    FeatureCollection::new(data.into_features()?)
}
