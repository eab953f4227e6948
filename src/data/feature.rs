use crate::{
    core::geo::{LatLng, LatLngBounds},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

/// A single point feature.
///
/// The position is stored in GeoJSON order, `[longitude, latitude]`. The id
/// and properties are opaque to the layer and only handed to styling and
/// radius policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    position: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: JsonMap<String, Value>,
}

impl Feature {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            position: [lng, lat],
            id: None,
            properties: JsonMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_properties(mut self, properties: JsonMap<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// `[longitude, latitude]`
    pub fn position(&self) -> [f64; 2] {
        self.position
    }

    pub fn lng(&self) -> f64 {
        self.position[0]
    }

    pub fn lat(&self) -> f64 {
        self.position[1]
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.lat(), self.lng())
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl From<geo_types::Point<f64>> for Feature {
    fn from(point: geo_types::Point<f64>) -> Self {
        Feature::new(point.x(), point.y())
    }
}

impl From<geo_types::Coord<f64>> for Feature {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Feature::new(coord.x, coord.y)
    }
}

/// Ordered, non-empty, immutable set of point features
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    extent: LatLngBounds,
}

impl FeatureCollection {
    /// Builds a collection, rejecting empty input and non-finite positions
    pub fn new(features: Vec<Feature>) -> Result<Self> {
        let first = features.first().ok_or(MapError::EmptyFeatureCollection)?;
        let mut extent = LatLngBounds::from_point(first.lat_lng());

        for (index, feature) in features.iter().enumerate() {
            let lat_lng = feature.lat_lng();
            if !lat_lng.is_finite() {
                return Err(MapError::InvalidCoordinates(format!(
                    "feature {} has a non-finite position [{}, {}]",
                    index,
                    feature.lng(),
                    feature.lat()
                )));
            }
            extent.extend(&lat_lng);
        }

        Ok(Self { features, extent })
    }

    /// Parses a GeoJSON document containing point features
    pub fn from_geojson_str(geojson: &str) -> Result<Self> {
        crate::data::geojson::parse_points(geojson)
    }

    /// Planar min/max extent of every feature position
    pub fn bounds(&self) -> LatLngBounds {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always false; construction refuses empty input
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl TryFrom<Vec<Feature>> for FeatureCollection {
    type Error = MapError;

    fn try_from(features: Vec<Feature>) -> Result<Self> {
        FeatureCollection::new(features)
    }
}
