pub mod feature;
pub mod geojson;

pub use feature::{Feature, FeatureCollection};
pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
