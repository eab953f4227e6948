//! # points-layer
//!
//! Draws a static collection of geographic points as circle markers over a
//! pannable, zoomable map, keeping the overlay's container and every marker
//! aligned with the viewport after each pan or zoom.
//!
//! The host map is reached only through [`MapHost`] and [`ViewportTransform`];
//! markers are written to any [`RenderSurface`]. [`Map`] is a headless host
//! backed by a Web-Mercator [`Viewport`] and an in-memory [`SceneGraph`].
//!
//! ```no_run
//! use points_layer::prelude::*;
//!
//! # fn main() -> points_layer::Result<()> {
//! let mut map = Map::new(LatLng::new(48.85, 2.35), 11.0, Point::new(800.0, 600.0));
//! let features = FeatureCollection::new(vec![Feature::new(2.35, 48.85), Feature::new(2.29, 48.86)])?;
//! let layer = PointsLayer::new(features, PointsLayerOptions::new().padding(20.0))?.add_to(&mut map)?;
//!
//! map.pan_by(Point::new(40.0, 0.0));
//! println!("{:?}", layer.rendered_bounds());
//! layer.detach(&mut map)?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{PointsLayerOptions, PointsLayerSettings},
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use data::{Feature, FeatureCollection};

pub use input::{EventManager, ListenerId, MapEvent, MapEventKind};

pub use layers::{
    points_layer, ContainerGeometry, OverlayLayer, PointsLayer, RadiusPolicy, StylePolicy,
    SyncOutcome,
};

pub use rendering::{RenderSurface, SceneGraph};

pub use traits::{LayerContext, MapHost, ViewportTransform};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Feature collection is empty")]
    EmptyFeatureCollection,

    #[error("Invalid zoom range: min_zoom {min} is greater than max_zoom {max}")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Layer is already attached to a map")]
    AlreadyAttached,

    #[error("Layer is not attached to a map")]
    NotAttached,

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// Error type alias for convenience
pub type Error = MapError;
