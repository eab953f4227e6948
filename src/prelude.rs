//! Prelude module for common points-layer types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use points_layer::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{PointsLayerOptions, PointsLayerSettings},
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::data::{
    feature::{Feature, FeatureCollection},
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
};

pub use crate::input::{
    EventCallback, EventManager, ListenerId, ListenerStatus, MapEvent, MapEventKind,
};

pub use crate::layers::{
    points_layer, ContainerGeometry, FixedRadius, MarkerGeometry, MarkerSelection, OverlayLayer,
    PointsLayer, Projector, RadiusPolicy, StylePolicy, SyncOutcome,
};

pub use crate::rendering::{
    Attribute, AttributeKey, NodeId, NodeKind, RenderSurface, SceneGraph,
};

pub use crate::traits::{LayerContext, MapHost, ViewportTransform};

pub use crate::{Error as MapError, Result};

pub use std::collections::VecDeque;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
