pub mod base;
pub mod container;
pub mod points;
pub mod policy;
pub mod projector;

pub use base::{LayerProperties, OverlayLayer};
pub use container::{ContainerGeometry, MarkerGeometry, OverlayContainer};
pub use points::{points_layer, PointsLayer, SyncOutcome};
pub use policy::{FixedRadius, MarkerSelection, RadiusPolicy, StylePolicy};
pub use projector::Projector;
