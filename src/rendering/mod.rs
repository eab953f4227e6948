pub mod scene;
pub mod surface;

// Re-export main types
pub use scene::{SceneGraph, SceneNode};
pub use surface::{circle_path_data, Attribute, AttributeKey, NodeId, NodeKind, RenderSurface};
