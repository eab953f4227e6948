//! The rendering surface an overlay draws into.
//!
//! Overlays only ever create nodes, set attributes on them and remove them.
//! Hosts back this with whatever retained scene they have; [`SceneGraph`]
//! is the in-memory implementation.
//!
//! [`SceneGraph`]: crate::rendering::scene::SceneGraph

use crate::{core::geo::Point, Result};
use serde::{Deserialize, Serialize};

/// Opaque handle to a node owned by a [`RenderSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Host pane that overlays are appended to
    Pane,
    /// Sized drawing surface (an `<svg>` element)
    Surface,
    /// Transformable group (a `<g>` element)
    Group,
    /// Shape (a `<path>` element)
    Path,
}

impl NodeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Pane => "div",
            NodeKind::Surface => "svg",
            NodeKind::Group => "g",
            NodeKind::Path => "path",
        }
    }
}

/// Attribute values understood by rendering surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    /// Space separated class list
    Class(String),
    /// Pixel dimensions of a surface
    Size { width: f64, height: f64 },
    /// Top-left offset of a node inside its pane (margin-left / margin-top)
    Margin(Point),
    /// Translation of a group's local coordinate frame
    Translate(Point),
    /// Circle marker centred at `center`, in the parent group's frame
    Circle { center: Point, radius: f64 },
    /// Free-form presentation property, e.g. `fill`
    Style { name: String, value: String },
}

/// Identifies which slot an [`Attribute`] occupies on a node; setting an
/// attribute replaces any previous value with the same key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKey {
    Class,
    Size,
    Margin,
    Translate,
    Circle,
    Style(String),
}

impl Attribute {
    pub fn key(&self) -> AttributeKey {
        match self {
            Attribute::Class(_) => AttributeKey::Class,
            Attribute::Size { .. } => AttributeKey::Size,
            Attribute::Margin(_) => AttributeKey::Margin,
            Attribute::Translate(_) => AttributeKey::Translate,
            Attribute::Circle { .. } => AttributeKey::Circle,
            Attribute::Style { name, .. } => AttributeKey::Style(name.clone()),
        }
    }

    pub fn style(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute::Style {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Minimal retained-mode scene interface consumed by overlays
pub trait RenderSurface {
    /// Appends a new node of `kind` as the last child of `parent`
    fn create_node(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId>;

    /// Sets (or replaces) one attribute on `node`
    fn set_attribute(&mut self, node: NodeId, attribute: Attribute) -> Result<()>;

    /// Removes `node` and its whole subtree
    fn remove_node(&mut self, node: NodeId) -> Result<()>;
}

/// SVG path data for a circle of `radius` centred on `center`, in the form
/// d3's geo path emits for point geometries.
pub fn circle_path_data(center: Point, radius: f64) -> String {
    format!(
        "M{},{}m0,{}a{},{} 0 1,1 0,{}a{},{} 0 1,1 0,{}z",
        center.x,
        center.y,
        radius,
        radius,
        radius,
        -2.0 * radius,
        radius,
        radius,
        2.0 * radius
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_keys() {
        assert_eq!(Attribute::Class("a".into()).key(), AttributeKey::Class);
        assert_eq!(
            Attribute::style("fill", "red").key(),
            AttributeKey::Style("fill".to_string())
        );
        assert_ne!(
            Attribute::style("fill", "red").key(),
            Attribute::style("stroke", "red").key()
        );
    }

    #[test]
    fn test_circle_path_data() {
        let d = circle_path_data(Point::new(10.0, 20.0), 3.0);
        assert_eq!(d, "M10,20m0,3a3,3 0 1,1 0,-6a3,3 0 1,1 0,6z");
    }

    #[test]
    fn test_node_kind_tags() {
        assert_eq!(NodeKind::Surface.tag(), "svg");
        assert_eq!(NodeKind::Group.tag(), "g");
        assert_eq!(NodeKind::Path.tag(), "path");
    }
}
