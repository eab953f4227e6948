//! Injectable per-feature policies: marker radius and one-time styling.

use crate::{
    data::feature::{Feature, FeatureCollection},
    rendering::surface::{Attribute, NodeId, RenderSurface},
    Result,
};

/// Resolves a marker radius, in pixels, for a feature.
///
/// Called for every feature on every synchronization pass, so the radius may
/// follow externally held zoom-dependent state.
pub trait RadiusPolicy {
    fn radius(&self, feature: &Feature) -> f64;

    /// The constant radius, when the policy does not depend on the feature
    fn fixed_radius(&self) -> Option<f64> {
        None
    }
}

/// Same radius for every feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRadius(pub f64);

impl RadiusPolicy for FixedRadius {
    fn radius(&self, _feature: &Feature) -> f64 {
        self.0
    }

    fn fixed_radius(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl<F> RadiusPolicy for F
where
    F: Fn(&Feature) -> f64,
{
    fn radius(&self, feature: &Feature) -> f64 {
        self(feature)
    }
}

/// Applied once per attach, right after the marker nodes are created
pub trait StylePolicy {
    fn apply(&self, markers: &mut MarkerSelection<'_>) -> Result<()>;
}

impl<F> StylePolicy for F
where
    F: Fn(&mut MarkerSelection<'_>) -> Result<()>,
{
    fn apply(&self, markers: &mut MarkerSelection<'_>) -> Result<()> {
        self(markers)
    }
}

/// The freshly created marker nodes paired with their features, in feature order
pub struct MarkerSelection<'a> {
    surface: &'a mut dyn RenderSurface,
    nodes: &'a [NodeId],
    features: &'a FeatureCollection,
}

impl<'a> MarkerSelection<'a> {
    pub(crate) fn new(
        surface: &'a mut dyn RenderSurface,
        nodes: &'a [NodeId],
        features: &'a FeatureCollection,
    ) -> Self {
        Self {
            surface,
            nodes,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Feature)> + '_ {
        self.nodes.iter().copied().zip(self.features.iter())
    }

    /// Sets the same attribute on every marker
    pub fn attr(&mut self, attribute: Attribute) -> Result<()> {
        for node in self.nodes {
            self.surface.set_attribute(*node, attribute.clone())?;
        }
        Ok(())
    }

    /// Sets an attribute computed from each marker's feature
    pub fn attr_with<F>(&mut self, mut attribute: F) -> Result<()>
    where
        F: FnMut(&Feature) -> Attribute,
    {
        for (node, feature) in self.nodes.iter().zip(self.features.iter()) {
            self.surface.set_attribute(*node, attribute(feature))?;
        }
        Ok(())
    }

    /// Shorthand for a `Style` attribute on every marker
    pub fn style(&mut self, name: &str, value: &str) -> Result<()> {
        self.attr(Attribute::style(name, value))
    }

    /// Direct access to the surface for anything the helpers do not cover
    pub fn surface(&mut self) -> &mut dyn RenderSurface {
        &mut *self.surface
    }
}
