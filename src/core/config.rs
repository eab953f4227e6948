//! Options for a points layer.
//!
//! The numeric options can be loaded from JSON; the radius and style
//! policies are code and are attached through the builder methods.

use crate::{
    core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_PADDING, DEFAULT_RADIUS},
    data::feature::Feature,
    layers::policy::{FixedRadius, MarkerSelection, RadiusPolicy, StylePolicy},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Serializable subset of [`PointsLayerOptions`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsLayerSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub padding: f64,
    /// Fixed radius; `None` when a per-feature policy is in use
    pub radius: Option<f64>,
}

impl Default for PointsLayerSettings {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            padding: DEFAULT_PADDING,
            radius: Some(DEFAULT_RADIUS),
        }
    }
}

pub struct PointsLayerOptions {
    /// Passes at a zoom below this leave the overlay untouched
    pub min_zoom: f64,
    /// Passes at a zoom above this leave the overlay untouched
    pub max_zoom: f64,
    /// Pixels added around the projected extent on every side
    pub padding: f64,
    radius: Box<dyn RadiusPolicy>,
    style: Option<Box<dyn StylePolicy>>,
}

impl PointsLayerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_zoom(mut self, min_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self
    }

    pub fn max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Same radius for every marker
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Box::new(FixedRadius(radius));
        self
    }

    /// Radius computed from each feature on every pass
    pub fn radius_fn<F>(mut self, radius: F) -> Self
    where
        F: Fn(&Feature) -> f64 + 'static,
    {
        self.radius = Box::new(radius);
        self
    }

    pub fn radius_policy(mut self, policy: impl RadiusPolicy + 'static) -> Self {
        self.radius = Box::new(policy);
        self
    }

    /// Styling callback run once when the markers are created
    pub fn apply_style<F>(mut self, style: F) -> Self
    where
        F: Fn(&mut MarkerSelection<'_>) -> Result<()> + 'static,
    {
        self.style = Some(Box::new(style));
        self
    }

    pub fn style_policy(mut self, policy: impl StylePolicy + 'static) -> Self {
        self.style = Some(Box::new(policy));
        self
    }

    pub fn radius_resolver(&self) -> &dyn RadiusPolicy {
        &*self.radius
    }

    pub fn style(&self) -> Option<&dyn StylePolicy> {
        self.style.as_deref()
    }

    /// Whether `zoom` lies inside the inclusive `[min_zoom, max_zoom]` window
    pub fn zoom_in_range(&self, zoom: f64) -> bool {
        zoom >= self.min_zoom && zoom <= self.max_zoom
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() {
            return Err(MapError::InvalidOption(format!(
                "zoom bounds must be finite, got [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(MapError::InvalidOption(format!(
                "padding must be a non-negative number of pixels, got {}",
                self.padding
            )));
        }
        if let Some(radius) = self.radius.fixed_radius() {
            if !radius.is_finite() || radius < 0.0 {
                return Err(MapError::InvalidOption(format!(
                    "radius must be a non-negative number of pixels, got {}",
                    radius
                )));
            }
        }
        Ok(())
    }

    /// Loads the numeric options from JSON; missing keys keep their defaults.
    /// A `null` radius keeps the default fixed radius.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let settings: PointsLayerSettings = serde_json::from_value(value)?;
        let options = Self::from(settings);
        options.validate()?;
        Ok(options)
    }

    pub fn settings(&self) -> PointsLayerSettings {
        PointsLayerSettings {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            padding: self.padding,
            radius: self.radius.fixed_radius(),
        }
    }

    /// Numeric options as JSON
    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "min_zoom": self.min_zoom,
            "max_zoom": self.max_zoom,
            "padding": self.padding,
            "radius": self.radius.fixed_radius(),
            "apply_style": self.style.is_some(),
        })
    }
}

impl From<PointsLayerSettings> for PointsLayerOptions {
    fn from(settings: PointsLayerSettings) -> Self {
        Self {
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            padding: settings.padding,
            radius: Box::new(FixedRadius(settings.radius.unwrap_or(DEFAULT_RADIUS))),
            style: None,
        }
    }
}

impl Default for PointsLayerOptions {
    fn default() -> Self {
        PointsLayerSettings::default().into()
    }
}

impl std::fmt::Debug for PointsLayerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsLayerOptions")
            .field("min_zoom", &self.min_zoom)
            .field("max_zoom", &self.max_zoom)
            .field("padding", &self.padding)
            .field("radius", &self.radius.fixed_radius())
            .field("apply_style", &self.style.is_some())
            .finish()
    }
}
