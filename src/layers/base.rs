use crate::{traits::MapHost, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
}

impl LayerProperties {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}

impl Default for LayerProperties {
    fn default() -> Self {
        Self::new("points".to_string(), "Points".to_string())
    }
}

/// An overlay with an explicit attach/detach lifecycle on a map host
pub trait OverlayLayer {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Creates the overlay on `host` and starts following its viewport
    fn attach(&self, host: &mut dyn MapHost) -> Result<()>;

    /// Stops following the viewport and removes the overlay from `host`
    fn detach(&self, host: &mut dyn MapHost) -> Result<()>;

    fn is_attached(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new("quakes".to_string(), "Earthquakes".to_string());
        assert_eq!(props.id, "quakes");
        assert_eq!(props.name, "Earthquakes");
        assert_eq!(LayerProperties::default().id, "points");
    }
}
