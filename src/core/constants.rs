//! Layer defaults, matching the option defaults of the Leaflet points layer.

/// Lowest zoom level at which the overlay is synchronised.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;

/// Highest zoom level at which the overlay is synchronised.
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Pixels added on each side of the projected feature extent.
pub const DEFAULT_PADDING: f64 = 100.0;

/// Marker radius in pixels when no per-feature policy is given.
pub const DEFAULT_RADIUS: f64 = 3.0;

/// Default square tile size in pixels, used by the Web-Mercator viewport.
pub const TILE_SIZE: f64 = 256.0;

/// Class list set on the overlay root node.
pub const CONTAINER_CLASS: &str = "leaflet-layer leaflet-zoom-hide";

/// Class set on every marker node.
pub const MARKER_CLASS: &str = "circle";
