//! Seams between an overlay layer and the map host it is attached to.

use crate::{
    core::geo::{LatLng, Point},
    input::handler::{EventCallback, ListenerId},
    rendering::surface::{NodeId, RenderSurface},
};

/// The host viewport's state for one synchronization pass.
///
/// Implementations describe the view as it is *now*; callers borrow it for a
/// single pass and must not keep projections across a viewport change.
pub trait ViewportTransform {
    /// Current zoom level
    fn zoom(&self) -> f64;

    /// Geographic coordinate to viewport-local (layer) pixels.
    /// Map projection is entirely the host's concern.
    fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point;
}

/// Everything a layer may touch while it runs: the viewport to read and the
/// overlay surface to write, borrowed together from the host.
pub struct LayerContext<'a> {
    pub viewport: &'a dyn ViewportTransform,
    pub surface: &'a mut dyn RenderSurface,
    /// Pane node that overlay containers are appended to
    pub pane: NodeId,
}

/// A map that overlays can attach to
pub trait MapHost {
    /// Borrows the viewport and the overlay pane's surface for one operation
    fn layer_context(&mut self) -> LayerContext<'_>;

    /// Subscribes to "viewport changed" notifications (fired after every
    /// completed pan or zoom)
    fn on_viewport_changed(&mut self, listener: EventCallback) -> ListenerId;

    /// Unsubscribes; returns false if the listener was unknown
    fn off_viewport_changed(&mut self, id: ListenerId) -> bool;
}
