use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::{EventCallback, EventManager, ListenerId, MapEvent, MapEventKind},
    rendering::scene::SceneGraph,
    traits::{LayerContext, MapHost},
    MapError, Result,
};

/// Headless map host: a Web-Mercator viewport, an overlay pane backed by a
/// [`SceneGraph`], and synchronous `moveend` notifications.
pub struct Map {
    viewport: Viewport,
    overlay_pane: SceneGraph,
    event_manager: EventManager,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_viewport(Viewport::new(center, zoom, size))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            overlay_pane: SceneGraph::new(),
            event_manager: EventManager::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The retained scene holding every overlay's nodes
    pub fn overlay_pane(&self) -> &SceneGraph {
        &self.overlay_pane
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    /// Moves to `center` at `zoom` and notifies listeners
    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_finite() || !zoom.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "cannot set view to {:?} at zoom {}",
                center, zoom
            )));
        }

        let old_zoom = self.viewport.zoom;
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.finish_move(old_zoom);
        Ok(())
    }

    /// Changes zoom around the current center
    pub fn zoom_to(&mut self, zoom: f64) -> Result<()> {
        self.set_view(self.viewport.center, zoom)
    }

    /// Pans by a pixel offset
    pub fn pan_by(&mut self, delta: Point) {
        let old_zoom = self.viewport.zoom;
        self.viewport.pan(delta);
        self.finish_move(old_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        let old_zoom = self.viewport.zoom;
        self.viewport.set_size(size);
        self.event_manager.emit(MapEvent::Resize { size });
        self.finish_move(old_zoom);
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let old_zoom = self.viewport.zoom;
        self.viewport.set_zoom_limits(min_zoom, max_zoom);
        if self.viewport.zoom != old_zoom {
            self.finish_move(old_zoom);
        }
    }

    /// Register a listener for any map event kind
    pub fn on(&mut self, kind: MapEventKind, callback: EventCallback) -> ListenerId {
        self.event_manager.on(kind, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.event_manager.off(id)
    }

    pub fn listener_count(&self, kind: MapEventKind) -> usize {
        self.event_manager.listener_count(kind)
    }

    /// Re-fires `moveend` without changing the view
    pub fn invalidate(&mut self) {
        self.event_manager.emit(MapEvent::MoveEnd {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
        self.process_events();
    }

    fn finish_move(&mut self, old_zoom: f64) {
        if self.viewport.zoom != old_zoom {
            self.event_manager.emit(MapEvent::ZoomEnd {
                zoom: self.viewport.zoom,
            });
        }
        self.event_manager.emit(MapEvent::MoveEnd {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
        self.process_events();
    }

    /// Dispatches queued events to listeners, serially
    fn process_events(&mut self) -> Vec<MapEvent> {
        let Map {
            viewport,
            overlay_pane,
            event_manager,
        } = self;
        let pane = overlay_pane.root();
        let mut context = LayerContext {
            viewport: &*viewport,
            surface: overlay_pane,
            pane,
        };
        let events = event_manager.process_events(&mut context);
        log::trace!("dispatched {} map events", events.len());
        events
    }
}

impl MapHost for Map {
    fn layer_context(&mut self) -> LayerContext<'_> {
        let pane = self.overlay_pane.root();
        LayerContext {
            viewport: &self.viewport,
            surface: &mut self.overlay_pane,
            pane,
        }
    }

    fn on_viewport_changed(&mut self, listener: EventCallback) -> ListenerId {
        self.event_manager.on(MapEventKind::MoveEnd, listener)
    }

    fn off_viewport_changed(&mut self, id: ListenerId) -> bool {
        self.event_manager.off(id)
    }
}
