//! Point overlay kept aligned with a host viewport.
//!
//! A [`PointsLayer`] is `Detached` until [`attach`](PointsLayer::attach)ed.
//! Attaching creates a fresh [`OverlayContainer`] on the host's overlay pane,
//! subscribes to viewport-change notifications and renders once. Every
//! notification then runs a synchronization pass:
//!
//! 1. read the zoom; outside `[min_zoom, max_zoom]` the pass does nothing,
//! 2. project the north-west and south-east corners of the feature extent and
//!    pad them, giving the container's box,
//! 3. size the container to that box and offset it to the box's top-left,
//! 4. translate the container's group by minus that top-left,
//! 5. re-project every feature and re-resolve its radius.
//!
//! Detaching unsubscribes and drops the container; the next attach builds a
//! new one. A layer dropped while attached is cleaned up by its listener on
//! the host's next notification.

use crate::{
    core::{bounds::Bounds, config::PointsLayerOptions},
    data::feature::FeatureCollection,
    input::{EventCallback, ListenerId, ListenerStatus, MapEvent},
    layers::{
        base::{LayerProperties, OverlayLayer},
        container::{ContainerGeometry, MarkerGeometry, OverlayContainer},
        projector::Projector,
    },
    rendering::surface::NodeId,
    traits::{LayerContext, MapHost, ViewportTransform},
    MapError, Result,
};
use std::{cell::RefCell, rc::Rc};

/// What a synchronization pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Container and markers were repositioned
    Rendered,
    /// Zoom outside `[min_zoom, max_zoom]`; previous geometry left in place
    OutsideZoomRange,
    /// Layer is not attached; nothing to do
    Detached,
}

enum LayerState {
    Detached,
    Attached {
        listener: ListenerId,
        container: OverlayContainer,
    },
}

struct LayerInner {
    features: FeatureCollection,
    options: PointsLayerOptions,
    state: LayerState,
}

impl LayerInner {
    fn synchronize(&mut self, context: &mut LayerContext<'_>) -> Result<SyncOutcome> {
        let LayerInner {
            features,
            options,
            state,
        } = self;

        match state {
            LayerState::Detached => Ok(SyncOutcome::Detached),
            LayerState::Attached { container, .. } => {
                render_pass(features, options, container, context)
            }
        }
    }
}

/// Geometry of every marker plus the padded box, for the current viewport
pub fn compute_geometry(
    features: &FeatureCollection,
    options: &PointsLayerOptions,
    viewport: &dyn ViewportTransform,
) -> ContainerGeometry {
    let projector = Projector::new(viewport);
    let radius = options.radius_resolver();

    let bounds = projector.padded_bounds(&features.bounds(), options.padding);
    let markers = features
        .iter()
        .map(|feature| MarkerGeometry {
            center: projector.project_feature(feature),
            radius: radius.radius(feature),
        })
        .collect();

    ContainerGeometry { bounds, markers }
}

fn render_pass(
    features: &FeatureCollection,
    options: &PointsLayerOptions,
    container: &mut OverlayContainer,
    context: &mut LayerContext<'_>,
) -> Result<SyncOutcome> {
    let zoom = context.viewport.zoom();
    if !options.zoom_in_range(zoom) {
        log::debug!(
            "zoom {} outside [{}, {}], keeping previous overlay geometry",
            zoom,
            options.min_zoom,
            options.max_zoom
        );
        return Ok(SyncOutcome::OutsideZoomRange);
    }

    let geometry = compute_geometry(features, options, context.viewport);
    log::trace!(
        "overlay box {:?} ({}x{}) for {} markers",
        geometry.bounds.min,
        geometry.width(),
        geometry.height(),
        geometry.markers.len()
    );
    container.update(context.surface, geometry)?;
    Ok(SyncOutcome::Rendered)
}

/// A static set of point features drawn as circle markers over a map
pub struct PointsLayer {
    properties: LayerProperties,
    inner: Rc<RefCell<LayerInner>>,
}

impl PointsLayer {
    /// Validates `options`; the collection is non-empty by construction
    pub fn new(features: FeatureCollection, options: PointsLayerOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            properties: LayerProperties::default(),
            inner: Rc::new(RefCell::new(LayerInner {
                features,
                options,
                state: LayerState::Detached,
            })),
        })
    }

    /// Parses GeoJSON point features and builds a layer from them
    pub fn from_geojson_str(geojson: &str, options: PointsLayerOptions) -> Result<Self> {
        Self::new(FeatureCollection::from_geojson_str(geojson)?, options)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.properties.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.properties.name = name.into();
        self
    }

    /// Attaches to `host` and hands the layer back
    pub fn add_to(self, host: &mut dyn MapHost) -> Result<Self> {
        self.attach(host)?;
        Ok(self)
    }

    /// Creates the container and markers, styles them, subscribes to
    /// viewport changes and renders once. Fails if already attached.
    pub fn attach(&self, host: &mut dyn MapHost) -> Result<()> {
        let mut inner = self.borrow_mut()?;
        if matches!(inner.state, LayerState::Attached { .. }) {
            return Err(MapError::AlreadyAttached);
        }

        let mut context = host.layer_context();
        let mut container = OverlayContainer::create(
            context.surface,
            context.pane,
            &inner.features,
            inner.options.style(),
        )?;

        let outcome = match render_pass(&inner.features, &inner.options, &mut container, &mut context)
        {
            Ok(outcome) => outcome,
            Err(err) => {
                if let Err(cleanup) = container.destroy(context.surface) {
                    log::warn!("failed to remove overlay after a failed attach: {}", cleanup);
                }
                return Err(err);
            }
        };

        let listener = host.on_viewport_changed(self.viewport_listener(container.root()));
        log::debug!(
            "attached points layer '{}' with {} markers ({:?})",
            self.properties.id,
            inner.features.len(),
            outcome
        );
        inner.state = LayerState::Attached {
            listener,
            container,
        };
        Ok(())
    }

    /// Unsubscribes and removes the container from `host`. Fails if detached.
    pub fn detach(&self, host: &mut dyn MapHost) -> Result<()> {
        let mut inner = self.borrow_mut()?;
        let (listener, container) =
            match std::mem::replace(&mut inner.state, LayerState::Detached) {
                LayerState::Detached => return Err(MapError::NotAttached),
                LayerState::Attached {
                    listener,
                    container,
                } => (listener, container),
            };

        if !host.off_viewport_changed(listener) {
            log::warn!(
                "points layer '{}' listener {} was already unsubscribed",
                self.properties.id,
                listener.value()
            );
        }

        let context = host.layer_context();
        container.destroy(context.surface)?;
        log::debug!("detached points layer '{}'", self.properties.id);
        Ok(())
    }

    /// Runs a synchronization pass against `host` right away
    pub fn redraw(&self, host: &mut dyn MapHost) -> Result<SyncOutcome> {
        let mut inner = self.borrow_mut()?;
        inner.synchronize(&mut host.layer_context())
    }

    pub fn is_attached(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|inner| matches!(inner.state, LayerState::Attached { .. }))
            .unwrap_or(false)
    }

    /// Container geometry from the last rendered pass while attached
    pub fn geometry(&self) -> Option<ContainerGeometry> {
        self.with_container(|container| container.geometry().cloned())
            .flatten()
    }

    /// Padded box from the last rendered pass while attached
    pub fn rendered_bounds(&self) -> Option<Bounds> {
        self.geometry().map(|geometry| geometry.bounds)
    }

    /// Root node of the container while attached
    pub fn container_node(&self) -> Option<NodeId> {
        self.with_container(|container| container.root())
    }

    pub fn marker_nodes(&self) -> Vec<NodeId> {
        self.with_container(|container| container.markers().to_vec())
            .unwrap_or_default()
    }

    pub fn feature_count(&self) -> usize {
        self.inner
            .try_borrow()
            .map(|inner| inner.features.len())
            .unwrap_or(0)
    }

    pub fn options(&self) -> serde_json::Value {
        self.inner
            .try_borrow()
            .map(|inner| inner.options.options())
            .unwrap_or(serde_json::Value::Null)
    }

    fn with_container<T>(&self, f: impl FnOnce(&OverlayContainer) -> T) -> Option<T> {
        let inner = self.inner.try_borrow().ok()?;
        let result = match &inner.state {
            LayerState::Attached { container, .. } => Some(f(container)),
            LayerState::Detached => None,
        };
        result
    }

    fn borrow_mut(&self) -> Result<std::cell::RefMut<'_, LayerInner>> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| MapError::Layer(format!("points layer '{}' is busy", self.properties.id)))
    }

    /// Listener holding only a weak reference. Once the layer handle is
    /// dropped the next notification removes the orphaned container from the
    /// surface and unregisters the listener. Failures stay inside the layer.
    fn viewport_listener(&self, container_root: NodeId) -> EventCallback {
        let inner = Rc::downgrade(&self.inner);
        let id = self.properties.id.clone();

        Box::new(move |_event: &MapEvent, context: &mut LayerContext<'_>| {
            let Some(shared) = inner.upgrade() else {
                log::debug!("points layer '{}' was dropped while attached, removing its overlay", id);
                if let Err(err) = context.surface.remove_node(container_root) {
                    log::warn!("failed to remove overlay of dropped points layer '{}': {}", id, err);
                }
                return ListenerStatus::Finished;
            };
            let Ok(mut layer) = shared.try_borrow_mut() else {
                log::warn!("skipping re-entrant synchronization of points layer '{}'", id);
                return ListenerStatus::Active;
            };
            if let Err(err) = layer.synchronize(context) {
                log::warn!("points layer '{}' failed to synchronize: {}", id, err);
            }
            ListenerStatus::Active
        })
    }
}

impl OverlayLayer for PointsLayer {
    fn id(&self) -> &str {
        &self.properties.id
    }

    fn name(&self) -> &str {
        &self.properties.name
    }

    fn attach(&self, host: &mut dyn MapHost) -> Result<()> {
        PointsLayer::attach(self, host)
    }

    fn detach(&self, host: &mut dyn MapHost) -> Result<()> {
        PointsLayer::detach(self, host)
    }

    fn is_attached(&self) -> bool {
        PointsLayer::is_attached(self)
    }
}

impl std::fmt::Debug for PointsLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsLayer")
            .field("id", &self.properties.id)
            .field("features", &self.feature_count())
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Shorthand for [`PointsLayer::new`]
pub fn points_layer(features: FeatureCollection, options: PointsLayerOptions) -> Result<PointsLayer> {
    PointsLayer::new(features, options)
}
