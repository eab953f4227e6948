use crate::{
    core::{
        bounds::Bounds,
        constants::{CONTAINER_CLASS, MARKER_CLASS},
        geo::Point,
    },
    data::feature::FeatureCollection,
    layers::policy::{MarkerSelection, StylePolicy},
    rendering::surface::{Attribute, NodeId, NodeKind, RenderSurface},
    Result,
};

/// Rendered position of one marker, in viewport-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    pub center: Point,
    pub radius: f64,
}

/// Everything one synchronization pass writes to the surface
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerGeometry {
    /// Padded projected extent; the container's size and offset
    pub bounds: Bounds,
    /// One entry per feature, in feature order
    pub markers: Vec<MarkerGeometry>,
}

impl ContainerGeometry {
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Marker centre relative to the container's top-left corner
    pub fn local_center(&self, index: usize) -> Option<Point> {
        self.markers
            .get(index)
            .map(|marker| self.bounds.to_local(&marker.center))
    }
}

/// The overlay's nodes on the host surface: a sized surface node holding a
/// translated group with one path per feature.
///
/// The marker set is fixed at creation; passes only move and resize.
#[derive(Debug)]
pub struct OverlayContainer {
    root: NodeId,
    group: NodeId,
    markers: Vec<NodeId>,
    geometry: Option<ContainerGeometry>,
}

impl OverlayContainer {
    /// Appends the container to `pane`, creates the markers and styles them once
    pub fn create(
        surface: &mut dyn RenderSurface,
        pane: NodeId,
        features: &FeatureCollection,
        style: Option<&dyn StylePolicy>,
    ) -> Result<Self> {
        let root = surface.create_node(pane, NodeKind::Surface)?;

        match Self::populate(surface, root, features, style) {
            Ok((group, markers)) => Ok(Self {
                root,
                group,
                markers,
                geometry: None,
            }),
            Err(err) => {
                if let Err(cleanup) = surface.remove_node(root) {
                    log::warn!("failed to remove partial overlay container: {}", cleanup);
                }
                Err(err)
            }
        }
    }

    fn populate(
        surface: &mut dyn RenderSurface,
        root: NodeId,
        features: &FeatureCollection,
        style: Option<&dyn StylePolicy>,
    ) -> Result<(NodeId, Vec<NodeId>)> {
        surface.set_attribute(root, Attribute::Class(CONTAINER_CLASS.to_string()))?;
        let group = surface.create_node(root, NodeKind::Group)?;

        let mut markers = Vec::with_capacity(features.len());
        for _ in features {
            let marker = surface.create_node(group, NodeKind::Path)?;
            surface.set_attribute(marker, Attribute::Class(MARKER_CLASS.to_string()))?;
            markers.push(marker);
        }

        if let Some(style) = style {
            style.apply(&mut MarkerSelection::new(surface, &markers, features))?;
        }

        Ok((group, markers))
    }

    /// Writes one pass worth of geometry to the surface. After a failed write
    /// [`geometry`](Self::geometry) is `None` until the next complete pass.
    pub fn update(
        &mut self,
        surface: &mut dyn RenderSurface,
        geometry: ContainerGeometry,
    ) -> Result<()> {
        self.geometry = None;
        self.write_geometry(surface, &geometry)?;
        self.geometry = Some(geometry);
        Ok(())
    }

    fn write_geometry(
        &self,
        surface: &mut dyn RenderSurface,
        geometry: &ContainerGeometry,
    ) -> Result<()> {
        let min = geometry.bounds.min;

        surface.set_attribute(
            self.root,
            Attribute::Size {
                width: geometry.width(),
                height: geometry.height(),
            },
        )?;
        surface.set_attribute(self.root, Attribute::Margin(min))?;
        surface.set_attribute(self.group, Attribute::Translate(min.negate()))?;

        for (node, marker) in self.markers.iter().zip(&geometry.markers) {
            surface.set_attribute(
                *node,
                Attribute::Circle {
                    center: marker.center,
                    radius: marker.radius,
                },
            )?;
        }
        Ok(())
    }

    /// Removes the whole container from the surface
    pub fn destroy(self, surface: &mut dyn RenderSurface) -> Result<()> {
        surface.remove_node(self.root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn markers(&self) -> &[NodeId] {
        &self.markers
    }

    /// Geometry of the last rendered pass, if any
    pub fn geometry(&self) -> Option<&ContainerGeometry> {
        self.geometry.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::feature::Feature,
        rendering::{scene::SceneGraph, surface::AttributeKey},
        MapError,
    };

    fn features() -> FeatureCollection {
        FeatureCollection::new(vec![Feature::new(0.0, 0.0), Feature::new(1.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_create_builds_marker_tree() {
        let mut scene = SceneGraph::new();
        let pane = scene.root();
        let container = OverlayContainer::create(&mut scene, pane, &features(), None).unwrap();

        assert_eq!(scene.children(pane), &[container.root()]);
        assert_eq!(scene.children(container.root()), &[container.group()]);
        assert_eq!(scene.children(container.group()), container.markers());
        assert_eq!(
            scene.attribute(container.root(), &AttributeKey::Class),
            Some(&Attribute::Class(CONTAINER_CLASS.to_string()))
        );
        assert!(container.geometry().is_none());
    }

    #[test]
    fn test_update_writes_frame_and_markers() {
        let mut scene = SceneGraph::new();
        let pane = scene.root();
        let mut container = OverlayContainer::create(&mut scene, pane, &features(), None).unwrap();

        let geometry = ContainerGeometry {
            bounds: Bounds::from_coords(90.0, 90.0, 130.0, 110.0),
            markers: vec![
                MarkerGeometry {
                    center: Point::new(100.0, 100.0),
                    radius: 3.0,
                },
                MarkerGeometry {
                    center: Point::new(120.0, 100.0),
                    radius: 4.0,
                },
            ],
        };
        container.update(&mut scene, geometry.clone()).unwrap();

        assert_eq!(
            scene.attribute(container.root(), &AttributeKey::Size),
            Some(&Attribute::Size {
                width: 40.0,
                height: 20.0
            })
        );
        assert_eq!(
            scene.attribute(container.group(), &AttributeKey::Translate),
            Some(&Attribute::Translate(Point::new(-90.0, -90.0)))
        );
        assert_eq!(
            scene.attribute(container.markers()[1], &AttributeKey::Circle),
            Some(&Attribute::Circle {
                center: Point::new(120.0, 100.0),
                radius: 4.0
            })
        );
        assert_eq!(geometry.local_center(1), Some(Point::new(30.0, 10.0)));
        assert_eq!(container.geometry(), Some(&geometry));
    }

    #[test]
    fn test_failed_style_leaves_no_nodes() {
        fn failing(_markers: &mut MarkerSelection<'_>) -> Result<()> {
            Err(MapError::Render("style failed".to_string()))
        }

        let mut scene = SceneGraph::new();
        let pane = scene.root();
        let result = OverlayContainer::create(&mut scene, pane, &features(), Some(&failing));

        assert!(result.is_err());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_destroy_removes_everything() {
        let mut scene = SceneGraph::new();
        let pane = scene.root();
        let container = OverlayContainer::create(&mut scene, pane, &features(), None).unwrap();
        assert_eq!(scene.len(), 5);

        container.destroy(&mut scene).unwrap();
        assert_eq!(scene.len(), 1);
    }

    /// Accepts a fixed number of attribute writes, then fails
    struct WriteBudget {
        scene: SceneGraph,
        writes_left: usize,
    }

    impl RenderSurface for WriteBudget {
        fn create_node(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
            self.scene.create_node(parent, kind)
        }

        fn set_attribute(&mut self, node: NodeId, attribute: Attribute) -> Result<()> {
            if self.writes_left == 0 {
                return Err(MapError::Render("write budget exhausted".to_string()));
            }
            self.writes_left -= 1;
            self.scene.set_attribute(node, attribute)
        }

        fn remove_node(&mut self, node: NodeId) -> Result<()> {
            self.scene.remove_node(node)
        }
    }

    #[test]
    fn test_partial_update_clears_geometry() {
        let mut surface = WriteBudget {
            scene: SceneGraph::new(),
            writes_left: usize::MAX,
        };
        let pane = surface.scene.root();
        let mut container = OverlayContainer::create(&mut surface, pane, &features(), None).unwrap();

        let frame = |min: f64| ContainerGeometry {
            bounds: Bounds::from_coords(min, min, min + 50.0, min + 30.0),
            markers: vec![
                MarkerGeometry {
                    center: Point::new(min + 10.0, min + 10.0),
                    radius: 3.0,
                },
                MarkerGeometry {
                    center: Point::new(min + 40.0, min + 20.0),
                    radius: 3.0,
                },
            ],
        };
        container.update(&mut surface, frame(0.0)).unwrap();
        assert!(container.geometry().is_some());

        // size lands, margin does not
        surface.writes_left = 1;
        assert!(container.update(&mut surface, frame(200.0)).is_err());
        assert!(container.geometry().is_none());
        assert_eq!(
            surface.scene.attribute(container.root(), &AttributeKey::Margin),
            Some(&Attribute::Margin(Point::new(0.0, 0.0)))
        );

        surface.writes_left = usize::MAX;
        container.update(&mut surface, frame(200.0)).unwrap();
        assert_eq!(container.geometry(), Some(&frame(200.0)));
    }
}
