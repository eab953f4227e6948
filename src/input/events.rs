use crate::core::geo::{LatLng, Point};

/// Map event types that can be emitted by the map host
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Zoom ended
    ZoomEnd { zoom: f64 },
    /// Pan or zoom ended; the viewport transform is settled
    MoveEnd { center: LatLng, zoom: f64 },
    /// Viewport was resized
    Resize { size: Point },
}

/// Discriminant used to register listeners for one kind of event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    ZoomEnd,
    MoveEnd,
    Resize,
}

impl MapEvent {
    pub fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::ZoomEnd { .. } => MapEventKind::ZoomEnd,
            MapEvent::MoveEnd { .. } => MapEventKind::MoveEnd,
            MapEvent::Resize { .. } => MapEventKind::Resize,
        }
    }
}

impl std::fmt::Display for MapEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapEventKind::ZoomEnd => write!(f, "zoomend"),
            MapEventKind::MoveEnd => write!(f, "moveend"),
            MapEventKind::Resize => write!(f, "resize"),
        }
    }
}
