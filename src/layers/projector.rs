//! Geographic to viewport-local projection for one synchronization pass.

use crate::{
    core::{
        bounds::Bounds,
        geo::{LatLng, LatLngBounds, Point},
    },
    data::feature::Feature,
    traits::ViewportTransform,
};

/// Borrows the host transform for exactly one pass.
///
/// Feature positions are `[lng, lat]`; the host transform takes `(lat, lng)`.
/// The swap happens here and nowhere else. No projection math is done here:
/// out-of-range coordinates go to the host unchanged.
#[derive(Clone, Copy)]
pub struct Projector<'a> {
    viewport: &'a dyn ViewportTransform,
}

impl<'a> Projector<'a> {
    pub fn new(viewport: &'a dyn ViewportTransform) -> Self {
        Self { viewport }
    }

    /// Projects a `[lng, lat]` position
    pub fn project(&self, position: [f64; 2]) -> Point {
        let [lng, lat] = position;
        self.viewport.lat_lng_to_layer_point(&LatLng::new(lat, lng))
    }

    pub fn project_feature(&self, feature: &Feature) -> Point {
        self.project(feature.position())
    }

    /// Projects the north-west and south-east corners of `extent` and moves
    /// them outward by `padding` pixels.
    pub fn padded_bounds(&self, extent: &LatLngBounds, padding: f64) -> Bounds {
        let north_west = self.project([extent.west(), extent.north()]);
        let south_east = self.project([extent.east(), extent.south()]);
        Bounds::new(north_west, south_east).expanded(padding)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// North-up linear transform: one degree is `scale` pixels and the
    /// origin `(0, 0)` lands on `offset`
    pub(crate) struct LinearTransform {
        pub zoom: f64,
        pub scale: f64,
        pub offset: Point,
    }

    impl ViewportTransform for LinearTransform {
        fn zoom(&self) -> f64 {
            self.zoom
        }

        fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
            Point::new(
                self.offset.x + lat_lng.lng * self.scale,
                self.offset.y - lat_lng.lat * self.scale,
            )
        }
    }

    fn transform() -> LinearTransform {
        LinearTransform {
            zoom: 4.0,
            scale: 2.0,
            offset: Point::new(100.0, 100.0),
        }
    }

    #[test]
    fn test_axis_order_swap() {
        let viewport = transform();
        let projector = Projector::new(&viewport);

        // 10 degrees east, 5 degrees north
        let point = projector.project([10.0, 5.0]);
        assert_eq!(point, Point::new(120.0, 90.0));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let viewport = transform();
        let projector = Projector::new(&viewport);
        let feature = Feature::new(-33.3, 12.7);

        let first = projector.project_feature(&feature);
        for _ in 0..10 {
            assert_eq!(projector.project_feature(&feature), first);
        }
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let viewport = transform();
        let projector = Projector::new(&viewport);
        assert_eq!(projector.project([200.0, 100.0]), Point::new(500.0, -100.0));
    }

    #[test]
    fn test_padded_bounds() {
        let viewport = transform();
        let projector = Projector::new(&viewport);
        let extent = LatLngBounds::from_coords(-10.0, -20.0, 10.0, 20.0);

        let bounds = projector.padded_bounds(&extent, 5.0);
        assert_eq!(bounds.min, Point::new(100.0 - 40.0 - 5.0, 100.0 - 20.0 - 5.0));
        assert_eq!(bounds.max, Point::new(100.0 + 40.0 + 5.0, 100.0 + 20.0 + 5.0));
    }
}
