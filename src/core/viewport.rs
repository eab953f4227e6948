use crate::core::{
    constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, TILE_SIZE},
    geo::{LatLng, Point},
};
use crate::traits::ViewportTransform;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const EARTH_RADIUS: f64 = 6378137.0;

/// Web-Mercator view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// World pixel mapped to layer point (0, 0)
    pixel_origin: Point,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center: LatLng::new(LatLng::clamp_lat(center.lat), center.lng),
            zoom: zoom.clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM),
            size,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            pixel_origin: Point::default(),
        };
        viewport.update_pixel_origin();
        viewport
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(LatLng::clamp_lat(center.lat), center.lng.clamp(-180.0, 180.0));
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.update_pixel_origin();
    }

    /// Sets the zoom limits of the host map
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let scale = TILE_SIZE * 2_f64.powf(zoom.unwrap_or(self.zoom));

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + LatLng::clamp_lat(lat_lng.lat).to_radians() / 2.0)
            .tan()
            .ln()
            * EARTH_RADIUS;

        let circumference = 2.0 * PI * EARTH_RADIUS;
        Point::new(
            (x + PI * EARTH_RADIUS) / circumference * scale,
            (-y + PI * EARTH_RADIUS) / circumference * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let scale = TILE_SIZE * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let circumference = 2.0 * PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * circumference - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * circumference;

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        LatLng::new(lat, lng)
    }

    pub fn pixel_origin(&self) -> Point {
        self.pixel_origin
    }

    /// Top-left of the view in world pixels, rounded to whole pixels
    fn update_pixel_origin(&mut self) {
        let center = self.project(&self.center, None);
        let origin = center.subtract(&self.size.multiply(0.5));
        self.pixel_origin = Point::new(origin.x.round(), origin.y.round());
    }

    /// Converts LatLng to layer point (relative to pixel origin)
    pub fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng, None).subtract(&self.pixel_origin)
    }

    /// Converts layer point back to LatLng
    pub fn layer_point_to_lat_lng(&self, point: &Point) -> LatLng {
        self.unproject(&point.add(&self.pixel_origin), None)
    }

    /// Pans the viewport by the given pixel offset
    pub fn pan(&mut self, delta: Point) {
        let center = self.lat_lng_to_layer_point(&self.center).add(&delta);
        let new_center = self.layer_point_to_lat_lng(&center);
        self.set_center(new_center);
    }
}

impl ViewportTransform for Viewport {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        Viewport::lat_lng_to_layer_point(self, lat_lng)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(40.7128, -74.0060),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, 40.7128);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_center_projects_to_middle_of_view() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));
        let center = viewport.lat_lng_to_layer_point(&LatLng::new(0.0, 0.0));

        assert!((center.x - 256.0).abs() < 1e-9);
        assert!((center.y - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_layer_point_round_trip() {
        let viewport = Viewport::new(LatLng::new(48.85, 2.35), 12.0, Point::new(800.0, 600.0));
        let original = LatLng::new(48.86, 2.29);
        let back = viewport.layer_point_to_lat_lng(&viewport.lat_lng_to_layer_point(&original));

        assert!((back.lat - original.lat).abs() < 1e-9);
        assert!((back.lng - original.lng).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let original_center = viewport.center;
        viewport.pan(Point::new(10.0, 10.0));

        assert!(viewport.center.lng > original_center.lng);
        assert!(viewport.center.lat < original_center.lat);
    }

    #[test]
    fn test_north_is_up() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(800.0, 600.0));
        let north_west = viewport.lat_lng_to_layer_point(&LatLng::new(10.0, -10.0));
        let south_east = viewport.lat_lng_to_layer_point(&LatLng::new(-10.0, 10.0));

        assert!(north_west.x < south_east.x);
        assert!(north_west.y < south_east.y);
    }
}
