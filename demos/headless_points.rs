//! Renders a handful of radar sites over a headless map, pans and zooms it,
//! and prints the overlay markup after each move.
//!
//! Run with `RUST_LOG=debug cargo run --example headless_points --features debug`
//! to watch each synchronization pass.

use points_layer::prelude::*;

const SITES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "id": "kmux",
         "geometry": {"type": "Point", "coordinates": [-121.898, 37.155]},
         "properties": {"name": "San Francisco", "range_km": 230}},
        {"type": "Feature", "id": "kdax",
         "geometry": {"type": "Point", "coordinates": [-121.678, 38.501]},
         "properties": {"name": "Sacramento", "range_km": 230}},
        {"type": "Feature", "id": "kvtx",
         "geometry": {"type": "Point", "coordinates": [-119.179, 34.412]},
         "properties": {"name": "Los Angeles", "range_km": 460}}
    ]
}"#;

fn print_overlay(label: &str, map: &Map, layer: &PointsLayer) -> Result<()> {
    let Some(root) = layer.container_node() else {
        println!("{label}: layer is detached");
        return Ok(());
    };
    if let Some(bounds) = layer.rendered_bounds() {
        println!(
            "{label}: zoom {} box {:?} -> {:?} ({}x{})",
            map.zoom(),
            bounds.min,
            bounds.max,
            bounds.width(),
            bounds.height()
        );
    }
    println!("{}\n", map.overlay_pane().to_svg(root)?);
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(feature = "debug")]
    env_logger::init();

    let options = PointsLayerOptions::new()
        .min_zoom(4.0)
        .max_zoom(10.0)
        .padding(50.0)
        .radius_fn(|site| {
            let range = site.property("range_km").and_then(|r| r.as_f64()).unwrap_or(230.0);
            range / 46.0
        })
        .apply_style(|markers| {
            markers.style("fill", "steelblue")?;
            markers.style("fill-opacity", "0.6")
        });

    let mut map = Map::new(LatLng::new(36.5, -120.5), 6.0, Point::new(800.0, 600.0));
    let layer = PointsLayer::from_geojson_str(SITES, options)?
        .with_id("radar-sites")
        .add_to(&mut map)?;

    print_overlay("initial", &map, &layer)?;

    map.pan_by(Point::new(120.0, -40.0));
    print_overlay("after pan", &map, &layer)?;

    map.zoom_to(8.0)?;
    print_overlay("after zoom in", &map, &layer)?;

    // outside the layer's zoom window the previous geometry stays put
    map.zoom_to(12.0)?;
    print_overlay("outside zoom window", &map, &layer)?;

    layer.detach(&mut map)?;
    print_overlay("after detach", &map, &layer)?;

    Ok(())
}
