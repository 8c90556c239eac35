#![allow(dead_code)]
mod ring_properties;

pub use ring_properties::*;

use floorplan_geom::core::math::Vector2;

/// Route library log output through the test harness, safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counter clockwise axis aligned rectangle starting at its min corner.
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Vector2<f64>> {
    vec![
        Vector2::new(x0, y0),
        Vector2::new(x1, y0),
        Vector2::new(x1, y1),
        Vector2::new(x0, y1),
    ]
}

/// Clockwise copy of [rect] for holes.
pub fn rect_cw(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Vector2<f64>> {
    let mut ring = rect(x0, y0, x1, y1);
    ring.reverse();
    ring
}
