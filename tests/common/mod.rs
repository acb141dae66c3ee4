//! Shared helpers for integration tests.
#![allow(dead_code)]

use geo::{Destination, Haversine};
use georange::Point;

/// Point reached by travelling `distance_km` from `origin` on an initial
/// `bearing_deg` along a great circle.
pub fn destination(origin: &Point, bearing_deg: f64, distance_km: f64) -> Point {
    Haversine.destination(*origin, bearing_deg, distance_km * 1000.0)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
