//! Spatial math for conflict detection and distance calculations.

use crate::models::{Point, Waypoint};

/// Decimal places used when conflicts are presented.
pub const REPORT_DECIMALS: u32 = 2;

/// Euclidean distance between two points of the same dimensionality.
pub fn distance<P: Point>(p1: &P, p2: &P) -> f64 {
    p1.distance(p2)
}

/// Linearly interpolate the position at time `t` between two waypoints.
///
/// A zero-duration segment holds the start position. `t` is not checked
/// against the segment bounds; outside them the result extrapolates.
pub fn interpolate<P: Point>(start: &Waypoint<P>, end: &Waypoint<P>, t: f64) -> P {
    let (t1, t2) = (start.time_s, end.time_s);
    if t2 == t1 {
        return start.position;
    }

    let ratio = (t - t1) / (t2 - t1);
    start.position.lerp(&end.position, ratio)
}

/// Round a value to `decimals` places, halves away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
