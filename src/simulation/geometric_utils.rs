//! Geometric utility functions for distance calculations and heading arithmetic.
//!
//! Headings are expressed in degrees, counter-clockwise from the positive x
//! axis, and always normalised to `[0, 360)`.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::{Array1, array};

/// Builds a 2D position vector.
pub fn point(x: f32, y: f32) -> Array1<f32> {
    array![x, y]
}

/// Euclidean distance between two positions.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Normalises an angle in degrees to `[0, 360)`.
///
/// # Arguments
///
/// * `degrees` - Any finite angle, possibly negative or above a full turn
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Returns the position `units` ahead of `pos` along `heading` degrees.
pub fn position_ahead(pos: &Array1<f32>, heading: f32, units: f32) -> Array1<f32> {
    let rad = heading.to_radians();
    point(pos[0] + units * rad.cos(), pos[1] + units * rad.sin())
}

/// Heading in degrees that points from `from` towards `to`.
pub fn bearing_degrees(from: &Array1<f32>, to: &Array1<f32>) -> f32 {
    normalize_degrees((to[1] - from[1]).atan2(to[0] - from[0]).to_degrees())
}

/// Point on the circle of `radius` around `center` at `angle` degrees.
pub fn point_on_circle(center: (f32, f32), radius: f32, angle: f32) -> Array1<f32> {
    let rad = angle.to_radians();
    point(center.0 + radius * rad.cos(), center.1 + radius * rad.sin())
}

/// Moves a coordinate half a step towards `center` on one axis.
///
/// Coordinates already on the centre line are left untouched.
pub fn nudge_towards(value: f32, center: f32, amount: f32) -> f32 {
    if value < center {
        value + amount
    } else if value > center {
        value - amount
    } else {
        value
    }
}
