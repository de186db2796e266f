//! Proximity eraser: removes whole strokes near the pointer.

use crate::stroke::Stroke;
use kurbo::Point;

/// Eraser hit radius as a multiple of the active pen width.
pub const ERASER_RADIUS_FACTOR: f64 = 2.0;

/// Hit radius for an eraser driven by a pen of the given width.
pub fn eraser_radius(width: f64) -> f64 {
    ERASER_RADIUS_FACTOR * width
}

/// Remove every stroke with at least one point within `radius` of `point`.
///
/// Returns the number of strokes removed. Surviving strokes keep their order.
pub fn erase(strokes: &mut Vec<Stroke>, point: Point, radius: f64) -> usize {
    let before = strokes.len();
    strokes.retain(|stroke| !stroke.touches(point, radius));
    before - strokes.len()
}
