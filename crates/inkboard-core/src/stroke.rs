//! Freehand ink strokes.

use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// One continuous ink path with a fixed color and width.
///
/// Points are append-only: replaying them in order reproduces the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in the path, in input order.
    pub points: Vec<Point>,
    /// CSS color string.
    pub color: String,
    /// Line width in canvas pixels.
    pub width: f64,
}

impl Stroke {
    /// Create a single-point stroke.
    pub fn new(start: Point, color: impl Into<String>, width: f64) -> Self {
        Self::from_points(vec![start], color, width)
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: impl Into<String>, width: f64) -> Self {
        Self {
            points,
            color: color.into(),
            width,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the stroke can be rendered: at least one point and a
    /// positive, finite width.
    pub fn is_valid(&self) -> bool {
        !self.points.is_empty() && self.width.is_finite() && self.width > 0.0
    }

    /// First point of the path.
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The newest segment (last two points), if there are at least two.
    pub fn last_segment(&self) -> Option<Line> {
        match self.points.as_slice() {
            [.., a, b] => Some(Line::new(*a, *b)),
            _ => None,
        }
    }

    /// All consecutive segments in path order.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// Whether any point of the path lies within `radius` of `point`.
    pub fn touches(&self, point: Point, radius: f64) -> bool {
        let radius_sq = radius * radius;
        self.points
            .iter()
            .any(|p| (*p - point).hypot2() <= radius_sq)
    }

    /// Bounding box of the points, ignoring width.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.start() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(first, first), |rect, p| rect.union_pt(*p))
    }
}
