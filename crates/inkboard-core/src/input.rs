//! Pointer input: raw mouse/touch events and their canvas-local normalization.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Layout information for a mounted canvas element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    /// Bounding box of the element in client (viewport) coordinates.
    pub client_rect: Rect,
    /// Size of the element's backing pixel store.
    pub pixel_size: Size,
}

impl CanvasGeometry {
    /// Create geometry from a layout box and a backing-store size.
    pub fn new(client_rect: Rect, pixel_size: Size) -> Self {
        Self {
            client_rect,
            pixel_size,
        }
    }

    /// Geometry for a canvas whose backing store matches its layout box.
    pub fn unscaled(client_rect: Rect) -> Self {
        Self::new(client_rect, client_rect.size())
    }

    /// Scale from layout pixels to backing-store pixels.
    ///
    /// A degenerate layout axis maps with scale 1.
    pub fn scale(&self) -> Vec2 {
        let axis = |pixels: f64, layout: f64| {
            if layout > 0.0 && pixels > 0.0 {
                pixels / layout
            } else {
                1.0
            }
        };
        Vec2::new(
            axis(self.pixel_size.width, self.client_rect.width()),
            axis(self.pixel_size.height, self.client_rect.height()),
        )
    }
}

/// Raw pointer event as delivered by the host, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawPointer {
    /// Mouse event carrying its offset relative to the canvas element.
    Mouse { offset: Point },
    /// Touch event carrying the client positions of all active touches.
    Touch { touches: Vec<Point> },
}

impl RawPointer {
    /// Mouse event at the given element offset.
    pub fn mouse(x: f64, y: f64) -> Self {
        RawPointer::Mouse {
            offset: Point::new(x, y),
        }
    }

    /// Touch event with a single contact at the given client position.
    pub fn touch(x: f64, y: f64) -> Self {
        RawPointer::Touch {
            touches: vec![Point::new(x, y)],
        }
    }
}

/// Convert a raw pointer event into canvas-local pixel coordinates.
///
/// Touch events use the first active touch relative to the canvas origin;
/// mouse events use their element offset. Both are then scaled into the
/// backing store. An unmounted canvas (or a touch event without touches)
/// yields the origin.
pub fn normalize(raw: &RawPointer, canvas: Option<&CanvasGeometry>) -> Point {
    let Some(canvas) = canvas else {
        return Point::ZERO;
    };

    let local = match raw {
        RawPointer::Mouse { offset } => *offset,
        RawPointer::Touch { touches } => match touches.first() {
            Some(touch) => Point::new(
                touch.x - canvas.client_rect.x0,
                touch.y - canvas.client_rect.y0,
            ),
            None => return Point::ZERO,
        },
    };

    let scale = canvas.scale();
    Point::new(local.x * scale.x, local.y * scale.y)
}

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the canvas bounds.
    Leave,
}

impl PointerEvent {
    /// Whether this event ends a gesture.
    pub fn ends_gesture(&self) -> bool {
        matches!(self, PointerEvent::Up { .. } | PointerEvent::Leave)
    }
}
