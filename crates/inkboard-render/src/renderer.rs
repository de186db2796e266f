//! Surface abstraction and the ink/grid drawing routines.

use crate::color::resolve_color;
use inkboard_core::stroke::Stroke;
use kurbo::{Line, Point};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface has zero size: {0}x{1}")]
    EmptySurface(u32, u32),
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Default grid cell size in pixels.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Smallest grid spacing that is drawn.
pub const MIN_CELL_SIZE: f64 = 1.0;

/// Grid display settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Spacing between grid lines.
    pub cell_size: f64,
    pub color: Color,
    pub line_width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            color: Color::from_rgba8(204, 204, 204, 255),
            line_width: 1.0,
        }
    }
}

impl GridStyle {
    /// Default style with a custom cell size.
    pub fn with_cell_size(cell_size: f64) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }
}

/// A 2D pixel target.
///
/// Strokes are drawn with round caps: a segment covers every pixel within
/// half the width of the line between its endpoints.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Draw a round-capped line segment.
    fn stroke_segment(&mut self, line: Line, color: Color, width: f64);

    /// Draw a filled dot whose diameter is `width`.
    fn fill_dot(&mut self, center: Point, color: Color, width: f64) {
        self.stroke_segment(Line::new(center, center), color, width);
    }
}

/// Draw a whole stroke: its seed dot, then each segment in order.
///
/// This is the same sequence the incremental path issues while the stroke
/// is being drawn, so both produce identical pixels.
pub fn draw_stroke<S: Surface + ?Sized>(surface: &mut S, stroke: &Stroke) {
    let Some(start) = stroke.start() else {
        return;
    };
    let color = resolve_color(&stroke.color);
    surface.fill_dot(start, color, stroke.width);
    for segment in stroke.segments() {
        surface.stroke_segment(segment, color, stroke.width);
    }
}

/// Clear the ink layer and replay every stroke back to front.
pub fn redraw_ink<S: Surface + ?Sized>(surface: &mut S, strokes: &[Stroke]) {
    surface.clear();
    for stroke in strokes {
        draw_stroke(surface, stroke);
    }
    log::trace!(
        "Full redraw: {} strokes, {} points",
        strokes.len(),
        strokes.iter().map(Stroke::len).sum::<usize>()
    );
}

/// Repaint the grid layer. A hidden grid leaves the layer empty, as does a
/// cell size below [`MIN_CELL_SIZE`].
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, visible: bool, style: &GridStyle) {
    surface.clear();
    if !visible {
        return;
    }
    let cell = style.cell_size;
    if !cell.is_finite() || cell < MIN_CELL_SIZE {
        log::warn!("Not drawing grid with cell size {}", cell);
        return;
    }

    let width = surface.width() as f64;
    let height = surface.height() as f64;
    // Offset by half a pixel so one-pixel lines land on a single column/row.
    let offset = style.line_width / 2.0;

    for i in 0..=(width / cell).floor() as u32 {
        let x = i as f64 * cell + offset;
        let line = Line::new(Point::new(x, 0.0), Point::new(x, height));
        surface.stroke_segment(line, style.color, style.line_width);
    }

    for i in 0..=(height / cell).floor() as u32 {
        let y = i as f64 * cell + offset;
        let line = Line::new(Point::new(0.0, y), Point::new(width, y));
        surface.stroke_segment(line, style.color, style.line_width);
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingSurface};
    use super::*;

    #[test]
    fn test_draw_stroke_replays_in_order() {
        let stroke = Stroke::from_points(
            vec![
                Point::new(10.0, 10.0),
                Point::new(20.0, 20.0),
                Point::new(30.0, 10.0),
            ],
            "red",
            4.0,
        );
        let mut surface = RecordingSurface::new(100, 100);
        draw_stroke(&mut surface, &stroke);

        let p = |x, y| Point::new(x, y);
        assert_eq!(
            surface.segments(),
            vec![
                Line::new(p(10.0, 10.0), p(10.0, 10.0)),
                Line::new(p(10.0, 10.0), p(20.0, 20.0)),
                Line::new(p(20.0, 20.0), p(30.0, 10.0)),
            ]
        );
        assert!(surface
            .calls
            .iter()
            .all(|c| matches!(c, Call::Segment(_, [255, 0, 0, 255], w) if *w == 4.0)));
    }

    #[test]
    fn test_redraw_clears_first() {
        let strokes = vec![
            Stroke::new(Point::new(1.0, 1.0), "black", 2.0),
            Stroke::new(Point::new(2.0, 2.0), "blue", 2.0),
        ];
        let mut surface = RecordingSurface::new(10, 10);
        redraw_ink(&mut surface, &strokes);

        assert_eq!(surface.calls.first(), Some(&Call::Clear));
        assert_eq!(surface.calls.len(), 3);
        assert!(matches!(surface.calls[2], Call::Segment(_, [0, 0, 255, 255], _)));
    }

    #[test]
    fn test_grid_line_positions() {
        let mut surface = RecordingSurface::new(120, 60);
        draw_grid(&mut surface, true, &GridStyle::default());

        let segments = surface.segments();
        let vertical: Vec<f64> = segments
            .iter()
            .filter(|l| l.p0.x == l.p1.x)
            .map(|l| l.p0.x)
            .collect();
        let horizontal: Vec<f64> = segments
            .iter()
            .filter(|l| l.p0.y == l.p1.y)
            .map(|l| l.p0.y)
            .collect();

        assert_eq!(vertical, vec![0.5, 50.5, 100.5]);
        assert_eq!(horizontal, vec![0.5, 50.5]);
    }

    #[test]
    fn test_hidden_grid_only_clears() {
        let mut surface = RecordingSurface::new(120, 60);
        draw_grid(&mut surface, false, &GridStyle::default());
        assert_eq!(surface.calls, vec![Call::Clear]);
    }

    #[test]
    fn test_tiny_cell_size_skips_grid() {
        let mut surface = RecordingSurface::new(1280, 800);
        for cell in [1e-6, 1e-14, 0.0, f64::NAN] {
            surface.calls.clear();
            draw_grid(&mut surface, true, &GridStyle::with_cell_size(cell));
            assert_eq!(surface.calls, vec![Call::Clear]);
        }
    }

    #[test]
    fn test_grid_line_count_at_min_cell_size() {
        let mut surface = RecordingSurface::new(10, 5);
        draw_grid(&mut surface, true, &GridStyle::with_cell_size(MIN_CELL_SIZE));
        // Clear, then 11 vertical and 6 horizontal lines.
        assert_eq!(surface.calls.len(), 1 + 11 + 6);
    }
}
