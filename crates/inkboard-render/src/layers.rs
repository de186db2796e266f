//! The grid and ink layers of one tab.

use crate::color::resolve_color;
use crate::raster::RasterSurface;
use crate::renderer::{GridStyle, RenderResult, RendererError, Surface, draw_grid, redraw_ink};
use inkboard_core::canvas::TabCanvas;
use inkboard_core::repaint::{InkRepaint, Repaint};
use peniko::Color;

/// Stacked surfaces for a tab: grid underneath, ink on top.
#[derive(Debug, Clone)]
pub struct TabLayers<S = RasterSurface> {
    pub grid: S,
    pub ink: S,
}

impl<S: Surface> TabLayers<S> {
    pub fn from_surfaces(grid: S, ink: S) -> Self {
        Self { grid, ink }
    }

    /// Carry out the render work requested by the engine.
    pub fn apply(
        &mut self,
        repaint: &Repaint,
        canvas: &TabCanvas,
        grid_visible: bool,
        style: &GridStyle,
    ) {
        match &repaint.ink {
            InkRepaint::None => {}
            InkRepaint::Dot {
                center,
                color,
                width,
            } => self.ink.fill_dot(*center, resolve_color(color), *width),
            InkRepaint::Segment { line, color, width } => {
                self.ink.stroke_segment(*line, resolve_color(color), *width)
            }
            InkRepaint::Full => redraw_ink(&mut self.ink, canvas.strokes()),
        }
        if repaint.grid {
            draw_grid(&mut self.grid, grid_visible, style);
        }
    }

    /// Redraw both layers from the tab's strokes.
    pub fn refresh(&mut self, canvas: &TabCanvas, grid_visible: bool, style: &GridStyle) {
        self.apply(&Repaint::all(), canvas, grid_visible, style);
    }
}

impl TabLayers<RasterSurface> {
    /// Two transparent raster layers of the given size.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            grid: RasterSurface::new(width, height)?,
            ink: RasterSurface::new(width, height)?,
        })
    }

    /// Composite grid then ink over a white background.
    pub fn flatten(&self) -> RasterSurface {
        let mut out = self.grid.clone();
        out.fill(Color::from_rgba8(255, 255, 255, 255));
        out.composite(&self.grid);
        out.composite(&self.ink);
        out
    }

    /// Flatten and encode as PNG bytes.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let flat = self.flatten();
        let (width, height) = (flat.width(), flat.height());

        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .map_err(|e| RendererError::Encode(e.to_string()))?;
            writer
                .write_image_data(flat.to_image().as_raw())
                .map_err(|e| RendererError::Encode(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| RendererError::Encode(e.to_string()))?;
        }

        log::debug!("Encoded {}x{} PNG: {} bytes", width, height, png_data.len());
        Ok(png_data)
    }
}
