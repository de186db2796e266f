//! Inkboard Render Library
//!
//! Raster layers for Inkboard tabs. Each tab owns a grid layer and an ink
//! layer; the engine's repaint requests are applied to them either
//! incrementally (one dot or segment) or as a full replay of the strokes.

pub mod color;
mod layers;
mod raster;
mod renderer;

pub use color::{parse_color, resolve_color};
pub use layers::TabLayers;
pub use raster::RasterSurface;
pub use renderer::{
    DEFAULT_CELL_SIZE, GridStyle, MIN_CELL_SIZE, RenderResult, RendererError, Surface, draw_grid,
    draw_stroke, redraw_ink,
};
