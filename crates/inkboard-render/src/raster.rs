//! CPU raster surface backed by a tiny-skia pixmap.

use crate::color::to_rgba8;
use crate::renderer::{RenderResult, RendererError, Surface};
use image::{Rgba, RgbaImage};
use kurbo::{Line, Point};
use peniko::Color;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// An antialiased RGBA8 surface. Pixels are stored premultiplied.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Create a transparent surface. Zero-sized surfaces are rejected.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RendererError::EmptySurface(width, height))?;
        Ok(Self { pixmap })
    }

    /// Straight-alpha pixel at (x, y), or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copy out as a straight-alpha image buffer.
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }

    /// Fill every pixel with a color.
    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    /// Composite another surface of the same size over this one.
    pub fn composite(&mut self, other: &RasterSurface) {
        self.pixmap.draw_pixmap(
            0,
            0,
            other.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn stroke_segment(&mut self, line: Line, color: Color, width: f64) {
        if width.is_nan() || width <= 0.0 {
            return;
        }
        if line.p0 == line.p1 {
            self.fill_dot(line.p0, color, width);
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(line.p0.x as f32, line.p0.y as f32);
        pb.line_to(line.p1.x as f32, line.p1.y as f32);
        let Some(path) = pb.finish() else {
            log::trace!("Skipping unrepresentable segment {:?}", line);
            return;
        };

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }

    fn fill_dot(&mut self, center: Point, color: Color, width: f64) {
        if width.is_nan() || width <= 0.0 {
            return;
        }
        let Some(path) =
            PathBuilder::from_circle(center.x as f32, center.y as f32, (width / 2.0) as f32)
        else {
            log::trace!("Skipping unrepresentable dot at {:?}", center);
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = to_rgba8(color);
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}
