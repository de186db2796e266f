//! Resolution of CSS color strings used by strokes.

use peniko::Color;
use peniko::color::{DynamicColor, Srgb};
use std::str::FromStr;

/// Fallback for colors that cannot be parsed.
pub fn fallback_color() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

/// Parse any CSS color string: named colors, hex, `rgb()`, `hsl()` and the
/// other CSS Color 4 forms.
pub fn parse_color(color: &str) -> Option<Color> {
    DynamicColor::from_str(color.trim())
        .ok()
        .map(|c| c.to_alpha_color::<Srgb>())
}

/// Parse a stroke color, falling back to black.
///
/// Called for every painted segment, so unknown colors are only traced here.
pub fn resolve_color(color: &str) -> Color {
    parse_color(color).unwrap_or_else(|| {
        log::trace!("Unrecognized color {:?}, drawing in black", color);
        fallback_color()
    })
}

/// RGBA8 components of a color.
pub fn to_rgba8(color: Color) -> [u8; 4] {
    let rgba = color.to_rgba8();
    [rgba.r, rgba.g, rgba.b, rgba.a]
}
