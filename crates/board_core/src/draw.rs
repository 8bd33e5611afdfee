use crate::geometry::Rect;
use crate::piece::GlyphStyle;

/// An RGB color in 0.0..=1.0 components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Fixed palette. The light squares are never painted; they are the cleared
/// background showing through.
pub const BACKGROUND: Color = Color::rgb(0.9, 0.9, 0.9);
pub const DARK_SQUARE: Color = Color::rgb(0.3, 0.3, 0.3);
pub const LABEL: Color = Color::rgb(0.1, 0.1, 0.1);
pub const PIECE_FOREGROUND: Color = Color::rgb(0.0, 0.0, 0.0);

/// Immediate-mode drawing primitives supplied by the host renderer.
///
/// Coordinates are top-left origin pixels; `draw_text` anchors the text at
/// its top-left corner. Centering is the caller's job, computed from
/// `text_extent`.
pub trait DrawContext {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn text_extent(&self, text: &str, style: &GlyphStyle) -> (f32, f32);
    fn draw_text(&mut self, text: &str, style: &GlyphStyle, x: f32, y: f32, color: Color);
}

/// Anything the host's foreground compositor can size and paint.
pub trait Drawable {
    /// Width and height of the render box.
    fn measure(&self) -> (f32, f32);
    /// Paints into the box whose top-left corner is `(x, y)`.
    fn paint(&self, ctx: &mut dyn DrawContext, x: f32, y: f32);
}
