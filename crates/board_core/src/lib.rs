// Board geometry and rendering core modules
pub mod draw;
pub mod error;
pub mod geometry;
pub mod piece;
pub mod surface;

// Re-export main types for convenience
pub use draw::{Color, DrawContext, Drawable};
pub use error::BoardError;
pub use geometry::{Rect, Square, BOARD_DIM};
pub use piece::{Glyph, GlyphStyle, Piece};
pub use surface::BoardSurface;
