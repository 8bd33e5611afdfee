use crate::draw::{DrawContext, Drawable, PIECE_FOREGROUND};
use crate::geometry::Square;
use crate::BoardError;

/// The twelve piece symbols: uppercase codes for white, lowercase for black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    WhiteKing,
    WhiteQueen,
    WhiteRook,
    WhiteBishop,
    WhiteKnight,
    WhitePawn,
    BlackKing,
    BlackQueen,
    BlackRook,
    BlackBishop,
    BlackKnight,
    BlackPawn,
}

impl Glyph {
    pub const ALL: [Glyph; 12] = [
        Glyph::WhiteKing,
        Glyph::WhiteQueen,
        Glyph::WhiteRook,
        Glyph::WhiteBishop,
        Glyph::WhiteKnight,
        Glyph::WhitePawn,
        Glyph::BlackKing,
        Glyph::BlackQueen,
        Glyph::BlackRook,
        Glyph::BlackBishop,
        Glyph::BlackKnight,
        Glyph::BlackPawn,
    ];

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'K' => Some(Glyph::WhiteKing),
            'Q' => Some(Glyph::WhiteQueen),
            'R' => Some(Glyph::WhiteRook),
            'B' => Some(Glyph::WhiteBishop),
            'N' => Some(Glyph::WhiteKnight),
            'P' => Some(Glyph::WhitePawn),
            'k' => Some(Glyph::BlackKing),
            'q' => Some(Glyph::BlackQueen),
            'r' => Some(Glyph::BlackRook),
            'b' => Some(Glyph::BlackBishop),
            'n' => Some(Glyph::BlackKnight),
            'p' => Some(Glyph::BlackPawn),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Glyph::WhiteKing => 'K',
            Glyph::WhiteQueen => 'Q',
            Glyph::WhiteRook => 'R',
            Glyph::WhiteBishop => 'B',
            Glyph::WhiteKnight => 'N',
            Glyph::WhitePawn => 'P',
            Glyph::BlackKing => 'k',
            Glyph::BlackQueen => 'q',
            Glyph::BlackRook => 'r',
            Glyph::BlackBishop => 'b',
            Glyph::BlackKnight => 'n',
            Glyph::BlackPawn => 'p',
        }
    }

    /// The Unicode chess figurine used for display.
    pub fn symbol(self) -> char {
        match self {
            Glyph::WhiteKing => '\u{2654}',
            Glyph::WhiteQueen => '\u{2655}',
            Glyph::WhiteRook => '\u{2656}',
            Glyph::WhiteBishop => '\u{2657}',
            Glyph::WhiteKnight => '\u{2658}',
            Glyph::WhitePawn => '\u{2659}',
            Glyph::BlackKing => '\u{265A}',
            Glyph::BlackQueen => '\u{265B}',
            Glyph::BlackRook => '\u{265C}',
            Glyph::BlackBishop => '\u{265D}',
            Glyph::BlackKnight => '\u{265E}',
            Glyph::BlackPawn => '\u{265F}',
        }
    }
}

/// Font family and size a glyph renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStyle {
    pub family: String,
    pub size: f32,
}

impl GlyphStyle {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// A drawable piece. The glyph, style and edge size are fixed at
/// construction; only the location (and the origin the owning surface
/// derives from it) changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    glyph: Glyph,
    style: GlyphStyle,
    edge_size: f32,
    location: Option<Square>,
    /// Rendered top-left position, maintained by the owning `BoardSurface`
    /// (or by the host mid-drag), never by the piece itself.
    pub(crate) origin: (f32, f32),
}

impl Piece {
    /// Creates an unplaced piece from its single-character code.
    pub fn new(code: char, style: GlyphStyle, edge_size: f32) -> Result<Self, BoardError> {
        let glyph = Glyph::from_code(code).ok_or(BoardError::InvalidGlyph(code))?;
        Ok(Self {
            glyph,
            style,
            edge_size,
            location: None,
            origin: (0.0, 0.0),
        })
    }

    /// Creates a piece with an initial board location.
    pub fn at(
        code: char,
        style: GlyphStyle,
        edge_size: f32,
        square: Square,
    ) -> Result<Self, BoardError> {
        let mut piece = Self::new(code, style, edge_size)?;
        piece.location = Some(square);
        Ok(piece)
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn style(&self) -> &GlyphStyle {
        &self.style
    }

    pub fn edge_size(&self) -> f32 {
        self.edge_size
    }

    pub fn location(&self) -> Option<Square> {
        self.location
    }

    /// Updates the stored location only. Moving the rendered position is the
    /// owning surface's job.
    pub fn set_location(&mut self, location: Option<Square>) {
        self.location = location;
    }

    /// Rendered top-left position in surface pixels.
    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }
}

impl Drawable for Piece {
    fn measure(&self) -> (f32, f32) {
        // Fixed-size render box, not stretched to the cell, so the glyph
        // stays legible in small or non-square cells.
        (self.edge_size, self.edge_size)
    }

    fn paint(&self, ctx: &mut dyn DrawContext, x: f32, y: f32) {
        let text = self.glyph.symbol().to_string();
        let (text_w, text_h) = ctx.text_extent(&text, &self.style);
        // Symmetric centering on both axes, offset by the measured extent.
        let dx = (self.edge_size - text_w) / 2.0;
        let dy = (self.edge_size - text_h) / 2.0;
        ctx.draw_text(&text, &self.style, x + dx, y + dy, PIECE_FOREGROUND);
    }
}
