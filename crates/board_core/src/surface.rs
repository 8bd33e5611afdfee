use log::warn;

use crate::draw::{Drawable, DrawContext, BACKGROUND, DARK_SQUARE, LABEL};
use crate::geometry::{Rect, Square, BOARD_DIM};
use crate::piece::{GlyphStyle, Piece};

/// Left inset for rank labels and bottom inset for file labels.
const LABEL_MARGIN: f32 = 2.0;
const LABEL_SIZE: f32 = 14.0;

/// Owns the placed pieces and the board background.
///
/// The host drives a two-phase repaint: `render_background` paints the
/// checkerboard and labels, then the host compositor paints each piece in
/// insertion order (later insertions on top). The surface's job is to keep
/// every placed piece's pixel origin at the exact center of its cell before
/// that foreground phase runs.
pub struct BoardSurface {
    pieces: Vec<Piece>,
    width: f32,
    height: f32,
    label_style: GlyphStyle,
}

impl BoardSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pieces: Vec::new(),
            width,
            height,
            label_style: GlyphStyle::new("FreeSerif", LABEL_SIZE),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces in insertion order, which is also z-order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn piece(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    /// Raw origin override for a piece the host is dragging.
    pub fn set_origin(&mut self, index: usize, origin: (f32, f32)) {
        if let Some(piece) = self.pieces.get_mut(index) {
            piece.origin = origin;
        }
    }

    /// Adds a piece; if it carries a location, its origin snaps to the cell
    /// center immediately. Returns the index the host uses as a handle.
    pub fn insert(&mut self, piece: Piece) -> usize {
        self.pieces.push(piece);
        let index = self.pieces.len() - 1;
        self.recenter(index);
        index
    }

    /// Adds an unplaced piece at a raw pixel position (demo bootstrap path).
    pub fn insert_at(&mut self, mut piece: Piece, origin: (f32, f32)) -> usize {
        piece.set_location(None);
        piece.origin = origin;
        self.pieces.push(piece);
        self.pieces.len() - 1
    }

    /// Called when a drag gesture completes. The piece snaps to the center
    /// of its new cell, never to the raw drop point; an off-board drop
    /// leaves it unplaced at wherever the host last put it.
    pub fn settle(&mut self, index: usize, location: Option<Square>) {
        if let Some(piece) = self.pieces.get_mut(index) {
            piece.set_location(location);
            self.recenter(index);
        }
    }

    /// Stores the new surface size and restores the centering invariant for
    /// every placed piece. Must run before the next foreground paint.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        for index in 0..self.pieces.len() {
            self.recenter(index);
        }
    }

    fn recenter(&mut self, index: usize) {
        let piece = &self.pieces[index];
        if let Some(square) = piece.location() {
            let cell = square.pixel_rect(self.width, self.height);
            let (piece_w, piece_h) = piece.measure();
            let origin = (
                cell.x + (cell.w - piece_w) / 2.0,
                cell.y + (cell.h - piece_h) / 2.0,
            );
            self.pieces[index].origin = origin;
        }
    }

    /// Background phase: clears the whole surface, fills the 32 dark
    /// squares, then draws the rank and file labels. Light squares are the
    /// cleared background showing through.
    pub fn render_background(&self, ctx: &mut dyn DrawContext) {
        if self.width <= 0.0 || self.height <= 0.0 {
            warn!("skipping repaint of degenerate {}x{} surface", self.width, self.height);
            return;
        }

        ctx.clear(BACKGROUND);

        let cell_w = self.width / BOARD_DIM as f32;
        let cell_h = self.height / BOARD_DIM as f32;

        for row in 0..BOARD_DIM {
            for col in 0..BOARD_DIM {
                if (row + col) % 2 == 1 {
                    let rect = Rect {
                        x: col as f32 * cell_w,
                        y: row as f32 * cell_h,
                        w: cell_w,
                        h: cell_h,
                    };
                    ctx.fill_rect(rect, DARK_SQUARE);
                }
            }
        }

        // Rank labels "8".."1" down the left edge, one per row.
        for row in 0..BOARD_DIM {
            let label = ((b'8' - row) as char).to_string();
            let (_, text_h) = ctx.text_extent(&label, &self.label_style);
            let y = row as f32 * cell_h + (cell_h - text_h) / 2.0;
            ctx.draw_text(&label, &self.label_style, LABEL_MARGIN, y, LABEL);
        }

        // File labels "a".."h" along the bottom edge, one per column.
        for col in 0..BOARD_DIM {
            let label = ((b'a' + col) as char).to_string();
            let (text_w, text_h) = ctx.text_extent(&label, &self.label_style);
            let x = col as f32 * cell_w + (cell_w - text_w) / 2.0;
            let y = self.height - text_h - LABEL_MARGIN;
            ctx.draw_text(&label, &self.label_style, x, y, LABEL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Color;
    use crate::BoardError;

    #[derive(Default)]
    struct Recorder {
        cleared: Vec<Color>,
        rects: Vec<(Rect, Color)>,
        texts: Vec<(String, f32, f32)>,
    }

    impl DrawContext for Recorder {
        fn clear(&mut self, color: Color) {
            self.cleared.push(color);
        }
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }
        fn text_extent(&self, text: &str, style: &GlyphStyle) -> (f32, f32) {
            (style.size * 0.5 * text.chars().count() as f32, style.size)
        }
        fn draw_text(&mut self, text: &str, _style: &GlyphStyle, x: f32, y: f32, _color: Color) {
            self.texts.push((text.to_string(), x, y));
        }
    }

    fn piece_at(coord: &str, edge: f32) -> Piece {
        Piece::at(
            'Q',
            GlyphStyle::new("FreeSerif", 24.0),
            edge,
            Square::from_algebraic(coord).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn paints_exactly_32_dark_squares_at_odd_parity() {
        let surface = BoardSurface::new(400.0, 400.0);
        let mut ctx = Recorder::default();
        surface.render_background(&mut ctx);

        assert_eq!(ctx.cleared, vec![BACKGROUND]);
        assert_eq!(ctx.rects.len(), 32);
        for (rect, color) in &ctx.rects {
            assert_eq!(*color, DARK_SQUARE);
            let col = (rect.x / 50.0) as u32;
            let row = (rect.y / 50.0) as u32;
            assert_eq!((row + col) % 2, 1, "square ({row},{col}) should be light");
            assert_eq!((rect.w, rect.h), (50.0, 50.0));
        }
    }

    #[test]
    fn draws_rank_and_file_labels_centered_by_extent() {
        let surface = BoardSurface::new(400.0, 400.0);
        let mut ctx = Recorder::default();
        surface.render_background(&mut ctx);

        let labels: Vec<&str> = ctx.texts.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(
            labels,
            ["8", "7", "6", "5", "4", "3", "2", "1", "a", "b", "c", "d", "e", "f", "g", "h"]
        );
        // Rank "8": row 0, label height 14 -> y = (50 - 14) / 2.
        assert_eq!(ctx.texts[0].1, LABEL_MARGIN);
        assert_eq!(ctx.texts[0].2, 18.0);
        // File "a": col 0, label width 7 -> x = (50 - 7) / 2.
        assert_eq!(ctx.texts[8].1, 21.5);
        assert_eq!(ctx.texts[8].2, 400.0 - 14.0 - LABEL_MARGIN);
    }

    #[test]
    fn degenerate_surface_paints_nothing() {
        let surface = BoardSurface::new(0.0, 400.0);
        let mut ctx = Recorder::default();
        surface.render_background(&mut ctx);
        assert!(ctx.cleared.is_empty());
        assert!(ctx.rects.is_empty());
        assert!(ctx.texts.is_empty());
    }

    #[test]
    fn insert_snaps_a_placed_piece_to_the_cell_center() {
        let mut surface = BoardSurface::new(400.0, 400.0);
        let index = surface.insert(piece_at("e4", 30.0));
        assert_eq!(surface.piece(index).unwrap().origin(), (210.0, 210.0));
    }

    #[test]
    fn insert_at_keeps_the_raw_origin_for_unplaced_pieces() {
        let mut surface = BoardSurface::new(400.0, 400.0);
        let piece = Piece::new('k', GlyphStyle::new("FreeSerif", 24.0), 30.0).unwrap();
        let index = surface.insert_at(piece, (33.0, 77.0));
        let piece = surface.piece(index).unwrap();
        assert_eq!(piece.location(), None);
        assert_eq!(piece.origin(), (33.0, 77.0));
    }

    #[test]
    fn settle_recenters_on_the_new_cell() {
        let mut surface = BoardSurface::new(400.0, 400.0);
        let index = surface.insert(piece_at("e4", 30.0));
        surface.set_origin(index, (123.0, 456.0)); // mid-drag raw position
        surface.settle(index, Some(Square::from_algebraic("a8").unwrap()));
        let piece = surface.piece(index).unwrap();
        assert_eq!(piece.location(), Some(Square { rank: 0, file: 0 }));
        assert_eq!(piece.origin(), (10.0, 10.0));
    }

    #[test]
    fn settle_off_board_leaves_the_raw_origin() {
        let mut surface = BoardSurface::new(400.0, 400.0);
        let index = surface.insert(piece_at("e4", 30.0));
        surface.set_origin(index, (390.0, 5.0));
        surface.settle(index, None);
        let piece = surface.piece(index).unwrap();
        assert_eq!(piece.location(), None);
        assert_eq!(piece.origin(), (390.0, 5.0));
    }

    #[test]
    fn resize_recomputes_every_placed_origin() {
        let mut surface = BoardSurface::new(400.0, 400.0);
        let e4 = surface.insert(piece_at("e4", 30.0));
        let a8 = surface.insert(piece_at("a8", 30.0));
        surface.resize(800.0, 400.0);
        // Asymmetric cells: 100 wide, 50 tall.
        assert_eq!(surface.piece(e4).unwrap().origin(), (435.0, 210.0));
        assert_eq!(surface.piece(a8).unwrap().origin(), (35.0, 10.0));
    }

    #[test]
    fn invalid_coordinate_aborts_placement_before_any_mutation() {
        let mut surface = BoardSurface::new(400.0, 400.0);
        let result = Square::from_algebraic("z9")
            .map(|square| surface.insert(piece_at_square(square)));
        assert_eq!(
            result,
            Err(BoardError::InvalidCoordinate("z9".to_string()))
        );
        assert!(surface.is_empty());
    }

    fn piece_at_square(square: Square) -> Piece {
        Piece::at('Q', GlyphStyle::new("FreeSerif", 24.0), 30.0, square).unwrap()
    }
}
