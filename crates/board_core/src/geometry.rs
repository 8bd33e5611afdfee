use crate::BoardError;

/// Logical board dimension. The board is always 8x8; every loop bound and
/// cell-size computation goes through this constant.
pub const BOARD_DIM: u8 = 8;

/// One of the 64 board cells. Rank 0 is the top row (algebraic rank "8",
/// the black side), file 0 is the 'a' file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub rank: u8,
    pub file: u8,
}

/// An axis-aligned pixel rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Square {
    /// Parses a two-character algebraic coordinate such as "e4".
    ///
    /// Strict matching: exactly two characters, lowercase file letter
    /// 'a'..='h' followed by rank digit '1'..='8'. No trimming or case
    /// normalization.
    pub fn from_algebraic(coord: &str) -> Result<Self, BoardError> {
        let mut chars = coord.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(BoardError::InvalidCoordinate(coord.to_string())),
        };

        if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
            return Err(BoardError::InvalidCoordinate(coord.to_string()));
        }

        Ok(Self {
            // '8' is the top row, so rank index counts down from it.
            rank: b'8' - rank_ch as u8,
            file: file_ch as u8 - b'a',
        })
    }

    /// The algebraic name of this square, e.g. "e4".
    pub fn to_algebraic(self) -> String {
        let file_ch = (b'a' + self.file) as char;
        let rank_ch = (b'8' - self.rank) as char;
        format!("{}{}", file_ch, rank_ch)
    }

    /// The pixel rectangle this square occupies on a surface of the given
    /// size. Cells are `surface/8` on each axis; non-square cells are fine.
    pub fn pixel_rect(self, surface_w: f32, surface_h: f32) -> Rect {
        let w = surface_w / BOARD_DIM as f32;
        let h = surface_h / BOARD_DIM as f32;
        Rect {
            x: self.file as f32 * w,
            y: self.rank as f32 * h,
            w,
            h,
        }
    }

    /// The square containing the pixel point `(x, y)`, or `None` when the
    /// point lies off the board or the surface is degenerate.
    pub fn from_pixel(x: f32, y: f32, surface_w: f32, surface_h: f32) -> Option<Self> {
        if surface_w <= 0.0 || surface_h <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let file = (x / (surface_w / BOARD_DIM as f32)) as i32;
        let rank = (y / (surface_h / BOARD_DIM as f32)) as i32;
        if file >= BOARD_DIM as i32 || rank >= BOARD_DIM as i32 {
            return None;
        }
        Some(Self {
            rank: rank as u8,
            file: file as u8,
        })
    }
}
