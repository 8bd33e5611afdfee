use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    /// A square string that is not exactly `[a-h][1-8]`.
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),
    /// A piece code outside the twelve recognized symbols.
    #[error("invalid piece glyph: {0:?}")]
    InvalidGlyph(char),
}
