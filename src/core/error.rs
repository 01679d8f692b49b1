use thiserror::Error;

use crate::core::types::{FieldKind, Mode};

#[derive(Error, Debug)]
pub enum AutomatonError {
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Coordinate ({x}, {y}) is outside the interior of the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown glyph '{glyph}' at ({x}, {y})")]
    InvalidGlyph { glyph: char, x: i32, y: i32 },

    #[error(
        "Glyph grid must be {expected_rows} rows of {expected_cols} glyphs \
         (row {row} does not match)"
    )]
    GlyphShape {
        expected_rows: usize,
        expected_cols: usize,
        row: usize,
    },

    #[error("{kind:?} value {value} cannot be stored or encoded")]
    UnrepresentableValue { kind: FieldKind, value: i32 },

    #[error("Operation not supported in {0} mode")]
    UnsupportedMode(Mode),

    #[error("Grid is too small to hold the initial snake")]
    NoSpaceForSnake,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutomatonError>;
