//! Text encodings of the grid fields

pub mod glyphs;

pub use glyphs::{decode_lifetimes, decode_values, encode_lifetimes, encode_values};
