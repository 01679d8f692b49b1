//! Grid storage and addressing shared by every rule-set

pub mod cell;
pub mod field;
pub mod topology;
pub mod universe;

pub use cell::{CellContent, Slot};
pub use field::DoubleBuffered;
pub use topology::{directional_offset, moore_count, torus_neighbor, wrap_toroidal};
pub use universe::Grid;
