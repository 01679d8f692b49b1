//! Per-mode transition rules.
//!
//! Each rule reads the current buffers of a [`Grid`](crate::grid::Grid),
//! writes the scratch buffers, and commits, setting the stall flag.

pub mod life;
pub mod modeling;
pub mod predator;
pub mod snake;

pub use snake::{Heading, SnakeAction, SnakeState};
