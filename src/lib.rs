//! Torus Automata - cellular automata on a toroidal grid
//!
//! Seven rule-sets share one padded, double-buffered grid: Game of Life,
//! Snake, Predator-Prey, and the Noise, Erosion, Fluids and Gases modeling
//! rules. [`simulation::Automaton`] owns a session and advances it one
//! generation at a time.

pub mod codec;
pub mod core;
pub mod grid;
pub mod rules;
pub mod simulation;

pub use crate::core::{
    AutomatonConfig, AutomatonError, Direction, FieldKind, Mode, Position, Result,
};
pub use crate::simulation::{Automaton, Brush, EndReason, RunSummary};
