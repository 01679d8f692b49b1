//! Cell classification: border vs interior, and what an interior value means.
//!
//! Rules never compare raw values against the sentinel. They ask the grid for
//! a [`Slot`], and decode interior values into [`CellContent`] for the active
//! mode.

use crate::core::types::{Mode, UNTIMED};

/// Live cell in the binary modes
pub const ALIVE: i32 = 1;
pub const EMPTY: i32 = 0;
pub const PREDATOR: i32 = 1;
pub const PREY: i32 = 2;
pub const FOOD: i32 = 5;
/// Snake head; body segments are `SNAKE_HEAD + age`
pub const SNAKE_HEAD: i32 = 10;

/// Where a coordinate falls in the padded index space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Sentinel ring around the universe
    Border,
    /// A real cell, carrying its current value
    Interior(i32),
}

impl Slot {
    pub fn is_border(self) -> bool {
        matches!(self, Slot::Border)
    }

    pub fn value(self) -> Option<i32> {
        match self {
            Slot::Border => None,
            Slot::Interior(v) => Some(v),
        }
    }
}

/// Meaning of an interior cell under a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    Alive,
    Food,
    SnakeHead,
    SnakeBody { age: i32 },
    Predator { lifetime: i32 },
    Prey { lifetime: i32 },
    /// A code with no meaning in the active mode
    Other(i32),
}

impl CellContent {
    pub fn decode(mode: Mode, value: i32, lifetime: i32) -> Self {
        match mode {
            Mode::Snake => match value {
                EMPTY => CellContent::Empty,
                FOOD => CellContent::Food,
                SNAKE_HEAD => CellContent::SnakeHead,
                v if v > SNAKE_HEAD => CellContent::SnakeBody { age: v - SNAKE_HEAD },
                v => CellContent::Other(v),
            },
            Mode::PredatorPrey => match value {
                EMPTY => CellContent::Empty,
                PREDATOR => CellContent::Predator { lifetime },
                PREY => CellContent::Prey { lifetime },
                FOOD => CellContent::Food,
                v => CellContent::Other(v),
            },
            _ => match value {
                EMPTY => CellContent::Empty,
                ALIVE => CellContent::Alive,
                v => CellContent::Other(v),
            },
        }
    }

    /// The `(value, lifetime)` pair this content is stored as
    pub fn encode(self) -> (i32, i32) {
        match self {
            CellContent::Empty => (EMPTY, UNTIMED),
            CellContent::Alive => (ALIVE, UNTIMED),
            CellContent::Food => (FOOD, UNTIMED),
            CellContent::SnakeHead => (SNAKE_HEAD, UNTIMED),
            CellContent::SnakeBody { age } => (SNAKE_HEAD + age, UNTIMED),
            CellContent::Predator { lifetime } => (PREDATOR, lifetime),
            CellContent::Prey { lifetime } => (PREY, lifetime),
            CellContent::Other(v) => (v, UNTIMED),
        }
    }

    /// Snake head or body
    pub fn is_snake(self) -> bool {
        matches!(self, CellContent::SnakeHead | CellContent::SnakeBody { .. })
    }
}
