//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value stored in every field of the sentinel border ring
pub const BORDER: i32 = -1;

/// Lifetime of a cell that is not a living timed entity
pub const UNTIMED: i32 = i16::MAX as i32;

/// Generation counter
pub type Generation = u64;

/// Grid coordinate in the padded index space (`0..=nx+1`, `0..=ny+1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Adjacent coordinate one step in `dir`. No wrapping is applied.
    pub fn offset(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement direction, encoded with numeric-keypad codes.
///
/// Opposite directions sum to 10, which is how "is this neighbor aimed at me" is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum Direction {
    #[default]
    None = 0,
    Down = 2,
    Left = 4,
    Right = 6,
    Up = 8,
}

impl Direction {
    /// The four movement directions in neighborhood slot order (slot `i` has code `2 * i`)
    pub const CARDINALS: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Direction::None),
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            8 => Some(Direction::Up),
            _ => None,
        }
    }

    /// Coordinate delta; `y` grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
        }
    }

    /// True if the two directions point exactly against each other
    pub fn is_opposite_of(self, other: Direction) -> bool {
        self != Direction::None && self.code() + other.code() == 10
    }
}

/// The four scalar fields every cell carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Value,
    Color,
    Lifetime,
    Direction,
}

/// Evolution rule-set driving the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Life,
    Snake,
    PredatorPrey,
    Noise,
    Erosion,
    Fluids,
    Gases,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Life,
        Mode::Snake,
        Mode::PredatorPrey,
        Mode::Noise,
        Mode::Erosion,
        Mode::Fluids,
        Mode::Gases,
    ];

    /// Position in the mode selector
    pub fn index(self) -> usize {
        Mode::ALL.iter().position(|&m| m == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Mode::ALL.get(index).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Life => "Game of Life",
            Mode::Snake => "Snake",
            Mode::PredatorPrey => "Predator",
            Mode::Noise => "Noise",
            Mode::Erosion => "Erosion",
            Mode::Fluids => "Fluids",
            Mode::Gases => "Gases",
        }
    }

    /// True for modes whose cells are plain 0/1 values
    pub fn is_binary(self) -> bool {
        !matches!(self, Mode::Snake | Mode::PredatorPrey)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "life" | "game_of_life" => Ok(Mode::Life),
            "snake" => Ok(Mode::Snake),
            "predator" | "predator_prey" => Ok(Mode::PredatorPrey),
            "noise" => Ok(Mode::Noise),
            "erosion" => Ok(Mode::Erosion),
            "fluids" => Ok(Mode::Fluids),
            "gases" => Ok(Mode::Gases),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}
