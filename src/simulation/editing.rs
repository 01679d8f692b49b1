//! Click and drag edits, already translated to interior grid coordinates.
//!
//! A click toggles a cell. A drag paints: it only ever turns cells into the
//! brush's content, so sweeping over a cell twice leaves it painted.

use serde::{Deserialize, Serialize};

use crate::core::error::{AutomatonError, Result};
use crate::core::types::{Mode, Position, UNTIMED};
use crate::grid::cell::{ALIVE, EMPTY, FOOD, PREDATOR, PREY};
use crate::simulation::engine::Automaton;

/// What a Predator-Prey edit places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brush {
    #[default]
    Predator,
    Prey,
    Food,
}

impl Brush {
    fn value(self) -> i32 {
        match self {
            Brush::Predator => PREDATOR,
            Brush::Prey => PREY,
            Brush::Food => FOOD,
        }
    }
}

impl Automaton {
    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Toggle the cell at `(x, y)`. Returns true if the board changed.
    pub fn click(&mut self, x: i32, y: i32) -> Result<bool> {
        let pos = self.editable(x, y)?;
        let current = self.grid().value(pos);

        if self.mode() == Mode::PredatorPrey {
            let brush = self.brush.value();
            if current == brush {
                self.paint(pos, EMPTY, UNTIMED);
            } else {
                self.paint(pos, brush, self.brush_lifetime());
            }
        } else if current != EMPTY {
            self.paint(pos, EMPTY, UNTIMED);
        } else {
            self.paint(pos, ALIVE, UNTIMED);
        }
        Ok(true)
    }

    /// Paint the cell at `(x, y)` if it does not already hold the brush's
    /// content. Returns true if the board changed.
    pub fn drag(&mut self, x: i32, y: i32) -> Result<bool> {
        let pos = self.editable(x, y)?;
        let current = self.grid().value(pos);

        let target = if self.mode() == Mode::PredatorPrey {
            self.brush.value()
        } else {
            ALIVE
        };
        if current == target {
            return Ok(false);
        }
        // Binary drags only bring cells to life
        if self.mode() != Mode::PredatorPrey && current != EMPTY {
            return Ok(false);
        }

        let lifetime = if self.mode() == Mode::PredatorPrey {
            self.brush_lifetime()
        } else {
            UNTIMED
        };
        self.paint(pos, target, lifetime);
        Ok(true)
    }

    fn editable(&self, x: i32, y: i32) -> Result<Position> {
        if self.mode() == Mode::Snake {
            tracing::warn!("Ignoring edit at ({}, {}) in snake mode", x, y);
            return Err(AutomatonError::UnsupportedMode(Mode::Snake));
        }
        self.interior_position(x, y)
    }

    fn brush_lifetime(&self) -> i32 {
        match self.brush {
            Brush::Food => UNTIMED,
            Brush::Predator | Brush::Prey => self.predator_lifetime(),
        }
    }

    fn paint(&mut self, pos: Position, value: i32, lifetime: i32) {
        let grid = self.grid_mut();
        grid.set_value(pos, value);
        grid.set_lifetime(pos, lifetime);
    }
}
