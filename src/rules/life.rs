//! Conway's Game of Life on a torus (B3/S23)

use crate::core::types::{FieldKind, Position};
use crate::grid::cell::{ALIVE, EMPTY};
use crate::grid::topology::moore_count;
use crate::grid::universe::Grid;

/// Next state of one cell, from the current buffers
pub fn cell_next(grid: &Grid, pos: Position) -> i32 {
    let neighbors = moore_count(grid, pos, ALIVE);
    let alive = grid.value(pos) == ALIVE;

    match (alive, neighbors) {
        (true, 2) | (true, 3) => ALIVE,
        (false, 3) => ALIVE,
        _ => EMPTY,
    }
}

/// Advance the universe by one generation
pub fn step(grid: &mut Grid) {
    let cells: Vec<Position> = grid.interior().collect();
    for pos in cells {
        let v = cell_next(grid, pos);
        grid.set_next(FieldKind::Value, pos, v);
    }
    grid.commit_generation(&[FieldKind::Value]);
}
