//! Neighbor addressing.
//!
//! Two flavors exist side by side:
//! - bounded lookups step onto the sentinel ring at the edge (Snake,
//!   Predator-Prey treat it as a wall)
//! - toroidal lookups identify each edge with the opposite one

use crate::core::types::{Direction, Position};
use crate::grid::universe::Grid;

/// Adjacent coordinate in direction `dir`, without wrapping
#[inline]
pub fn directional_offset(pos: Position, dir: Direction) -> Position {
    pos.offset(dir)
}

/// Map a ring coordinate to its toroidal counterpart: `0 -> N` and `N+1 -> 1`
/// on each axis. Interior coordinates are returned unchanged.
#[inline]
pub fn wrap_toroidal(grid: &Grid, pos: Position) -> Position {
    Position::new(
        wrap_axis(pos.x, grid.width()),
        wrap_axis(pos.y, grid.height()),
    )
}

#[inline]
fn wrap_axis(c: i32, n: i32) -> i32 {
    if c < 1 {
        n
    } else if c > n {
        1
    } else {
        c
    }
}

/// Toroidal neighbor one step in `dir`
#[inline]
pub fn torus_neighbor(grid: &Grid, pos: Position, dir: Direction) -> Position {
    wrap_toroidal(grid, directional_offset(pos, dir))
}

/// Toroidal diagonal neighbor: first step `vertical`, then `horizontal`
#[inline]
pub fn torus_diagonal(
    grid: &Grid,
    pos: Position,
    vertical: Direction,
    horizontal: Direction,
) -> Position {
    wrap_toroidal(
        grid,
        directional_offset(directional_offset(pos, vertical), horizontal),
    )
}

/// Number of the eight surrounding cells holding `value`, with each
/// coordinate clamped onto the opposite edge when it leaves the interior
pub fn moore_count(grid: &Grid, pos: Position, value: i32) -> u8 {
    let mut count = 0;
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let x = wrap_axis(pos.x + dx, grid.width());
            let y = wrap_axis(pos.y + dy, grid.height());
            if grid.value(Position::new(x, y)) == value {
                count += 1;
            }
        }
    }
    count
}

/// The four bounded neighbors of `pos` in slot order (down, left, right, up)
#[inline]
pub fn von_neumann(pos: Position) -> [(Direction, Position); 4] {
    Direction::CARDINALS.map(|dir| (dir, directional_offset(pos, dir)))
}
