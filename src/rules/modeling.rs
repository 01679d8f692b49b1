//! Modeling rules: Noise, Erosion, Fluids, Gases.
//!
//! All four are single-pass boolean/arithmetic combinators of the toroidal
//! neighborhood, read from the current buffers and written to the next ones.

use crate::core::types::{Direction, FieldKind, Position};
use crate::grid::cell::{ALIVE, EMPTY};
use crate::grid::topology::{moore_count, torus_diagonal, torus_neighbor};
use crate::grid::universe::Grid;

/// Toroidal 3x3 neighborhood of a cell, by compass point
struct Neighborhood {
    center: i32,
    up: i32,
    down: i32,
    left: i32,
    right: i32,
    up_left: i32,
    up_right: i32,
    down_left: i32,
    down_right: i32,
}

impl Neighborhood {
    fn sample(grid: &Grid, pos: Position) -> Self {
        let at = |p: Position| grid.value(p);
        Self {
            center: at(pos),
            up: at(torus_neighbor(grid, pos, Direction::Up)),
            down: at(torus_neighbor(grid, pos, Direction::Down)),
            left: at(torus_neighbor(grid, pos, Direction::Left)),
            right: at(torus_neighbor(grid, pos, Direction::Right)),
            up_left: at(torus_diagonal(grid, pos, Direction::Up, Direction::Left)),
            up_right: at(torus_diagonal(grid, pos, Direction::Up, Direction::Right)),
            down_left: at(torus_diagonal(grid, pos, Direction::Down, Direction::Left)),
            down_right: at(torus_diagonal(grid, pos, Direction::Down, Direction::Right)),
        }
    }
}

/// `(self AND up) XOR down XOR left XOR right XOR self`
pub fn noise_cell(grid: &Grid, pos: Position) -> i32 {
    let n = Neighborhood::sample(grid, pos);
    (n.center & n.up) ^ n.down ^ n.left ^ n.right ^ n.center
}

/// A cell survives only if each of its four sides, or one of the two
/// diagonals flanking that side, is alive
pub fn erosion_cell(grid: &Grid, pos: Position) -> i32 {
    let n = Neighborhood::sample(grid, pos);
    n.center
        & (n.up | n.up_left | n.up_right)
        & (n.right | n.down_right | n.up_right)
        & (n.down | n.down_right | n.down_left)
        & (n.left | n.down_left | n.up_left)
}

/// Alive iff exactly four, or more than five, of the eight neighbors are alive
pub fn fluids_cell(grid: &Grid, pos: Position) -> i32 {
    match moore_count(grid, pos, ALIVE) {
        4 | 6..=8 => ALIVE,
        _ => EMPTY,
    }
}

/// Currently the erosion formula under its own mode name
// TODO: give Gases its own diffusion rule instead of reusing erosion
pub fn gases_cell(grid: &Grid, pos: Position) -> i32 {
    erosion_cell(grid, pos)
}

fn sweep(grid: &mut Grid, rule: fn(&Grid, Position) -> i32) {
    let cells: Vec<Position> = grid.interior().collect();
    for pos in cells {
        let v = rule(grid, pos);
        grid.set_next(FieldKind::Value, pos, v);
    }
    grid.commit_generation(&[FieldKind::Value]);
}

pub fn step_noise(grid: &mut Grid) {
    sweep(grid, noise_cell);
}

pub fn step_erosion(grid: &mut Grid) {
    sweep(grid, erosion_cell);
}

pub fn step_fluids(grid: &mut Grid) {
    sweep(grid, fluids_cell);
}

pub fn step_gases(grid: &mut Grid) {
    sweep(grid, gases_cell);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: i32, height: i32) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        let cells: Vec<Position> = grid.interior().collect();
        for p in cells {
            grid.set_value(p, ALIVE);
        }
        grid
    }

    #[test]
    fn test_noise_formula() {
        let mut grid = Grid::new(5, 5).unwrap();
        let c = Position::new(3, 3);
        grid.set_value(c, 1);
        // self & up = 0, then 0 ^ 0 ^ 0 ^ 0 ^ 1
        assert_eq!(noise_cell(&grid, c), 1);

        grid.set_value(Position::new(3, 2), 1);
        // (1 & 1) ^ 1 = 0
        assert_eq!(noise_cell(&grid, c), 0);

        grid.set_value(Position::new(2, 3), 1);
        assert_eq!(noise_cell(&grid, c), 1);
    }

    #[test]
    fn test_noise_wraps() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_value(Position::new(4, 1), 1);
        // Left neighbor of (1, 1) on the torus is (4, 1)
        assert_eq!(noise_cell(&grid, Position::new(1, 1)), 1);
    }

    #[test]
    fn test_fully_supported_cell_never_erodes() {
        let mut grid = filled(5, 5);
        for _ in 0..5 {
            step_erosion(&mut grid);
        }
        assert_eq!(grid.count_values(|v| v == ALIVE), 25);
        assert!(grid.is_stalled());
    }

    #[test]
    fn test_isolated_cell_erodes() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_value(Position::new(3, 3), 1);
        step_erosion(&mut grid);
        assert_eq!(grid.value(Position::new(3, 3)), 0);
        assert!(!grid.is_stalled());
    }

    #[test]
    fn test_erosion_side_supported_by_diagonal() {
        let mut grid = Grid::new(5, 5).unwrap();
        let c = Position::new(3, 3);
        grid.set_value(c, 1);
        // Diagonals alone cover every side
        grid.set_value(Position::new(2, 2), 1);
        grid.set_value(Position::new(4, 4), 1);
        assert_eq!(erosion_cell(&grid, c), 1);

        grid.set_value(Position::new(4, 4), 0);
        assert_eq!(erosion_cell(&grid, c), 0);
    }

    #[test]
    fn test_fluids_thresholds() {
        let mut grid = Grid::new(5, 5).unwrap();
        let c = Position::new(3, 3);
        let ring = [(2, 2), (3, 2), (4, 2), (2, 3), (4, 3), (2, 4), (3, 4), (4, 4)];
        let mut expected = Vec::new();
        for (k, &(x, y)) in ring.iter().enumerate() {
            grid.set_value(Position::new(x, y), 1);
            expected.push((k + 1, fluids_cell(&grid, c)));
        }
        assert_eq!(
            expected,
            vec![(1, 0), (2, 0), (3, 0), (4, 1), (5, 0), (6, 1), (7, 1), (8, 1)]
        );
    }

    #[test]
    fn test_gases_matches_erosion() {
        let mut grid = Grid::new(6, 6).unwrap();
        for &(x, y) in &[(2, 2), (3, 2), (2, 3), (3, 3), (4, 3), (5, 5), (1, 6)] {
            grid.set_value(Position::new(x, y), 1);
        }
        for p in grid.interior() {
            assert_eq!(gases_cell(&grid, p), erosion_cell(&grid, p));
        }
    }
}
