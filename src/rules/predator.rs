//! Predator-Prey: timed entities that wander, hunt and starve.
//!
//! Each generation runs three passes over the current buffers:
//! 1. propose: every predator/prey picks a direction (or none)
//! 2. arbitrate: every cell lets at most one viable proposer in
//! 3. resolve: movers arrive, vacated cells empty, stationary entities age
//!
//! The board is walled: the sentinel ring is an obstacle, not a wrap-around.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Direction, FieldKind, Mode, Position, UNTIMED};
use crate::grid::cell::{CellContent, Slot, EMPTY};
use crate::grid::topology::von_neumann;
use crate::grid::universe::Grid;

/// Neighbor as seen from a proposing cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seen {
    Border,
    Cell(CellContent),
}

fn look(grid: &Grid, pos: Position) -> Seen {
    match grid.slot(pos) {
        Slot::Border => Seen::Border,
        Slot::Interior(v) => {
            Seen::Cell(CellContent::decode(Mode::PredatorPrey, v, grid.lifetime(pos)))
        }
    }
}

fn content(grid: &Grid, pos: Position) -> CellContent {
    CellContent::decode(Mode::PredatorPrey, grid.value(pos), grid.lifetime(pos))
}

fn pick(candidates: &[Direction], rng: &mut ChaCha8Rng) -> Direction {
    candidates.choose(rng).copied().unwrap_or(Direction::None)
}

/// Preliminary direction of one cell
pub fn propose(grid: &Grid, pos: Position, rng: &mut ChaCha8Rng) -> Direction {
    let around = von_neumann(pos).map(|(dir, p)| (dir, look(grid, p)));
    let toward = |wanted: fn(Seen) -> bool| -> Vec<Direction> {
        around
            .iter()
            .filter(|(_, seen)| wanted(*seen))
            .map(|(dir, _)| *dir)
            .collect()
    };

    match content(grid, pos) {
        CellContent::Predator { .. } => {
            let prey = toward(|s| matches!(s, Seen::Cell(CellContent::Prey { .. })));
            if !prey.is_empty() {
                return pick(&prey, rng);
            }
            let open = toward(|s| {
                !matches!(
                    s,
                    Seen::Border
                        | Seen::Cell(CellContent::Predator { .. })
                        | Seen::Cell(CellContent::Food)
                )
            });
            pick(&open, rng)
        }
        CellContent::Prey { .. } => {
            let threatened = around
                .iter()
                .any(|(_, s)| matches!(s, Seen::Cell(CellContent::Predator { .. })));
            if threatened {
                return Direction::None;
            }
            let food = toward(|s| matches!(s, Seen::Cell(CellContent::Food)));
            if !food.is_empty() {
                return pick(&food, rng);
            }
            let open = toward(|s| {
                !matches!(s, Seen::Border | Seen::Cell(CellContent::Prey { .. }))
            });
            pick(&open, rng)
        }
        _ => Direction::None,
    }
}

/// Neighbors whose current direction points at `pos`
pub fn incoming(grid: &Grid, pos: Position) -> Vec<Position> {
    von_neumann(pos)
        .into_iter()
        .filter(|&(slot, p)| {
            Direction::from_code(grid.direction(p)).is_some_and(|d| d == slot.opposite())
        })
        .map(|(_, p)| p)
        .collect()
}

/// Pass 1: write a preliminary direction for every interior cell
pub fn propose_directions(grid: &mut Grid, rng: &mut ChaCha8Rng) {
    let cells: Vec<Position> = grid.interior().collect();
    for pos in cells {
        let dir = propose(grid, pos, rng);
        grid.set_direction(pos, dir.code());
    }
}

/// Pass 2: cancel proposals until every cell has at most one incoming mover.
///
/// A proposer is viable if its lifetime is positive. With no viable proposer
/// all are cancelled; with several one viable proposer is kept uniformly at
/// random. Returns the number of cancelled proposals.
pub fn arbitrate(grid: &mut Grid, rng: &mut ChaCha8Rng) -> usize {
    let mut cancelled = 0;
    let cells: Vec<Position> = grid.interior().collect();
    for pos in cells {
        let movers = incoming(grid, pos);
        if movers.is_empty() {
            continue;
        }

        let viable: Vec<Position> = movers
            .iter()
            .copied()
            .filter(|&p| grid.lifetime(p) > 0)
            .collect();
        let keeper = viable.choose(rng).copied();

        for p in movers {
            if Some(p) != keeper {
                grid.set_direction(p, Direction::None.code());
                cancelled += 1;
            }
        }
    }
    cancelled
}

/// Pass 3: compute next value and lifetime of every interior cell.
///
/// Panics if a cell still has more than one incoming mover.
pub fn resolve_moves(grid: &mut Grid, initial_lifetime: i32) {
    let cells: Vec<Position> = grid.interior().collect();
    for pos in cells {
        let value = grid.value(pos);
        let lifetime = grid.lifetime(pos);
        let movers = incoming(grid, pos);

        let (next_value, next_lifetime) = match movers.as_slice() {
            [] if grid.direction(pos) != Direction::None.code() => (EMPTY, UNTIMED),
            [] if lifetime == UNTIMED => (value, UNTIMED),
            [] if lifetime > 0 => (value, lifetime - 1),
            [] => (EMPTY, UNTIMED),
            [mover] => {
                let devoured = matches!(
                    content(grid, pos),
                    CellContent::Prey { .. } | CellContent::Food
                );
                let arriving = if devoured {
                    initial_lifetime
                } else {
                    grid.lifetime(*mover) - 1
                };
                (grid.value(*mover), arriving)
            }
            many => panic!(
                "{} movers aimed at {} after arbitration",
                many.len(),
                pos
            ),
        };

        grid.set_next(FieldKind::Value, pos, next_value);
        grid.set_next(FieldKind::Lifetime, pos, next_lifetime);
    }
}

/// Advance the universe by one generation
pub fn step(grid: &mut Grid, initial_lifetime: i32, rng: &mut ChaCha8Rng) {
    propose_directions(grid, rng);
    let cancelled = arbitrate(grid, rng);
    resolve_moves(grid, initial_lifetime);
    grid.commit_living();

    tracing::debug!(
        "predator-prey: {} proposals cancelled, stalled={}",
        cancelled,
        grid.is_stalled()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::cell::{FOOD, PREDATOR, PREY};
    use rand::SeedableRng;

    fn place(grid: &mut Grid, x: i32, y: i32, value: i32, lifetime: i32) {
        let p = Position::new(x, y);
        grid.set_value(p, value);
        grid.set_lifetime(p, lifetime);
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn test_predator_goes_for_the_only_prey() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, 3, 3, PREDATOR, 10);
        place(&mut grid, 4, 3, PREY, 10);
        assert_eq!(propose(&grid, Position::new(3, 3), &mut rng()), Direction::Right);
    }

    #[test]
    fn test_boxed_in_predator_stays() {
        let mut grid = Grid::new(3, 3).unwrap();
        place(&mut grid, 1, 1, PREDATOR, 10);
        place(&mut grid, 2, 1, FOOD, UNTIMED);
        place(&mut grid, 1, 2, PREDATOR, 10);
        assert_eq!(propose(&grid, Position::new(1, 1), &mut rng()), Direction::None);
    }

    #[test]
    fn test_prey_freezes_next_to_predator() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, 3, 3, PREY, 10);
        place(&mut grid, 3, 2, PREDATOR, 10);
        place(&mut grid, 4, 3, FOOD, UNTIMED);
        assert_eq!(propose(&grid, Position::new(3, 3), &mut rng()), Direction::None);
    }

    #[test]
    fn test_prey_seeks_food() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, 3, 3, PREY, 10);
        place(&mut grid, 3, 4, FOOD, UNTIMED);
        assert_eq!(propose(&grid, Position::new(3, 3), &mut rng()), Direction::Down);
    }

    #[test]
    fn test_prey_wanders_into_open_cells_only() {
        let mut grid = Grid::new(3, 3).unwrap();
        // Corner prey with a prey neighbor: only one open side
        place(&mut grid, 1, 1, PREY, 10);
        place(&mut grid, 2, 1, PREY, 10);
        let mut r = rng();
        for _ in 0..20 {
            assert_eq!(propose(&grid, Position::new(1, 1), &mut r), Direction::Down);
        }
    }

    #[test]
    fn test_food_and_empty_never_move() {
        let mut grid = Grid::new(3, 3).unwrap();
        place(&mut grid, 2, 2, FOOD, UNTIMED);
        assert_eq!(propose(&grid, Position::new(2, 2), &mut rng()), Direction::None);
        assert_eq!(propose(&grid, Position::new(1, 1), &mut rng()), Direction::None);
    }

    #[test]
    fn test_non_viable_mover_is_cancelled() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, 2, 3, PREY, 0);
        grid.set_direction(Position::new(2, 3), Direction::Right.code());

        arbitrate(&mut grid, &mut rng());
        assert_eq!(grid.direction(Position::new(2, 3)), 0);
    }

    #[test]
    fn test_viable_mover_beats_non_viable() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, 2, 3, PREY, 0);
        place(&mut grid, 4, 3, PREY, 5);
        grid.set_direction(Position::new(2, 3), Direction::Right.code());
        grid.set_direction(Position::new(4, 3), Direction::Left.code());

        assert_eq!(arbitrate(&mut grid, &mut rng()), 1);
        assert_eq!(grid.direction(Position::new(2, 3)), 0);
        assert_eq!(grid.direction(Position::new(4, 3)), Direction::Left.code());
        assert_eq!(incoming(&grid, Position::new(3, 3)), vec![Position::new(4, 3)]);
    }

    #[test]
    fn test_contest_keeps_exactly_one() {
        let target = Position::new(3, 3);
        for seed in 0..32 {
            let mut grid = Grid::new(5, 5).unwrap();
            for (dir, p) in von_neumann(target) {
                place(&mut grid, p.x, p.y, PREY, 7);
                grid.set_direction(p, dir.opposite().code());
            }
            assert_eq!(incoming(&grid, target).len(), 4);

            let mut r = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(arbitrate(&mut grid, &mut r), 3);
            assert_eq!(incoming(&grid, target).len(), 1);
        }
    }

    #[test]
    fn test_stationary_entity_ages_then_dies() {
        let mut grid = Grid::new(3, 3).unwrap();
        // Predator walled in by food never moves
        place(&mut grid, 1, 1, PREDATOR, 1);
        place(&mut grid, 2, 1, FOOD, UNTIMED);
        place(&mut grid, 1, 2, FOOD, UNTIMED);
        let mut r = rng();

        step(&mut grid, 50, &mut r);
        assert_eq!(grid.lifetime(Position::new(1, 1)), 0);
        assert_eq!(grid.value(Position::new(1, 1)), PREDATOR);
        assert!(!grid.is_stalled());

        step(&mut grid, 50, &mut r);
        assert_eq!(grid.value(Position::new(1, 1)), EMPTY);
        assert_eq!(grid.lifetime(Position::new(1, 1)), UNTIMED);
        assert!(grid.is_stalled());
    }

    #[test]
    fn test_devouring_resets_lifetime() {
        let mut grid = Grid::new(3, 3).unwrap();
        place(&mut grid, 1, 1, PREDATOR, 4);
        place(&mut grid, 2, 1, PREY, 9);
        // Prey freezes next to the predator, which takes it
        step(&mut grid, 42, &mut rng());

        assert_eq!(grid.value(Position::new(2, 1)), PREDATOR);
        assert_eq!(grid.lifetime(Position::new(2, 1)), 42);
        assert_eq!(grid.value(Position::new(1, 1)), EMPTY);
        assert_eq!(grid.lifetime(Position::new(1, 1)), UNTIMED);
    }

    #[test]
    fn test_travel_costs_one_lifetime() {
        let mut grid = Grid::new(3, 3).unwrap();
        place(&mut grid, 2, 2, PREY, 6);
        step(&mut grid, 42, &mut rng());

        let prey: Vec<Position> = grid.interior().filter(|&p| grid.value(p) == PREY).collect();
        assert_eq!(prey.len(), 1);
        assert_ne!(prey[0], Position::new(2, 2));
        assert_eq!(grid.lifetime(prey[0]), 5);
    }

    #[test]
    #[should_panic(expected = "after arbitration")]
    fn test_double_mover_is_fatal() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, 2, 3, PREY, 5);
        place(&mut grid, 4, 3, PREY, 5);
        grid.set_direction(Position::new(2, 3), Direction::Right.code());
        grid.set_direction(Position::new(4, 3), Direction::Left.code());
        resolve_moves(&mut grid, 50);
    }
}
