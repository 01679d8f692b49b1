//! Snake: a single player-steered snake on a walled board.
//!
//! - the head is `SNAKE_HEAD`, a body segment `age` generations old is
//!   `SNAKE_HEAD + age`, and the tail is the segment with `age == length - 1`
//! - one food item is on the board at a time
//! - hitting the border or any segment ends the session

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{AutomatonError, Result};
use crate::core::types::{Direction, FieldKind, Mode, Position};
use crate::grid::cell::{CellContent, Slot, EMPTY, FOOD, SNAKE_HEAD};
use crate::grid::universe::Grid;

/// Initial snake length
pub const INITIAL_LENGTH: i32 = 3;

/// What the snake does in the coming generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnakeAction {
    #[default]
    Move,
    MoveAndFeed,
    MoveAndDie,
}

impl SnakeAction {
    pub fn code(self) -> i32 {
        match self {
            SnakeAction::Move => 0,
            SnakeAction::MoveAndFeed => 1,
            SnakeAction::MoveAndDie => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SnakeAction::Move),
            1 => Some(SnakeAction::MoveAndFeed),
            2 => Some(SnakeAction::MoveAndDie),
            _ => None,
        }
    }
}

/// Direction of the last move and of the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub past: Direction,
    pub future: Direction,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            past: Direction::Up,
            future: Direction::Up,
        }
    }
}

/// Session scalars of a snake game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeState {
    pub length: i32,
    pub action: SnakeAction,
    pub head: Position,
    /// `None` once the board has no room left for food
    pub food: Option<Position>,
    pub heading: Heading,
}

impl SnakeState {
    /// Accept a steering input unless it reverses the last move.
    ///
    /// Returns false if the input was ignored.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == Direction::None || dir.is_opposite_of(self.heading.past) {
            tracing::warn!(
                "Ignoring steer {:?} against past direction {:?}",
                dir,
                self.heading.past
            );
            return false;
        }
        self.heading.future = dir;
        true
    }
}

/// Put a three-segment vertical snake in the center column, lower third,
/// heading up
pub fn place_initial(grid: &mut Grid, state: &mut SnakeState) -> Result<()> {
    let head = Position::new(grid.width() / 2, 2 * grid.height() / 3);
    let tail = Position::new(head.x, head.y + INITIAL_LENGTH - 1);
    if !grid.is_interior(head) || !grid.is_interior(tail) {
        return Err(AutomatonError::NoSpaceForSnake);
    }

    for age in 0..INITIAL_LENGTH {
        grid.set_value(Position::new(head.x, head.y + age), SNAKE_HEAD + age);
    }

    state.length = INITIAL_LENGTH;
    state.action = SnakeAction::Move;
    state.head = head;
    state.heading = Heading::default();
    Ok(())
}

/// Drop one food item on a uniformly chosen empty cell.
///
/// Returns `None` if the board is full.
pub fn place_food(
    grid: &mut Grid,
    state: &mut SnakeState,
    rng: &mut ChaCha8Rng,
) -> Option<Position> {
    let spot = grid.empty_cells().choose(rng).copied();
    if let Some(pos) = spot {
        grid.set_value(pos, FOOD);
    }
    state.food = spot;
    spot
}

/// Rebuild session scalars from a board that already holds a snake.
///
/// Returns `None` if no head is on the board.
pub fn survey(grid: &Grid, heading: Heading) -> Option<SnakeState> {
    let mut head = None;
    let mut food = None;
    let mut length = 0;

    for pos in grid.interior() {
        match CellContent::decode(Mode::Snake, grid.value(pos), 0) {
            CellContent::SnakeHead => {
                head.get_or_insert(pos);
                length = length.max(1);
            }
            CellContent::SnakeBody { age } => length = length.max(age + 1),
            CellContent::Food => {
                food.get_or_insert(pos);
            }
            _ => {}
        }
    }

    Some(SnakeState {
        length,
        action: SnakeAction::Move,
        head: head?,
        food,
        heading,
    })
}

/// Decide the next action from the cell straight ahead of the head
pub fn calc_action(grid: &Grid, state: &SnakeState) -> SnakeAction {
    let ahead = state.head.offset(state.heading.future);
    match grid.slot(ahead) {
        Slot::Border => SnakeAction::MoveAndDie,
        Slot::Interior(v) => match CellContent::decode(Mode::Snake, v, 0) {
            CellContent::Food => SnakeAction::MoveAndFeed,
            c if c.is_snake() => SnakeAction::MoveAndDie,
            _ => SnakeAction::Move,
        },
    }
}

/// Advance the snake by one generation
pub fn step(grid: &mut Grid, state: &mut SnakeState, rng: &mut ChaCha8Rng) -> SnakeAction {
    let action = calc_action(grid, state);
    state.action = action;

    tracing::debug!(
        "snake head {} action {:?} past {:?} future {:?} length {}",
        state.head,
        action,
        state.heading.past,
        state.heading.future,
        state.length
    );

    match action {
        SnakeAction::MoveAndDie => {
            grid.set_stalled(true);
        }
        SnakeAction::Move | SnakeAction::MoveAndFeed => {
            let grows = action == SnakeAction::MoveAndFeed;
            shift_segments(grid, state, grows);

            if grows {
                state.length += 1;
                if place_food(grid, state, rng).is_none() {
                    tracing::info!("Snake fills the board at length {}", state.length);
                    grid.set_stalled(true);
                }
            }
        }
    }

    action
}

/// Age every segment by one and write a new head ahead of the old one. The
/// tail is cleared unless the snake grows.
fn shift_segments(grid: &mut Grid, state: &mut SnakeState, grows: bool) {
    let tail_age = state.length - 1;
    grid.stage(&[FieldKind::Value]);

    let cells: Vec<Position> = grid.interior().collect();
    for pos in cells {
        let next = match CellContent::decode(Mode::Snake, grid.value(pos), 0) {
            CellContent::SnakeHead => SNAKE_HEAD + 1,
            CellContent::SnakeBody { age } if grows || age < tail_age => SNAKE_HEAD + age + 1,
            CellContent::SnakeBody { .. } => EMPTY,
            _ => continue,
        };
        grid.set_next(FieldKind::Value, pos, next);
    }

    let target = state.head.offset(state.heading.future);
    grid.set_next(FieldKind::Value, target, SNAKE_HEAD);
    grid.commit_generation(&[FieldKind::Value]);
    grid.set_stalled(false);

    state.head = target;
    state.heading.past = state.heading.future;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn setup(width: i32, height: i32) -> (Grid, SnakeState, ChaCha8Rng) {
        let mut grid = Grid::new(width, height).unwrap();
        let mut state = SnakeState::default();
        place_initial(&mut grid, &mut state).unwrap();
        (grid, state, ChaCha8Rng::seed_from_u64(3))
    }

    #[test]
    fn test_initial_placement() {
        let (grid, state, _) = setup(10, 9);
        assert_eq!(state.head, Position::new(5, 6));
        assert_eq!(grid.value(Position::new(5, 6)), 10);
        assert_eq!(grid.value(Position::new(5, 7)), 11);
        assert_eq!(grid.value(Position::new(5, 8)), 12);
        assert_eq!(state.length, 3);
        assert_eq!(state.heading.future, Direction::Up);
    }

    #[test]
    fn test_initial_placement_needs_room() {
        let mut grid = Grid::new(5, 3).unwrap();
        let mut state = SnakeState::default();
        assert!(matches!(
            place_initial(&mut grid, &mut state),
            Err(AutomatonError::NoSpaceForSnake)
        ));
    }

    #[test]
    fn test_move_shifts_body_and_clears_tail() {
        let (mut grid, mut state, mut rng) = setup(10, 9);
        assert_eq!(step(&mut grid, &mut state, &mut rng), SnakeAction::Move);

        assert_eq!(state.head, Position::new(5, 5));
        assert_eq!(grid.value(Position::new(5, 5)), 10);
        assert_eq!(grid.value(Position::new(5, 6)), 11);
        assert_eq!(grid.value(Position::new(5, 7)), 12);
        assert_eq!(grid.value(Position::new(5, 8)), 0);
        assert!(!grid.is_stalled());
    }

    #[test]
    fn test_reversal_is_ignored() {
        let (_, mut state, _) = setup(10, 9);
        assert!(!state.steer(Direction::Down));
        assert_eq!(state.heading.future, Direction::Up);

        assert!(state.steer(Direction::Left));
        // Still measured against the past direction, not the pending one
        assert!(!state.steer(Direction::Down));
        assert_eq!(state.heading.future, Direction::Left);
        assert!(state.steer(Direction::Right));
    }

    #[test]
    fn test_wall_kills() {
        let (mut grid, mut state, mut rng) = setup(10, 9);
        for _ in 0..5 {
            assert_eq!(step(&mut grid, &mut state, &mut rng), SnakeAction::Move);
        }
        assert_eq!(state.head, Position::new(5, 1));

        let before: Vec<i32> = grid.interior().map(|p| grid.value(p)).collect();
        assert_eq!(step(&mut grid, &mut state, &mut rng), SnakeAction::MoveAndDie);
        let after: Vec<i32> = grid.interior().map(|p| grid.value(p)).collect();
        assert_eq!(before, after);
        assert!(grid.is_stalled());
    }

    #[test]
    fn test_survey_recovers_state() {
        let (mut grid, mut state, mut rng) = setup(10, 9);
        place_food(&mut grid, &mut state, &mut rng);
        step(&mut grid, &mut state, &mut rng);

        let found = survey(&grid, state.heading).unwrap();
        assert_eq!(found.head, state.head);
        assert_eq!(found.length, state.length);
        assert_eq!(found.food, state.food);
        assert!(survey(&Grid::new(4, 4).unwrap(), Heading::default()).is_none());
    }

    #[test]
    fn test_action_codes() {
        for action in [SnakeAction::Move, SnakeAction::MoveAndFeed, SnakeAction::MoveAndDie] {
            assert_eq!(SnakeAction::from_code(action.code()), Some(action));
        }
        assert_eq!(SnakeAction::from_code(3), None);
    }
}
