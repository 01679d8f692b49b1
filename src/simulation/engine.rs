//! The automaton session: one grid, one active mode, one random source.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::codec::glyphs;
use crate::core::config::{validate_dimensions, AutomatonConfig, PREDATOR_LIFETIME_RANGE};
use crate::core::error::{AutomatonError, Result};
use crate::core::types::{Direction, FieldKind, Generation, Mode, Position, BORDER, UNTIMED};
use crate::grid::cell::{CellContent, ALIVE, FOOD, SNAKE_HEAD};
use crate::grid::universe::Grid;
use crate::rules::{life, modeling, predator, snake};
use crate::rules::snake::{Heading, SnakeState};
use crate::simulation::editing::Brush;

/// A running cellular-automaton session
#[derive(Debug, Clone)]
pub struct Automaton {
    config: AutomatonConfig,
    grid: Grid,
    mode: Mode,
    snake: SnakeState,
    predator_lifetime: i32,
    pub(crate) brush: Brush,
    seed: u64,
    rng: ChaCha8Rng,
    generation: Generation,
}

impl Automaton {
    /// Validate `config`, allocate the universe and prepare the board for
    /// the configured mode
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let grid = Grid::new(config.width, config.height)?;

        let mut automaton = Self {
            mode: config.mode,
            predator_lifetime: config.predator_lifetime,
            config,
            grid,
            snake: SnakeState::default(),
            brush: Brush::default(),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            generation: 0,
        };
        automaton.clear()?;

        tracing::info!(
            "Automaton ready: {} on {}x{} (seed {})",
            automaton.mode,
            automaton.width(),
            automaton.height(),
            seed
        );
        Ok(automaton)
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generations advanced since the last clear
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    // === LIFECYCLE ===

    /// Reallocate the universe at a new size and clear it
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        validate_dimensions(width, height, self.config.max_dimension)?;
        self.config.width = width;
        self.config.height = height;
        self.clear()?;
        tracing::info!("Resized universe to {}x{}", width, height);
        Ok(())
    }

    /// Switch rule-set. Changing to a different mode clears the board.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }
        tracing::info!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.config.mode = mode;
        self.clear()
    }

    /// Reset every cell to its default and set up the mode's starting board
    pub fn clear(&mut self) -> Result<()> {
        self.grid.resize(self.config.width, self.config.height)?;
        self.generation = 0;
        self.snake = SnakeState::default();

        match self.mode {
            Mode::Snake => {
                snake::place_initial(&mut self.grid, &mut self.snake)?;
                snake::place_food(&mut self.grid, &mut self.snake, &mut self.rng);
            }
            Mode::Noise | Mode::Erosion | Mode::Fluids | Mode::Gases
                if self.config.seed_noise_on_clear =>
            {
                self.seed_random_noise()?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Draw `k` uniformly from `0..=area` and set `k` random cells alive.
    /// Cells may be drawn more than once. Returns `k`.
    pub fn seed_random_noise(&mut self) -> Result<usize> {
        self.require_binary()?;
        let draws = self.rng.gen_range(0..=self.grid.area());
        for _ in 0..draws {
            let pos = Position::new(
                self.rng.gen_range(1..=self.width()),
                self.rng.gen_range(1..=self.height()),
            );
            self.grid.set_value(pos, ALIVE);
        }
        tracing::debug!("Seeded {} noise draws", draws);
        Ok(draws)
    }

    /// Set each cell alive independently with probability `density`
    pub fn fill_random(&mut self, density: f64) -> Result<usize> {
        self.require_binary()?;
        if !(0.0..=1.0).contains(&density) {
            return Err(AutomatonError::InvalidConfig(format!(
                "density ({}) must be within 0..=1",
                density
            )));
        }

        let cells: Vec<Position> = self.grid.interior().collect();
        let mut alive = 0;
        for pos in cells {
            if self.rng.gen_bool(density) {
                self.grid.set_value(pos, ALIVE);
                alive += 1;
            }
        }
        Ok(alive)
    }

    /// Put `count` items of `content` on distinct random empty cells.
    ///
    /// Predator-Prey boards only. Predators and prey get the configured
    /// lifetime. Returns how many were placed, fewer than `count` when the
    /// board runs out of room.
    pub fn scatter(&mut self, content: CellContent, count: usize) -> Result<usize> {
        if self.mode != Mode::PredatorPrey {
            return Err(AutomatonError::UnsupportedMode(self.mode));
        }

        let lifetime = self.predator_lifetime;
        let (value, lifetime) = match content {
            CellContent::Predator { .. } => CellContent::Predator { lifetime },
            CellContent::Prey { .. } => CellContent::Prey { lifetime },
            other => other,
        }
        .encode();

        let empty = self.grid.empty_cells();
        let spots: Vec<Position> = empty.choose_multiple(&mut self.rng, count).copied().collect();
        for &pos in &spots {
            self.grid.set_value(pos, value);
            self.grid.set_lifetime(pos, lifetime);
        }
        Ok(spots.len())
    }

    fn require_binary(&self) -> Result<()> {
        if self.mode.is_binary() {
            Ok(())
        } else {
            Err(AutomatonError::UnsupportedMode(self.mode))
        }
    }

    // === FIELDS ===

    /// Current value of a field at any coordinate in the padded range.
    ///
    /// Panics outside `[0, N+1]` on either axis.
    pub fn get_field(&self, kind: FieldKind, x: i32, y: i32) -> i32 {
        self.grid.get(kind, Position::new(x, y))
    }

    /// Overwrite a field of an interior cell
    pub fn set_field(&mut self, kind: FieldKind, x: i32, y: i32, value: i32) -> Result<()> {
        let pos = self.interior_position(x, y)?;
        if value == BORDER {
            return Err(AutomatonError::UnrepresentableValue { kind, value });
        }
        self.grid.set(kind, pos, value);
        Ok(())
    }

    pub(crate) fn interior_position(&self, x: i32, y: i32) -> Result<Position> {
        let pos = Position::new(x, y);
        if self.grid.is_interior(pos) {
            Ok(pos)
        } else {
            Err(AutomatonError::OutOfBounds { x, y })
        }
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Replace the board from glyph grids in the active mode's alphabet.
    ///
    /// In Predator-Prey mode, missing lifetimes default to the configured
    /// lifetime for predators and prey. In Snake mode the session scalars
    /// are rebuilt from the board.
    pub fn load_glyphs(&mut self, values: &str, lifetimes: Option<&str>) -> Result<()> {
        let mut grid = Grid::new(self.width(), self.height())?;
        glyphs::decode_values(&mut grid, self.mode, values)?;

        match self.mode {
            Mode::PredatorPrey => match lifetimes {
                Some(text) => glyphs::decode_lifetimes(&mut grid, text)?,
                None => {
                    let cells: Vec<Position> = grid.interior().collect();
                    for pos in cells {
                        let lifetime = match CellContent::decode(self.mode, grid.value(pos), 0) {
                            CellContent::Predator { .. } | CellContent::Prey { .. } => {
                                self.predator_lifetime
                            }
                            _ => UNTIMED,
                        };
                        grid.set_lifetime(pos, lifetime);
                    }
                }
            },
            Mode::Snake => {
                self.snake = snake::survey(&grid, self.snake.heading).ok_or_else(|| {
                    AutomatonError::InvalidConfig("glyph grid holds no snake head".to_string())
                })?;
            }
            _ => {}
        }

        self.grid = grid;
        self.generation = 0;
        Ok(())
    }

    // === EVOLUTION ===

    /// Run one generation of the active mode's rule-set
    pub fn advance_generation(&mut self) {
        match self.mode {
            Mode::Life => life::step(&mut self.grid),
            Mode::Snake => {
                snake::step(&mut self.grid, &mut self.snake, &mut self.rng);
            }
            Mode::PredatorPrey => {
                predator::step(&mut self.grid, self.predator_lifetime, &mut self.rng)
            }
            Mode::Noise => modeling::step_noise(&mut self.grid),
            Mode::Erosion => modeling::step_erosion(&mut self.grid),
            Mode::Fluids => modeling::step_fluids(&mut self.grid),
            Mode::Gases => modeling::step_gases(&mut self.grid),
        }
        self.generation += 1;

        tracing::debug!(
            "{} generation {} stalled={}",
            self.mode,
            self.generation,
            self.grid.is_stalled()
        );
    }

    /// True iff the last generation changed nothing (or ended the game)
    pub fn is_stalled(&self) -> bool {
        self.grid.is_stalled()
    }

    /// Number of non-empty interior cells
    pub fn population(&self) -> usize {
        self.grid.count_values(|v| v != 0)
    }

    // === SNAKE ===

    /// Queue a steering input for the next generation.
    ///
    /// Returns false if the input was rejected.
    pub fn set_intended_direction(&mut self, dir: Direction) -> bool {
        if self.mode != Mode::Snake {
            tracing::warn!("Ignoring steer {:?} outside snake mode", dir);
            return false;
        }
        self.snake.steer(dir)
    }

    pub fn snake_state(&self) -> &SnakeState {
        &self.snake
    }

    /// Restore snake scalars saved alongside a board.
    ///
    /// The state must agree with the board: the head on a `SNAKE_HEAD`
    /// cell, the food (if any) on a `FOOD` cell.
    pub fn restore_snake_state(&mut self, state: SnakeState) -> Result<()> {
        self.require_snake()?;
        if state.length < 1 {
            return Err(AutomatonError::InvalidConfig(format!(
                "snake length ({}) must be at least 1",
                state.length
            )));
        }
        self.require_cell(state.head, SNAKE_HEAD, "snake head")?;
        if let Some(food) = state.food {
            self.require_cell(food, FOOD, "food")?;
        }
        check_heading(state.heading)?;

        self.snake = state;
        Ok(())
    }

    /// Restore snake scalars from the JSON written by [`Self::snake_state_json`]
    pub fn restore_snake_json(&mut self, json: &str) -> Result<()> {
        let state: SnakeState = serde_json::from_str(json)?;
        self.restore_snake_state(state)
    }

    pub fn snake_state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snake)?)
    }

    pub fn set_snake_heading(&mut self, heading: Heading) -> Result<()> {
        self.require_snake()?;
        check_heading(heading)?;
        self.snake.heading = heading;
        Ok(())
    }

    fn require_snake(&self) -> Result<()> {
        if self.mode == Mode::Snake {
            Ok(())
        } else {
            Err(AutomatonError::UnsupportedMode(self.mode))
        }
    }

    fn require_cell(&self, pos: Position, value: i32, what: &str) -> Result<()> {
        if self.grid.is_interior(pos) && self.grid.value(pos) == value {
            Ok(())
        } else {
            Err(AutomatonError::InvalidConfig(format!(
                "{} at {} does not match the board",
                what, pos
            )))
        }
    }

    // === PREDATOR-PREY ===

    pub fn predator_lifetime(&self) -> i32 {
        self.predator_lifetime
    }

    /// Lifetime given to new and freshly fed predators and prey
    pub fn set_predator_lifetime(&mut self, lifetime: i32) -> Result<()> {
        if !PREDATOR_LIFETIME_RANGE.contains(&lifetime) {
            return Err(AutomatonError::InvalidConfig(format!(
                "predator lifetime ({}) must be within {}..={}",
                lifetime,
                PREDATOR_LIFETIME_RANGE.start(),
                PREDATOR_LIFETIME_RANGE.end()
            )));
        }
        self.predator_lifetime = lifetime;
        self.config.predator_lifetime = lifetime;
        Ok(())
    }
}

fn check_heading(heading: Heading) -> Result<()> {
    let Heading { past, future } = heading;
    if past == Direction::None || future == Direction::None || future.is_opposite_of(past) {
        return Err(AutomatonError::InvalidConfig(format!(
            "snake heading {:?} -> {:?} is not a legal move",
            past, future
        )));
    }
    Ok(())
}
