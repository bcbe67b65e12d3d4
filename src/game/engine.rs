use std::fmt;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    apple::Apple,
    config::GameConfig,
    direction::Direction,
    draw::Drawable,
    grid::{Cell, Grid},
    snake::Snake,
    state::{Phase, SimulationState},
};

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The snake moved onto a free cell
    Continued,
    /// The snake moved onto the apple and grew by one segment
    AteApple,
    /// The new head landed on the snake's own body; nothing was moved
    Collided,
    /// The snake ate the last apple that fitted on the board
    BoardFull,
}

/// A position was set up with the apple under the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppleOnSnake(pub Cell);

impl fmt::Display for AppleOnSnake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "apple at ({}, {}) lies on the snake", self.0.x, self.0.y)
    }
}

impl std::error::Error for AppleOnSnake {}

/// Owns the board, the snake and the apple, and advances them one tick at a
/// time.
///
/// The simulation is generic over its random source so tests can drive it
/// with a seeded generator.
pub struct SnakeSimulation<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    state: SimulationState,
}

impl SnakeSimulation<StdRng> {
    /// Create a new simulation from an already validated configuration.
    ///
    /// Apple placement is seeded from `config.seed` when set.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SnakeSimulation<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let start = grid.center();
        let state = SimulationState::new(
            Snake::new(start, Direction::Right, config.colors.snake),
            Apple::new(start, config.colors.apple),
        );

        let mut sim = Self {
            config,
            grid,
            rng,
            state,
        };
        sim.reset();
        sim
    }

    /// Start a new game: a one-cell snake in the middle of the board heading
    /// right, and an apple somewhere else.
    pub fn reset(&mut self) {
        let start = self.grid.center();
        let snake = Snake::new(start, Direction::Right, self.config.colors.snake);
        let mut apple = Apple::new(start, self.config.colors.apple);

        let placed = apple.relocate(&self.grid, &snake.occupied_cells(), &mut self.rng);
        self.state = SimulationState::new(snake, apple);
        if placed.is_err() {
            self.state.phase = Phase::Won;
        }

        info!(
            "new game on {}x{} board, snake at ({}, {}), apple at ({}, {})",
            self.grid.width(),
            self.grid.height(),
            start.x,
            start.y,
            self.state.apple.position().x,
            self.state.apple.position().y
        );
    }

    /// Queue a turn for the next tick. Reversals are ignored.
    pub fn request_direction(&mut self, direction: Direction) {
        if !self.state.snake.request_direction(direction) {
            trace!("ignored reversal to {:?}", direction);
        }
    }

    /// Advance the game by one tick.
    ///
    /// Once the game has ended this does nothing and keeps reporting how it
    /// ended until [`reset`](Self::reset) is called.
    pub fn step(&mut self) -> StepResult {
        match self.state.phase {
            Phase::Running => {}
            Phase::GameOver => return StepResult::Collided,
            Phase::Won => return StepResult::BoardFull,
        }

        let snake = &mut self.state.snake;
        snake.apply_pending_direction();
        let new_head = self.grid.wrap_add(snake.head(), snake.direction());

        // The tail has not moved yet, so it counts as an obstacle
        if snake.occupies(new_head) {
            self.state.phase = Phase::GameOver;
            info!(
                "snake hit itself at ({}, {}) with length {} after {} ticks",
                new_head.x,
                new_head.y,
                snake.len(),
                self.state.ticks
            );
            return StepResult::Collided;
        }

        let ate_apple = new_head == self.state.apple.position();
        if ate_apple {
            snake.grow();
        }
        snake.push_head(new_head);
        self.state.ticks += 1;
        trace!(
            "tick {}: head at ({}, {}), length {}",
            self.state.ticks,
            new_head.x,
            new_head.y,
            snake.len()
        );

        if !ate_apple {
            return StepResult::Continued;
        }

        debug!("apple eaten, length now {}", snake.len());
        let occupied = snake.occupied_cells();
        match self
            .state
            .apple
            .relocate(&self.grid, &occupied, &mut self.rng)
        {
            Ok(_) => StepResult::AteApple,
            Err(err) => {
                self.state.phase = Phase::Won;
                info!("{}: snake fills the board", err);
                StepResult::BoardFull
            }
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Everything the renderer draws, apple first so the snake stays on top
    pub fn drawables(&self) -> [&dyn Drawable; 2] {
        [&self.state.apple, &self.state.snake]
    }

    /// Replace the snake and apple, e.g. to set up a specific position.
    ///
    /// The phase goes back to running and the tick counter is kept. An apple
    /// under the snake is refused and nothing changes.
    pub fn set_position(&mut self, snake: Snake, apple: Apple) -> Result<(), AppleOnSnake> {
        if snake.occupies(apple.position()) {
            return Err(AppleOnSnake(apple.position()));
        }
        self.state.snake = snake;
        self.state.apple = apple;
        self.state.phase = Phase::Running;
        Ok(())
    }
}
