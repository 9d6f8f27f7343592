use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::Board;
use crate::food::Food;
use crate::grid::Cell;
use crate::input::{Direction, GameInput};
use crate::snake::{MoveOutcome, Snake};

/// Whether the main loop should keep going.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    Running,
    Quit,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickReport {
    pub movement: MoveOutcome,
    pub ate: bool,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct Game {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    board: Board,
    rng: StdRng,
}

impl Game {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::with_rng(board, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(board: Board, seed: u64) -> Self {
        Self::with_rng(board, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Board, mut rng: StdRng) -> Self {
        let snake = Snake::new(board.center(), Direction::Right);
        let food = Food::spawn(&mut rng, board, &occupied_set(&snake));

        Self {
            snake,
            food,
            tick_count: 0,
            board,
            rng,
        }
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) -> RunState {
        match input {
            GameInput::Direction(direction) => {
                self.snake.set_pending_direction(direction);
                RunState::Running
            }
            GameInput::Quit => RunState::Quit,
        }
    }

    /// Applies a batch of inputs in arrival order, stopping at the first quit.
    pub fn apply_inputs(&mut self, inputs: impl IntoIterator<Item = GameInput>) -> RunState {
        for input in inputs {
            if self.apply_input(input) == RunState::Quit {
                return RunState::Quit;
            }
        }
        RunState::Running
    }

    /// Advances simulation by one tick: move, then check the food.
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;

        let movement = self.snake.advance(self.board, &mut self.rng);
        if movement == MoveOutcome::Reset {
            info!(tick = self.tick_count, "snake hit itself, resetting");
        }

        let ate = self.snake.occupies(self.food.position);
        if ate {
            self.snake.grow();
            let excluded = occupied_set(&self.snake);
            while self.snake.occupies(self.food.position) {
                self.food
                    .randomize_position(&mut self.rng, self.board, &excluded);
            }
            debug!(
                length = self.snake.length(),
                food = ?self.food.position,
                "food eaten"
            );
        }

        TickReport { movement, ate }
    }
}

fn occupied_set(snake: &Snake) -> HashSet<Cell> {
    snake.occupied_cells().collect()
}
