//! Headless game loop: one snake, one bot, random food.
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    snake_bot::SnakeBot,
    snake_error::Result,
    snake_grid::Grid,
    snake_player::{Snake, SnakeStart},
    snake_position::{Direction, Position},
};

/// Default board rows, walls included.
pub const DEFAULT_ROWS: usize = 17;
/// Default board columns, walls included.
pub const DEFAULT_COLS: usize = 19;
/// Default cap on the number of moves in one game.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Explicit start. `None` places a two segment snake at random.
    pub start: Option<SnakeStart>,
    /// Seed for every random draw. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub max_steps: usize,
}

impl GameConfig {
    /// A board of the given size with a random start.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            start: None,
            ..Default::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: Some(SnakeStart::new(
                Direction::Right,
                vec![
                    Position::new(8, 5),
                    Position::new(8, 4),
                    Position::new(8, 3),
                    Position::new(8, 2),
                ],
            )),
            seed: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Dead,
    /// The snake covers the whole board.
    BoardFull,
    StepLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub outcome: GameOutcome,
    pub score: usize,
    pub steps: usize,
    pub length: usize,
}

/// Model of a single player Snake game played by a bot.
#[derive(Debug)]
pub struct SnakeGame<B: SnakeBot> {
    snake: Snake,
    bot: B,
    rng: StdRng,
    score: usize,
    steps: usize,
    max_steps: usize,
    outcome: Option<GameOutcome>,
}

impl<B: SnakeBot> SnakeGame<B> {
    /// Creates a new game with the specified configuration.
    ///
    /// # Errors
    ///
    /// If the board is too small or the explicit start does not fit on it,
    /// a [`crate::models::snake::snake_error::SnakeError`] is returned.
    pub fn new(config: GameConfig, bot: B) -> Result<Self> {
        let grid = Grid::new(config.rows, config.cols)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let snake_rng = StdRng::seed_from_u64(rng.gen());
        let snake = match config.start {
            Some(start) => Snake::new(grid, start, snake_rng)?,
            None => Snake::random(grid, snake_rng),
        };
        let mut game = Self {
            snake,
            bot,
            rng,
            score: 0,
            steps: 0,
            max_steps: config.max_steps,
            outcome: None,
        };
        game.put_random_food();
        Ok(game)
    }

    fn put_random_food(&mut self) {
        if let Some(food) = self.snake.grid_mut().random_food(&mut self.rng) {
            debug!("Food placed at {food}");
        }
    }

    /// Plays one move. Returns the outcome once the game is over.
    pub fn step(&mut self) -> Option<GameOutcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        self.put_random_food();
        let direction = self.bot.next_direction(&mut self.snake);
        let length = self.snake.len();
        self.snake.make_move(direction);
        self.steps += 1;
        if self.snake.len() > length && self.snake.is_alive() {
            self.score += 1;
        }
        self.check_for_game_over();
        self.outcome
    }

    fn check_for_game_over(&mut self) {
        let outcome = if self.snake.is_dead() {
            GameOutcome::Dead
        } else if self.snake.grid().is_full() {
            GameOutcome::BoardFull
        } else if self.steps >= self.max_steps {
            GameOutcome::StepLimit
        } else {
            return;
        };
        info!(
            "{} game over ({outcome:?}) after {} steps with score {}",
            self.bot.name(),
            self.steps,
            self.score
        );
        self.outcome = Some(outcome);
    }

    /// Plays until the game ends.
    pub fn run(&mut self) -> GameSummary {
        loop {
            if let Some(outcome) = self.step() {
                return GameSummary {
                    outcome,
                    score: self.score,
                    steps: self.steps,
                    length: self.snake.len(),
                };
            }
        }
    }

    /// Starts a new game with the same configuration.
    pub fn reset(&mut self) {
        self.snake.reset(true);
        self.score = 0;
        self.steps = 0;
        self.outcome = None;
        self.put_random_food();
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }
}
