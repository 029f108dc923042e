use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Complete state of one game.
///
/// Mutated only through [`GameState::set_direction`] and
/// [`GameState::advance`]; a finished game is replaced by a fresh one rather
/// than reset in place.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub game_over_reason: Option<GameOverReason>,
    config: EngineConfig,
    rng: StdRng,
}

impl GameState {
    /// Starts a new game seeded from system entropy.
    pub fn initialize(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn initialize_with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::starting(&config);
        let size = config.grid_size();
        let food = Food::spawn(&mut rng, &config, &snake).ok_or(ConfigError::GridTooSmall {
            columns: size.columns,
            rows: size.rows,
        })?;

        info!(
            width = config.grid_width,
            height = config.grid_height,
            cell_size = config.cell_size,
            body = config.initial_body_length,
            "game initialized"
        );

        Ok(Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            game_over_reason: None,
            config,
            rng,
        })
    }

    /// Requests the direction for the next tick.
    ///
    /// Reversals and requests on a finished game are ignored. Returns whether
    /// the request took effect.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        let accepted = self.snake.set_direction(requested);
        if !accepted {
            trace!(?requested, current = ?self.snake.direction(), "direction change rejected");
        }
        accepted
    }

    /// Like [`GameState::set_direction`], for input sources that deliver
    /// direction names. Unknown names are ignored.
    pub fn set_direction_named(&mut self, name: &str) -> bool {
        match name.parse::<Direction>() {
            Ok(direction) => self.set_direction(direction),
            Err(error) => {
                debug!(%error, "ignoring direction input");
                false
            }
        }
    }

    /// Advances simulation by one tick. Does nothing once the game is over.
    pub fn advance(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count += 1;
        let head = self.snake.push_head(self.config.cell_size as i32);

        let mut board_filled = false;
        if head == self.food.position {
            self.score += 1;
            debug!(score = self.score, x = head.x, y = head.y, "food eaten");

            match Food::spawn(&mut self.rng, &self.config, &self.snake) {
                Some(food) => self.food = food,
                None => board_filled = true,
            }
        } else {
            self.snake.drop_tail();
        }

        if !head.is_within_bounds(self.config.grid_width, self.config.grid_height) {
            self.finish(GameOverReason::WallCollision);
        } else if self.snake.head_overlaps_body() {
            self.finish(GameOverReason::SelfCollision);
        } else if board_filled {
            self.finish(GameOverReason::BoardFilled);
        }
    }

    /// Returns true once a collision (or a full board) ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Configuration this game was created with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        info!(
            ?reason,
            score = self.score,
            length = self.snake.len(),
            ticks = self.tick_count,
            "game over"
        );
    }
}
