use tracing::{error, info};

use crate::config::{ConfigError, EngineConfig};
use crate::game::GameState;
use crate::input::GameInput;

/// Where the player is in the start / play / retry flow.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Start screen; the first game is set up but not ticking.
    Ready,
    Playing,
    Paused,
    /// The last game ended; waiting for a retry answer.
    GameOverPrompt,
    Quit,
}

/// Host-side driver around one [`GameState`] at a time.
///
/// Serializes input events and ticks onto the engine and replaces the game
/// with a fresh one when the player retries.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    state: GameState,
    phase: Phase,
    games_started: u64,
    seed: Option<u64>,
}

impl Session {
    /// Creates a session whose games are seeded from system entropy.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let state = GameState::initialize(config)?;
        Ok(Self::from_state(config, state, None))
    }

    /// Creates a session whose `n`-th game uses seed `seed + n`.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        let state = GameState::initialize_with_seed(config, seed)?;
        Ok(Self::from_state(config, state, Some(seed)))
    }

    fn from_state(config: EngineConfig, state: GameState, seed: Option<u64>) -> Self {
        Self {
            config,
            state,
            phase: Phase::Ready,
            games_started: 1,
            seed,
        }
    }

    /// Applies one input event. Returns the new phase when it changed.
    pub fn handle_input(&mut self, input: GameInput) -> Option<Phase> {
        let previous = self.phase;

        match (self.phase, input) {
            (_, GameInput::Quit) => self.phase = Phase::Quit,
            (Phase::Ready, GameInput::Confirm) => self.phase = Phase::Playing,
            (Phase::Ready, GameInput::Direction(direction)) => {
                self.state.set_direction(direction);
                self.phase = Phase::Playing;
            }
            (Phase::Playing, GameInput::Direction(direction)) => {
                self.state.set_direction(direction);
            }
            (Phase::Playing, GameInput::Pause) => self.phase = Phase::Paused,
            (Phase::Paused, GameInput::Pause | GameInput::Confirm) => self.phase = Phase::Playing,
            (Phase::GameOverPrompt, GameInput::Confirm) => self.retry(),
            (Phase::GameOverPrompt, GameInput::Decline) => {
                info!(score = self.state.score, "player declined retry");
                self.phase = Phase::Quit;
            }
            _ => {}
        }

        (self.phase != previous).then_some(self.phase)
    }

    /// Runs one simulation step while playing. Returns the new phase when
    /// the step ended the game.
    pub fn tick(&mut self) -> Option<Phase> {
        if self.phase != Phase::Playing {
            return None;
        }

        self.state.advance();
        if self.state.is_game_over() {
            self.phase = Phase::GameOverPrompt;
            return Some(self.phase);
        }

        None
    }

    fn retry(&mut self) {
        let fresh = match self.seed {
            Some(seed) => GameState::initialize_with_seed(
                self.config,
                seed.wrapping_add(self.games_started),
            ),
            None => GameState::initialize(self.config),
        };

        match fresh {
            Ok(state) => {
                self.state = state;
                self.games_started += 1;
                self.phase = Phase::Playing;
                info!(game = self.games_started, "retrying");
            }
            // Unreachable in practice: the first game validated this config.
            Err(error) => {
                error!(%error, "could not start a new game");
                self.phase = Phase::Quit;
            }
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.phase == Phase::Quit
    }

    /// Number of games started in this session, including the current one.
    #[must_use]
    pub fn games_started(&self) -> u64 {
        self.games_started
    }
}
