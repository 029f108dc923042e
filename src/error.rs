use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::settings::SettingsError;

/// Top-level failure of the `grid-snake` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to set up logging: {0}")]
    Logging(String),
}
