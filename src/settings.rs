use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DEFAULT_TICK_INTERVAL_MS, EngineConfig};

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "config.json";

/// Failure to produce runtime settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One layer of optional settings (file contents or CLI overrides).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsLayer {
    pub grid_width: Option<u32>,
    pub grid_height: Option<u32>,
    pub cell_size: Option<u32>,
    pub initial_body_length: Option<u32>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl SettingsLayer {
    /// Returns `self` with every field set in `over` replaced.
    #[must_use]
    pub fn merged(self, over: Self) -> Self {
        Self {
            grid_width: over.grid_width.or(self.grid_width),
            grid_height: over.grid_height.or(self.grid_height),
            cell_size: over.cell_size.or(self.cell_size),
            initial_body_length: over.initial_body_length.or(self.initial_body_length),
            tick_interval_ms: over.tick_interval_ms.or(self.tick_interval_ms),
            seed: over.seed.or(self.seed),
        }
    }
}

/// Validated settings for one run of the binary.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Settings {
    #[serde(flatten)]
    pub engine: EngineConfig,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Settings {
    /// Applies `layer` over the built-in defaults and validates the result.
    pub fn resolve(layer: SettingsLayer) -> Result<Self, SettingsError> {
        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            grid_width: layer.grid_width.unwrap_or(defaults.grid_width),
            grid_height: layer.grid_height.unwrap_or(defaults.grid_height),
            cell_size: layer.cell_size.unwrap_or(defaults.cell_size),
            initial_body_length: layer
                .initial_body_length
                .unwrap_or(defaults.initial_body_length),
        };
        engine.validate()?;

        Ok(Self {
            engine,
            tick_interval_ms: layer.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS),
            seed: layer.seed,
        })
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Returns the platform-correct default settings path.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

/// Loads the file layer.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and an empty layer is returned otherwise.
pub fn load_layer(explicit: Option<&Path>) -> Result<SettingsLayer, SettingsError> {
    if let Some(path) = explicit {
        return load_layer_from_path(path);
    }

    match default_settings_path() {
        Some(path) if path.is_file() => load_layer_from_path(&path),
        _ => Ok(SettingsLayer::default()),
    }
}

fn load_layer_from_path(path: &Path) -> Result<SettingsLayer, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let layer = serde_json::from_str::<SettingsLayer>(&raw).map_err(|source| {
        SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(path = %path.display(), "loaded settings file");
    Ok(layer)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::{ConfigError, EngineConfig};

    use super::{Settings, SettingsError, SettingsLayer, load_layer};

    #[test]
    fn empty_layer_resolves_to_defaults() {
        let settings = Settings::resolve(SettingsLayer::default()).expect("defaults are valid");

        assert_eq!(settings.engine, EngineConfig::default());
        assert_eq!(settings.tick_interval_ms, 100);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn later_layer_wins() {
        let file = SettingsLayer {
            grid_width: Some(400),
            cell_size: Some(20),
            ..SettingsLayer::default()
        };
        let cli = SettingsLayer {
            cell_size: Some(25),
            seed: Some(9),
            ..SettingsLayer::default()
        };

        let merged = file.merged(cli);

        assert_eq!(merged.grid_width, Some(400));
        assert_eq!(merged.cell_size, Some(25));
        assert_eq!(merged.seed, Some(9));
    }

    #[test]
    fn invalid_values_fail_resolution() {
        let layer = SettingsLayer {
            grid_width: Some(710),
            ..SettingsLayer::default()
        };

        let error = Settings::resolve(layer).expect_err("misaligned width");
        assert!(matches!(
            error,
            SettingsError::Config(ConfigError::Misaligned { .. })
        ));
    }

    #[test]
    fn settings_file_is_parsed() {
        let path = unique_test_path("parsed");
        write_test_file(&path, r#"{ "grid_width": 500, "tick_interval_ms": 150 }"#);

        let layer = load_layer(Some(&path)).expect("file should parse");

        assert_eq!(layer.grid_width, Some(500));
        assert_eq!(layer.tick_interval_ms, Some(150));
        assert_eq!(layer.grid_height, None);
        cleanup_test_path(&path);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let path = unique_test_path("unknown");
        write_test_file(&path, r#"{ "snake_color": "green" }"#);

        assert!(matches!(
            load_layer(Some(&path)),
            Err(SettingsError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            load_layer(Some(&path)),
            Err(SettingsError::Read { .. })
        ));
    }

    #[test]
    fn resolved_settings_serialize_flat() {
        let settings = Settings::resolve(SettingsLayer::default()).expect("defaults are valid");

        let json = serde_json::to_value(settings).expect("settings serialize");

        assert_eq!(json["grid_width"], 700);
        assert_eq!(json["cell_size"], 50);
        assert_eq!(json["tick_interval_ms"], 100);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
