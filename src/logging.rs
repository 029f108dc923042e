use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const DEFAULT_FILTER: &str = "info";

/// Installs a `tracing` subscriber that appends to `path`.
///
/// The terminal belongs to the game while it runs, so events never go to
/// stdout or stderr. `RUST_LOG` overrides the default `info` filter.
pub fn init_file_logging(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::AppError;

    use super::init_file_logging;

    #[test]
    fn subscriber_installs_once_and_creates_the_log_file() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir()
            .join("grid-snake-log-tests")
            .join(format!("run-{nanos}.log"));

        init_file_logging(&path).expect("first subscriber installs");
        assert!(path.is_file());

        assert!(matches!(
            init_file_logging(&path),
            Err(AppError::Logging(_))
        ));

        let _ = std::fs::remove_file(&path);
    }
}
