//! Logging bootstrap
//!
//! The form owns the terminal, so nothing may log to stdout or stderr. Events
//! go to the file named by `EPOCHALYPSE_LOG`, filtered by `RUST_LOG`. Without
//! that variable no subscriber is installed and events are discarded.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Names the log file
pub const LOG_FILE_ENV: &str = "EPOCHALYPSE_LOG";
/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Install the file subscriber if `EPOCHALYPSE_LOG` is set.
/// Returns the log path when logging is active.
pub fn init() -> AppResult<Option<PathBuf>> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from) else {
        return Ok(None);
    };
    let file = open_log_file(&path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(Some(path))
}

/// Open for append, creating the file if needed
fn open_log_file(path: &Path) -> AppResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}
