//! Error types for the terminal front end

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end the process.
///
/// Bad field input is not here: the core drops it silently.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type for the terminal front end
pub type AppResult<T> = Result<T, AppError>;
