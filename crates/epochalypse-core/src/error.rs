//! Error types for field parsing

use std::num::ParseIntError;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Why a committed field text was not turned into an instant.
///
/// These never reach the user. Commit handlers log them and drop the edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid unix seconds: {0}")]
    InvalidSeconds(#[from] ParseIntError),

    #[error("Unix seconds out of range: {0}")]
    OutOfRange(i64),

    #[error("Expected 6 date-time tokens, got {0}")]
    TokenCount(usize),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidDateTime(#[from] chrono::ParseError),

    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("Local time does not exist: {0}")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Result type for field parsing
pub type ParseResult<T> = Result<T, ParseError>;
