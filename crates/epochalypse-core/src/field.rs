//! The three views of an instant and their input rules

use std::fmt;

/// Display width of the Unix field, also its input limit
pub const UNIX_FIELD_WIDTH: u16 = 10;
/// Display width of the date fields, also their input limit
pub const DATE_TIME_FIELD_WIDTH: u16 = 35;

/// One textual projection of the canonical instant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Decimal seconds since the epoch
    Unix,
    /// Host local time
    LocalTime,
    /// UTC
    UtcTime,
}

impl Field {
    /// Top-to-bottom form order
    pub const ALL: [Field; 3] = [Field::Unix, Field::LocalTime, Field::UtcTime];

    pub fn label(self) -> &'static str {
        match self {
            Field::Unix => "Unix",
            Field::LocalTime => "Local",
            Field::UtcTime => "UTC",
        }
    }

    pub fn width(self) -> u16 {
        match self {
            Field::Unix => UNIX_FIELD_WIDTH,
            Field::LocalTime | Field::UtcTime => DATE_TIME_FIELD_WIDTH,
        }
    }

    /// Longest accepted input, in characters
    pub fn max_chars(self) -> usize {
        usize::from(self.width())
    }

    /// Per-keystroke filter on the provisional text.
    ///
    /// Unix accepts an integer prefix: empty, a lone sign, or something that
    /// parses as `i64`. Date fields accept anything short enough. Passing the
    /// filter does not mean the text will parse on commit.
    pub fn accepts(self, candidate: &str) -> bool {
        if candidate.chars().count() > self.max_chars() {
            return false;
        }
        match self {
            Field::Unix => is_integer_prefix(candidate),
            Field::LocalTime | Field::UtcTime => true,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_integer_prefix(text: &str) -> bool {
    matches!(text, "" | "+" | "-") || text.parse::<i64>().is_ok()
}
