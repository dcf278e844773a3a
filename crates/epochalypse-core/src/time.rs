//! Absolute time at whole-second precision

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

const SECS_PER_DAY: i64 = 86_400;

/// A point in time, independent of any zone.
/// Represented as seconds since 1970-01-01T00:00:00Z.
///
/// INVARIANT: the value lies at least one day inside chrono's representable
/// range, so every instant renders in UTC and in any local offset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(i64);

impl Instant {
    pub const EPOCH: Instant = Instant(0);

    /// Smallest accepted unix seconds value
    pub fn min_unix() -> i64 {
        DateTime::<Utc>::MIN_UTC.timestamp() + SECS_PER_DAY
    }

    /// Largest accepted unix seconds value
    pub fn max_unix() -> i64 {
        DateTime::<Utc>::MAX_UTC.timestamp() - SECS_PER_DAY
    }

    /// Instant at `secs` seconds after the epoch, if representable
    pub fn from_unix(secs: i64) -> Option<Self> {
        (Self::min_unix()..=Self::max_unix())
            .contains(&secs)
            .then_some(Instant(secs))
    }

    /// Drops sub-second precision.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Option<Self> {
        Self::from_unix(datetime.timestamp())
    }

    /// Current wall-clock time, truncated to the second
    pub fn now() -> Self {
        Self::from_datetime(&Utc::now()).unwrap_or(Instant::EPOCH)
    }

    #[inline]
    pub fn as_unix(self) -> i64 {
        self.0
    }

    pub fn to_utc(self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({}s)", self.0)
    }
}
