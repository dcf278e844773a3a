//! Local zone lookup
//!
//! The local field needs two things from a zone: the offset and abbreviation
//! in effect at an instant, and every instant that shows a given wall-clock
//! reading. `SystemZone` answers from the host configuration; `FixedZone`
//! answers from a constant offset and is what tests use.

use chrono::{FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};

use crate::Instant;

/// Offset and abbreviation in effect at some instant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneName {
    pub offset: FixedOffset,
    pub abbreviation: String,
}

impl ZoneName {
    pub fn utc() -> Self {
        ZoneName {
            offset: Utc.fix(),
            abbreviation: "UTC".to_string(),
        }
    }

    /// Numeric name for zones without an abbreviation, e.g. `+0530`
    pub fn numeric(offset: FixedOffset) -> Self {
        ZoneName {
            offset,
            abbreviation: numeric_abbreviation(offset.local_minus_utc()),
        }
    }
}

/// A zone the local field renders into and parses from
pub trait LocalZone {
    /// Offset and abbreviation in effect at `instant`
    fn describe(&self, instant: Instant) -> ZoneName;

    /// Every instant whose wall-clock reading in this zone is `local`,
    /// earliest first. Empty inside a DST gap, two entries inside an overlap.
    fn resolve(&self, local: NaiveDateTime) -> Vec<Instant>;
}

/// A zone with one constant offset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedZone {
    name: ZoneName,
}

impl FixedZone {
    pub fn new(offset: FixedOffset, abbreviation: impl Into<String>) -> Self {
        FixedZone {
            name: ZoneName {
                offset,
                abbreviation: abbreviation.into(),
            },
        }
    }

    pub fn utc() -> Self {
        FixedZone {
            name: ZoneName::utc(),
        }
    }

    /// Offset east of UTC in seconds; `None` when out of range
    pub fn east(secs: i32, abbreviation: impl Into<String>) -> Option<Self> {
        FixedOffset::east_opt(secs).map(|offset| Self::new(offset, abbreviation))
    }
}

impl LocalZone for FixedZone {
    fn describe(&self, _instant: Instant) -> ZoneName {
        self.name.clone()
    }

    fn resolve(&self, local: NaiveDateTime) -> Vec<Instant> {
        self.name
            .offset
            .from_local_datetime(&local)
            .single()
            .and_then(|datetime| Instant::from_datetime(&datetime))
            .into_iter()
            .collect()
    }
}

/// The host's local zone.
///
/// Offsets and abbreviations come from the C library (`localtime_r`) on Unix so
/// the names match what `date(1)` prints. Elsewhere chrono's `Local` supplies
/// the offset and the name is numeric.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemZone;

impl SystemZone {
    pub fn new() -> Self {
        sys::init();
        SystemZone
    }
}

impl LocalZone for SystemZone {
    fn describe(&self, instant: Instant) -> ZoneName {
        sys::describe(instant.as_unix()).unwrap_or_else(|| {
            let offset = chrono::Local
                .offset_from_utc_datetime(&instant.to_utc().naive_utc())
                .fix();
            ZoneName::numeric(offset)
        })
    }

    fn resolve(&self, local: NaiveDateTime) -> Vec<Instant> {
        let candidates = match chrono::Local.from_local_datetime(&local) {
            LocalResult::Single(a) => vec![a],
            LocalResult::Ambiguous(a, b) => vec![a, b],
            LocalResult::None => Vec::new(),
        };
        let mut instants: Vec<Instant> = candidates
            .iter()
            .filter_map(|datetime| Instant::from_datetime(datetime))
            .collect();
        instants.sort();
        instants
    }
}

fn numeric_abbreviation(offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    let seconds = abs_secs % 60;
    if seconds == 0 {
        format!("{sign}{hours:02}{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}{seconds:02}")
    }
}

#[cfg(unix)]
mod sys {
    use std::ffi::CStr;
    use std::sync::Once;

    use chrono::FixedOffset;

    use super::{numeric_abbreviation, ZoneName};

    static TZSET: Once = Once::new();

    extern "C" {
        fn tzset();
    }

    /// `localtime_r` is not required to read `TZ`; `tzset` makes it.
    pub(super) fn init() {
        TZSET.call_once(|| unsafe { tzset() });
    }

    pub(super) fn describe(epoch_secs: i64) -> Option<ZoneName> {
        init();
        let time_val = libc::time_t::try_from(epoch_secs).ok()?;
        let mut tm: libc::tm = unsafe { std::mem::zeroed() };
        let tm_ptr = unsafe { libc::localtime_r(&time_val, &mut tm) };
        if tm_ptr.is_null() {
            return None;
        }
        let offset_secs = i32::try_from(tm.tm_gmtoff).ok()?;
        let offset = FixedOffset::east_opt(offset_secs)?;
        let abbreviation = if tm.tm_zone.is_null() {
            numeric_abbreviation(offset_secs)
        } else {
            let name = unsafe { CStr::from_ptr(tm.tm_zone) }.to_string_lossy();
            // The field format is whitespace separated
            if name.trim().is_empty() || name.contains(char::is_whitespace) {
                numeric_abbreviation(offset_secs)
            } else {
                name.into_owned()
            }
        };
        Some(ZoneName {
            offset,
            abbreviation,
        })
    }
}

#[cfg(not(unix))]
mod sys {
    use super::ZoneName;

    pub(super) fn init() {}

    pub(super) fn describe(_epoch_secs: i64) -> Option<ZoneName> {
        None
    }
}
