//! TimeSync - one canonical instant, three views
//!
//! Every edit ends in `set_time`, which stores the instant and pushes all three
//! projections to a `FieldSink`. A toolkit may answer those writes by firing
//! its own change or commit notifications straight back into the commit
//! handlers. The `updating` flag turns any such nested call into a no-op, so
//! one external event produces exactly one update.
//!
//! INVARIANT: outside `set_time`, the sink holds the projections of `instant`
//! for every field, unless the user has since typed into one.
//!
//! Single-threaded by construction: state lives in `Cell`s so the handlers can
//! take `&self` and be re-entered on the same call stack.

use std::cell::Cell;

use tracing::{debug, trace};

use crate::{
    format_local, format_unix, format_utc, parse_local, parse_unix, parse_utc, Field, Instant,
    LocalZone, ParseResult, SystemZone,
};

/// Receives displayed text for a field.
///
/// This is the only thing the core needs from a UI. Closures work:
///
/// ```
/// use epochalypse_core::{Field, FixedZone, Instant, TimeSync};
///
/// let sync = TimeSync::starting_at(
///     FixedZone::utc(),
///     |field: Field, text: &str| println!("{field}: {text}"),
///     Instant::EPOCH,
/// );
/// assert_eq!(sync.updates(), 1);
/// ```
pub trait FieldSink {
    fn set_text(&self, field: Field, text: &str);
}

impl<F: Fn(Field, &str)> FieldSink for F {
    fn set_text(&self, field: Field, text: &str) {
        self(field, text)
    }
}

/// Clears the updating flag on every exit path, including unwinding out of a
/// panicking sink.
struct UpdateGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> UpdateGuard<'a> {
    /// `None` if an update is already running
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(UpdateGuard { flag })
        }
    }
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// The synchronized time model
pub struct TimeSync<Z: LocalZone = SystemZone> {
    /// Canonical instant
    instant: Cell<Instant>,
    /// Re-entrancy guard
    updating: Cell<bool>,
    /// Completed `set_time` calls
    updates: Cell<u64>,
    zone: Z,
    sink: Box<dyn FieldSink>,
}

impl TimeSync<SystemZone> {
    /// Host zone, starting at the current time
    pub fn with_system_zone(sink: impl FieldSink + 'static) -> Self {
        Self::new(SystemZone::new(), sink)
    }
}

impl<Z: LocalZone> TimeSync<Z> {
    /// Start at the current wall-clock time and publish it to `sink`
    pub fn new(zone: Z, sink: impl FieldSink + 'static) -> Self {
        Self::starting_at(zone, sink, Instant::now())
    }

    /// Start at `instant` and publish it to `sink`
    pub fn starting_at(zone: Z, sink: impl FieldSink + 'static, instant: Instant) -> Self {
        let sync = TimeSync {
            instant: Cell::new(instant),
            updating: Cell::new(false),
            updates: Cell::new(0),
            zone,
            sink: Box::new(sink),
        };
        sync.set_time(instant);
        sync
    }

    /// Current canonical instant
    pub fn instant(&self) -> Instant {
        self.instant.get()
    }

    /// Number of completed updates, initial publication included
    pub fn updates(&self) -> u64 {
        self.updates.get()
    }

    /// True while the three fields are being written
    pub fn is_updating(&self) -> bool {
        self.updating.get()
    }

    /// Zone the local field renders into and parses from
    pub fn zone(&self) -> &Z {
        &self.zone
    }

    /// Projection of the current instant for `field`
    pub fn text(&self, field: Field) -> String {
        self.render(field, self.instant())
    }

    /// Store `instant` and rewrite all three fields.
    ///
    /// Returns `false` without touching anything when called from inside
    /// another `set_time`.
    pub fn set_time(&self, instant: Instant) -> bool {
        let Some(_guard) = UpdateGuard::enter(&self.updating) else {
            trace!(?instant, "nested set_time suppressed");
            return false;
        };

        self.instant.set(instant);
        for field in Field::ALL {
            self.sink.set_text(field, &self.render(field, instant));
        }
        self.updates.set(self.updates.get() + 1);
        debug!(unix = instant.as_unix(), updates = self.updates.get(), "time updated");
        true
    }

    /// Commit handler for the Unix field
    pub fn on_unix_committed(&self, text: &str) -> bool {
        self.apply(Field::Unix, text, parse_unix(text))
    }

    /// Commit handler for the local time field
    pub fn on_local_time_committed(&self, text: &str) -> bool {
        self.apply(Field::LocalTime, text, parse_local(&self.zone, text))
    }

    /// Commit handler for the UTC field
    pub fn on_utc_time_committed(&self, text: &str) -> bool {
        self.apply(Field::UtcTime, text, parse_utc(text))
    }

    /// Dispatch a commit by field
    pub fn commit(&self, field: Field, text: &str) -> bool {
        match field {
            Field::Unix => self.on_unix_committed(text),
            Field::LocalTime => self.on_local_time_committed(text),
            Field::UtcTime => self.on_utc_time_committed(text),
        }
    }

    /// Jump to the current wall-clock time
    pub fn on_now_requested(&self) -> bool {
        self.set_time(Instant::now())
    }

    fn apply(&self, field: Field, text: &str, parsed: ParseResult<Instant>) -> bool {
        match parsed {
            Ok(instant) => self.set_time(instant),
            Err(e) => {
                debug!(%field, text, error = %e, "commit rejected");
                false
            }
        }
    }

    fn render(&self, field: Field, instant: Instant) -> String {
        match field {
            Field::Unix => format_unix(instant),
            Field::LocalTime => format_local(&self.zone, instant),
            Field::UtcTime => format_utc(instant),
        }
    }
}
