//! epochalypse core - One instant, three synchronized views
//!
//! This crate holds everything that does not need a terminal:
//! - `Instant`: whole-second absolute time
//! - Zone lookup for the local rendering (`LocalZone`, `SystemZone`, `FixedZone`)
//! - The fixed `Www Mmm _d hh:mm:ss ZONE yyyy` format and its parsers
//! - `Field` metadata and per-keystroke acceptance rules
//! - `TimeSync`: the canonical instant plus the re-entrancy guard

pub mod error;
pub mod field;
pub mod format;
pub mod sync;
pub mod time;
pub mod zone;

pub use error::*;
pub use field::*;
pub use format::*;
pub use sync::*;
pub use time::*;
pub use zone::*;
