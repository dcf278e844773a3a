//! epochalypse - Edit one timestamp as Unix seconds, local time, and UTC
//!
//! Committing any of the three fields recomputes the other two. The Now
//! button jumps to the current time. Ctrl-C quits.
//!
//! Set `EPOCHALYPSE_LOG=/path/to/file` to capture tracing output.

mod app;
mod config;
mod error;
mod form;
mod input;
mod logging;
mod ui;

use tracing::info;

use config::FormConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = logging::init()? {
        info!(path = %path.display(), "logging to file");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    app::run(FormConfig::default())?;

    info!("exiting");
    Ok(())
}
