//! Diagnostic output on stderr, verbosity driven by `-v`.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Map the number of `-v` flags onto the most verbose level shown.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. stdout is left for the confirmation line.
pub fn init(verbosity: u8) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .with_context(|| "Failed to install log subscriber")
}
