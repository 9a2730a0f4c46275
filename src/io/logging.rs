//! Structured logging setup for the command-line tool

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const fn default_filter(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}

/// Install a stderr `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the default filter. Installing twice is
/// harmless; the first subscriber stays in place.
pub fn init_tracing(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
