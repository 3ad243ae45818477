//! Logging initialization for the roster binary.
//!
//! Filter directives come from the `ROSTER_LOG` environment variable and
//! fall back to the configured level. Output goes to stderr so stdout only
//! carries command results.

use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "ROSTER_LOG";

/// Installs the global subscriber. Call once, at startup.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
