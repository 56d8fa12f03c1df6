//! Diagnostic logging for the `setgame` binary.
//!
//! Library crates only emit `tracing` events; the binary installs a
//! formatter on stderr so game output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `setgame_ai=debug`.
pub const LOG_ENV: &str = "SETGAME_LOG";

const DEFAULT_FILTER: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging for the application.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
