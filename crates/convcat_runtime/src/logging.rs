//! Diagnostic output.
//!
//! Diagnostics go to stderr so that JSON written to stdout stays clean.

use convcat_foundation::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Level used when neither `--log`, `-v`, nor `RUST_LOG` is given.
pub const DEFAULT_LEVEL: &str = "info";

/// Chooses the log filter.
///
/// An explicit level wins, then `verbose` (debug), then `RUST_LOG`, then
/// [`DEFAULT_LEVEL`].
///
/// # Errors
///
/// Returns `ConfigError` if the explicit level is not a valid filter.
pub fn filter(level: Option<&str>, verbose: bool) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level.to_ascii_lowercase())
            .map_err(|e| Error::config(format!("invalid log level '{level}': {e}"))),
        None if verbose => Ok(EnvFilter::new("debug")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns `ConfigError` if the level is invalid or a subscriber is
/// already installed.
pub fn init(level: Option<&str>, verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level, verbose)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::config(format!("failed to initialize logging: {e}")))
}
