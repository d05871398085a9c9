// Logging module for structured logging using the tracing crate

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for structured logging
///
/// Configured with:
/// - JSON formatting for log aggregation systems
/// - `RUST_LOG`-style env filtering, defaulting to `info`
/// - Output to stdout
///
/// Call once at application startup; a second call returns an error from
/// the underlying subscriber registry.
pub fn init_subscriber() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()?;

    Ok(())
}
