//! Tracing subscriber setup. Everything is written to stderr; stdout carries the MCP transport.

use crate::config::LogFormat;
use crate::error::{Result, ServerError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`ServerError::Logging`] for an invalid filter directive or when a subscriber is
/// already installed.
pub fn init(filter: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| ServerError::Logging(format!("invalid log filter '{filter}': {e}")))?;

    let base = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Text => registry.with(base.compact()).try_init(),
        LogFormat::Json => registry.with(base.json()).try_init(),
    };
    installed.map_err(|e| ServerError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_filter_is_reported() {
        let err = init("info,housecall_api=loudest", LogFormat::Text).unwrap_err();
        assert!(err.to_string().starts_with("Logging error: invalid log filter"));
    }
}
