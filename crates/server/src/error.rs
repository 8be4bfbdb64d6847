//! Error types for the MCP server.

use housecall_api::ApiError;
use thiserror::Error;

/// Main error type for the server binary.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Missing API key, bad base URL or timeout.
    #[error(transparent)]
    Config(#[from] ApiError),

    /// Invalid log filter, or a global subscriber was already installed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// The stdio transport failed to initialize or terminated abnormally.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
