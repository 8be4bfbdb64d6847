//! Command-line and environment configuration.

use crate::error::Result;
use clap::{Parser, ValueEnum};
use housecall_api::ClientConfig;
use housecall_api::config::DEFAULT_BASE_URL;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Housecall Pro MCP server (stdio transport).
#[derive(Debug, Clone, Parser)]
#[command(name = "housecall-mcp", version, about)]
pub struct Cli {
    /// Housecall Pro API key, sent as `Authorization: Token <key>`.
    #[arg(long, env = "HOUSECALL_PRO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL.
    #[arg(long, env = "HOUSECALL_PRO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "HOUSECALL_PRO_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log filter directive (e.g. `info`, `housecall_api=debug`). Logs go to stderr.
    #[arg(long, env = "HOUSECALL_MCP_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "HOUSECALL_MCP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Resolve the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`](crate::ServerError::Config) if the API key is missing or
    /// blank, or the timeout is zero.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(self.api_key.clone().unwrap_or_default())?
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerError;
    use housecall_api::ApiError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("housecall-mcp").chain(args.iter().copied()))
            .expect("valid args")
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--api-key",
            "k",
            "--base-url",
            "http://127.0.0.1:9",
            "--timeout-secs",
            "5",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.log_format, LogFormat::Json);
        let cfg = cli.client_config().expect("config");
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.base_url, "http://127.0.0.1:9");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let mut cli = parse(&["--api-key", "k"]);
        cli.api_key = None;
        let err = cli.client_config().unwrap_err();
        assert!(matches!(err, ServerError::Config(ApiError::Config(_))));
        assert!(err.to_string().contains("HOUSECALL_PRO_API_KEY"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = parse(&["--api-key", "k", "--timeout-secs", "0"]);
        let err = cli.client_config().unwrap_err();
        assert!(matches!(err, ServerError::Config(ApiError::Config(_))));
    }
}
