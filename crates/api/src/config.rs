//! Client configuration: base URL, API key and request timeout.

use crate::error::{ApiError, Result};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.housecallpro.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_ENV: &str = "HOUSECALL_PRO_API_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the production API with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the key is empty or whitespace.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ApiError::Config(format!(
                "{API_KEY_ENV} is required (set it in the environment)"
            )));
        }
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().to_string();
        self
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for a zero timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(ApiError::Config("timeout must be greater than zero".to_string()));
        }
        self.timeout = timeout;
        Ok(self)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_a_config_error() {
        for key in ["", "   "] {
            let err = ClientConfig::new(key).unwrap_err();
            assert!(matches!(err, ApiError::Config(_)));
            assert!(err.to_string().contains(API_KEY_ENV));
        }
    }

    #[test]
    fn defaults_point_at_production() {
        let cfg = ClientConfig::new(" key ").expect("valid key");
        assert_eq!(cfg.api_key, "key");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = ClientConfig::new("key").expect("valid key");
        assert!(cfg.clone().with_timeout(Duration::ZERO).is_err());
        let cfg = cfg.with_timeout(Duration::from_secs(5)).expect("valid");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg = ClientConfig::new("super-secret").expect("valid key");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
