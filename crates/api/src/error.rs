//! Normalized error value shared by every Housecall Pro call.

use crate::safety::sanitize_reqwest_error;
use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Missing API key, unparsable base URL and similar startup problems.
    #[error("config error: {0}")]
    Config(String),

    /// A tool argument failed a local check; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// DNS, TLS, connect or timeout failure.
    #[error("{0}")]
    Transport(String),

    /// The upstream answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// A 2xx response whose body could not be understood.
    #[error("{0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        let detail = sanitize_reqwest_error(&value);
        if value.is_timeout() {
            Self::Transport(format!("Request timed out: {detail}"))
        } else {
            Self::Transport(format!("Request failed: {detail}"))
        }
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a status error from a raw upstream response body.
    ///
    /// The body is kept as JSON when it parses, otherwise as a string; an empty body is dropped.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown");
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::Status {
                status: code,
                message: format!("API returned {code} {reason}"),
                details: None,
            };
        }

        let details =
            serde_json::from_str::<Value>(trimmed).unwrap_or_else(|_| Value::String(trimmed.into()));
        Self::Status {
            status: code,
            message: format!("API returned {code} {reason}: {trimmed}"),
            details: Some(details),
        }
    }

    /// Numeric HTTP status, when the failure came from an upstream response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body returned by the upstream, if any.
    #[must_use]
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                details: Some(details),
                ..
            } => details.get("message").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Replace the message of a status error with `code`, dropping the upstream details.
    #[must_use]
    pub fn on_status(self, code: u16, message: impl FnOnce() -> String) -> Self {
        match self {
            Self::Status { status, .. } if status == code => Self::Status {
                status,
                message: message(),
                details: None,
            },
            other => other,
        }
    }

    /// Prefix the message of any status error, keeping code and details.
    #[must_use]
    pub fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Self::Status {
                status,
                message,
                details,
            } => Self::Status {
                status,
                message: format!("{prefix}: {message}"),
                details,
            },
            other => other,
        }
    }

    /// Shared wording for authentication and authorization failures.
    #[must_use]
    pub fn with_access_messages(self) -> Self {
        self.on_status(401, || {
            "Unauthorized - check your API credentials".to_string()
        })
        .on_status(403, || {
            "Access denied - insufficient permissions".to_string()
        })
    }

    /// Render the error as the mapping returned to tool callers.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("error".to_string(), json!(self.to_string()));
        if let Self::Status {
            status, details, ..
        } = self
        {
            out.insert("status_code".to_string(), json!(status));
            if let Some(details) = details {
                out.insert("details".to_string(), details.clone());
            }
        }
        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn status_error_keeps_code_and_json_details() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"bad"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.upstream_message(), Some("bad"));
        assert_eq!(
            err.to_value(),
            json!({
                "error": "API returned 422 Unprocessable Entity: {\"message\":\"bad\"}",
                "status_code": 422,
                "details": {"message": "bad"},
            })
        );
    }

    #[test]
    fn empty_error_body_has_no_details() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "  ");
        assert_eq!(
            err.to_value(),
            json!({"error": "API returned 502 Bad Gateway", "status_code": 502})
        );
    }

    #[test]
    fn non_json_error_body_is_kept_as_text() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.to_value()["details"], json!("boom"));
        assert_eq!(err.upstream_message(), None);
    }

    #[test]
    fn on_status_only_rewrites_matching_code() {
        let not_found = ApiError::from_status(StatusCode::NOT_FOUND, "{}")
            .on_status(404, || "Customer c1 not found".to_string());
        assert_eq!(
            not_found.to_value(),
            json!({"error": "Customer c1 not found", "status_code": 404})
        );

        let other = ApiError::from_status(StatusCode::CONFLICT, "{}")
            .on_status(404, || "unused".to_string());
        assert!(other.to_string().starts_with("API returned 409"));
    }

    #[test]
    fn access_messages_cover_401_and_403() {
        let unauthorized = ApiError::from_status(StatusCode::UNAUTHORIZED, "").with_access_messages();
        assert_eq!(
            unauthorized.to_string(),
            "Unauthorized - check your API credentials"
        );
        let forbidden = ApiError::from_status(StatusCode::FORBIDDEN, "").with_access_messages();
        assert_eq!(forbidden.to_string(), "Access denied - insufficient permissions");
    }

    #[test]
    fn validation_error_has_no_status_code() {
        let err = ApiError::validation("customer_id is required");
        assert_eq!(err.status(), None);
        assert_eq!(err.to_value(), json!({"error": "customer_id is required"}));
    }

    #[test]
    fn prefix_applies_to_status_errors_only() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "").with_prefix("Failed");
        assert_eq!(err.to_string(), "Failed: API returned 400 Bad Request");
        let v = ApiError::validation("x").with_prefix("Failed");
        assert_eq!(v.to_string(), "x");
    }
}
