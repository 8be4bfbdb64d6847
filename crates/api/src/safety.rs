//! URL checks and log redaction for outbound calls.

use crate::error::{ApiError, Result};
use url::Url;

/// Parse a caller-supplied URL and require an `http`/`https` scheme with a host.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for unparsable URLs, other schemes, or a missing host.
pub fn require_http_url(field: &str, raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let url = Url::parse(raw)
        .map_err(|e| ApiError::validation(format!("{field} must be a valid URL: {e}")))?;

    let scheme = url.scheme();
    let has_authority = raw
        .get(scheme.len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    if (scheme != "http" && scheme != "https") || !has_authority {
        return Err(ApiError::validation(format!(
            "{field} must start with http:// or https:// (got scheme '{scheme}')"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ApiError::validation(format!("{field} is missing a host")));
    }

    Ok(url)
}

/// Strip credentials, query and fragment so a URL can be logged.
#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

#[must_use]
pub fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(u) = e.url() {
        msg = msg.replace(u.as_str(), &redact_url(u));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(require_http_url("url", "https://example.com/hook").is_ok());
        assert!(require_http_url("url", "  http://example.com  ").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = require_http_url("url", "ftp://bad").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("http://"));

        assert!(require_http_url("url", "not a url").is_err());
        assert!(require_http_url("url", "http:example.com/hook").is_err());
        assert!(require_http_url("url", "https:/x.example").is_err());
        assert!(require_http_url("url", "HTTPS://example.com").is_ok());
        assert!(require_http_url("url", "").is_err());
    }

    #[test]
    fn redaction_drops_credentials_and_query() {
        let url = Url::parse("https://user:pw@api.example.com/jobs?token=abc#frag").expect("url");
        assert_eq!(redact_url(&url), "https://api.example.com/jobs");
    }
}
