//! Authenticated request gateway.
//!
//! Every resource wrapper funnels through [`HousecallClient::send`] (or the multipart/document
//! variants), which owns the auth headers, timeout, status handling and error normalization.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::params::{JsonMap, to_query_pairs};
use crate::safety::redact_url;
use crate::semantics::ApiMethod;
use base64::Engine as _;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

#[derive(Clone)]
pub struct HousecallClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    http: reqwest::Client,
    timeout: Duration,
}

impl std::fmt::Debug for HousecallClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HousecallClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl HousecallClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is invalid, the API key cannot be used as a
    /// header value, or the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::Config(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "Invalid base URL '{}': expected an http(s) URL",
                config.base_url
            )));
        }
        if config.api_key.trim().is_empty() {
            return Err(ApiError::Config("API key is empty".to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Token {}", config.api_key.trim()))
            .map_err(|_| {
                ApiError::Config("API key contains characters not allowed in a header".to_string())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                http,
                timeout: config.timeout,
            }),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Join percent-encoded path segments to the base URL and append the query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL cannot carry a path.
    pub fn url(&self, path: &[&str], query: Option<&JsonMap>) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::Config("Base URL cannot carry a path".to_string()))?;
            segments.pop_if_empty();
            segments.extend(path);
        }
        url.set_query(None);
        if let Some(query) = query
            && !query.is_empty()
        {
            url.query_pairs_mut().extend_pairs(to_query_pairs(query));
        }
        Ok(url)
    }

    /// Perform one authenticated JSON call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] for network failures and timeouts, [`ApiError::Status`]
    /// for non-2xx responses and [`ApiError::UnexpectedResponse`] for non-JSON 2xx bodies.
    pub async fn send(
        &self,
        method: ApiMethod,
        path: &[&str],
        query: Option<&JsonMap>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.url(path, query)?;
        let mut request = self
            .inner
            .http
            .request(method.as_reqwest(), url.clone())
            .timeout(self.inner.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let text = self.execute(method, &url, request).await?;
        parse_json_body(&text)
    }

    /// # Errors
    ///
    /// See [`HousecallClient::send`].
    pub async fn get(&self, path: &[&str], query: Option<&JsonMap>) -> Result<Value> {
        self.send(ApiMethod::Get, path, query, None).await
    }

    /// # Errors
    ///
    /// See [`HousecallClient::send`].
    pub async fn post(&self, path: &[&str], body: Option<&Value>) -> Result<Value> {
        self.send(ApiMethod::Post, path, None, body).await
    }

    /// # Errors
    ///
    /// See [`HousecallClient::send`].
    pub async fn put(&self, path: &[&str], body: &Value) -> Result<Value> {
        self.send(ApiMethod::Put, path, None, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`HousecallClient::send`].
    pub async fn patch(&self, path: &[&str], body: &Value) -> Result<Value> {
        self.send(ApiMethod::Patch, path, None, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`HousecallClient::send`].
    pub async fn delete(&self, path: &[&str]) -> Result<Value> {
        self.send(ApiMethod::Delete, path, None, None).await
    }

    /// POST a multipart form; the form's boundary content type replaces the JSON default.
    ///
    /// # Errors
    ///
    /// See [`HousecallClient::send`].
    pub async fn post_multipart(
        &self,
        path: &[&str],
        form: reqwest::multipart::Form,
    ) -> Result<Value> {
        let url = self.url(path, None)?;
        let request = self
            .inner
            .http
            .post(url.clone())
            .timeout(self.inner.timeout)
            .multipart(form);

        let text = self.execute(ApiMethod::Post, &url, request).await?;
        parse_json_body(&text)
    }

    /// GET a document that may be JSON or binary (e.g. a PDF).
    ///
    /// JSON responses are returned parsed; anything else comes back as
    /// `{"encoding": "base64", "mimeType": ..., "data": ...}`.
    ///
    /// # Errors
    ///
    /// See [`HousecallClient::send`].
    pub async fn get_document(&self, path: &[&str], query: Option<&JsonMap>) -> Result<Value> {
        let url = self.url(path, query)?;
        let started = Instant::now();
        let response = self
            .inner
            .http
            .get(url.clone())
            .timeout(self.inner.timeout)
            .header(ACCEPT, "application/pdf, application/json;q=0.9, */*;q=0.1")
            .send()
            .await
            .map_err(|e| self.transport_error(ApiMethod::Get, &url, e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(ApiMethod::Get, &url, e))?;
        log_finished(ApiMethod::Get, &url, status, started);

        if !status.is_success() {
            return Err(status_error(
                ApiMethod::Get,
                &url,
                status,
                &String::from_utf8_lossy(&bytes),
            ));
        }

        let is_json = content_type
            .as_deref()
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .is_some_and(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON));
        if is_json {
            return parse_json_body(&String::from_utf8_lossy(&bytes));
        }

        Ok(json!({
            "encoding": "base64",
            "mimeType": content_type,
            "data": base64::engine::general_purpose::STANDARD.encode(&bytes),
        }))
    }

    async fn execute(
        &self,
        method: ApiMethod,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<String> {
        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(method, url, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(method, url, e))?;
        log_finished(method, url, status, started);

        if status.is_success() {
            Ok(text)
        } else {
            Err(status_error(method, url, status, &text))
        }
    }

    fn transport_error(&self, method: ApiMethod, url: &Url, e: reqwest::Error) -> ApiError {
        let err = if e.is_timeout() {
            ApiError::Transport(format!(
                "Request timed out after {:?}",
                self.inner.timeout
            ))
        } else {
            ApiError::from(e)
        };
        tracing::warn!(
            method = %method,
            url = %redact_url(url),
            error = %err,
            "housecall request failed"
        );
        err
    }
}

fn log_finished(method: ApiMethod, url: &Url, status: reqwest::StatusCode, started: Instant) {
    tracing::debug!(
        method = %method,
        url = %redact_url(url),
        status = status.as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "housecall request finished"
    );
}

fn status_error(
    method: ApiMethod,
    url: &Url,
    status: reqwest::StatusCode,
    body: &str,
) -> ApiError {
    let err = ApiError::from_status(status, body);
    tracing::warn!(
        method = %method,
        url = %redact_url(url),
        status = status.as_u16(),
        "housecall request returned an error status"
    );
    err
}

fn parse_json_body(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(trimmed).map_err(|e| {
        ApiError::UnexpectedResponse(format!("Response body is not valid JSON: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    fn client(base: &str) -> HousecallClient {
        let cfg = ClientConfig::new("key").expect("key").with_base_url(base);
        HousecallClient::new(&cfg).expect("client")
    }

    #[test]
    fn url_joins_and_encodes_segments() {
        let c = client("https://api.example.com");
        let url = c.url(&["jobs", "job 1", "tags", "a/b"], None).expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/jobs/job%201/tags/a%2Fb");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let c = client("http://127.0.0.1:9/proxy/");
        let url = c.url(&["customers"], None).expect("url");
        assert_eq!(url.as_str(), "http://127.0.0.1:9/proxy/customers");
    }

    #[test]
    fn url_query_skips_empty_map() {
        let c = client("https://api.example.com");
        let empty = JsonMap::new();
        let url = c.url(&["jobs"], Some(&empty)).expect("url");
        assert_eq!(url.query(), None);

        let q = params! { "page_size" => Some(100), "sent" => Some(false) };
        let url = c.url(&["invoices"], Some(&q)).expect("url");
        assert_eq!(url.query(), Some("page_size=100&sent=false"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let cfg = ClientConfig::new("key")
            .expect("key")
            .with_base_url("mailto:ops@example.com");
        let err = HousecallClient::new(&cfg).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn rejects_header_unsafe_key() {
        let mut cfg = ClientConfig::new("key").expect("key");
        cfg.api_key = "bad\nkey".to_string();
        assert!(HousecallClient::new(&cfg).is_err());
    }

    #[test]
    fn empty_body_is_an_empty_object() {
        assert_eq!(parse_json_body("").expect("ok"), json!({}));
        assert_eq!(parse_json_body(" \n").expect("ok"), json!({}));
        assert_eq!(parse_json_body("[1]").expect("ok"), json!([1]));
        assert!(matches!(
            parse_json_body("<html>"),
            Err(ApiError::UnexpectedResponse(_))
        ));
    }
}
