//! In-process stand-in for the Housecall Pro API, shared by the workspace's integration tests.
//!
//! [`MockUpstream`] binds an ephemeral localhost port, records every request it receives and
//! answers with scripted responses (optionally delayed, to exercise client timeouts).

use anyhow::Context as _;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw (still percent-encoded) path.
    pub path: String,
    /// Decoded query pairs in wire order.
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> anyhow::Result<Value> {
        serde_json::from_slice(&self.body).context("request body is not JSON")
    }
}

/// A scripted answer.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
    pub delay: Duration,
}

impl MockResponse {
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: Some("application/json".to_string()),
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: Some("text/plain".to_string()),
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            content_type: None,
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct Route {
    method: Option<Method>,
    path: String,
    response: MockResponse,
}

struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    routes: Mutex<Vec<Route>>,
    fallback: Mutex<MockResponse>,
}

pub struct MockUpstream {
    base_url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    /// Start a mock that answers `200 {}` until told otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if binding an ephemeral localhost port fails.
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            routes: Mutex::new(Vec::new()),
            fallback: Mutex::new(MockResponse::json(200, &serde_json::json!({}))),
        });

        let app = Router::new()
            .route("/", any(handle))
            .route("/{*path}", any(handle))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock upstream")?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        tokio::spawn(async move {
            let _ = server.await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
            shutdown: Some(shutdown_tx),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer `method path` (exact raw path match) with `response`. Later routes win.
    pub fn respond(&self, method: &str, path: &str, response: MockResponse) {
        self.state.routes.lock().push(Route {
            method: method.parse().ok(),
            path: path.to_string(),
            response,
        });
    }

    /// Answer every unrouted request with `response`.
    pub fn respond_all(&self, response: MockResponse) {
        *self.state.fallback.lock() = response;
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    let path = uri.path().to_string();
    state.requests.lock().push(RecordedRequest {
        method: method.as_str().to_string(),
        path: path.clone(),
        query,
        headers,
        body,
    });

    let response = state
        .routes
        .lock()
        .iter()
        .rev()
        .find(|r| r.path == path && r.method.as_ref().is_none_or(|m| *m == method))
        .map(|r| r.response.clone())
        .unwrap_or_else(|| state.fallback.lock().clone());

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match response.content_type {
        Some(ct) => (status, [(header::CONTENT_TYPE, ct)], response.body).into_response(),
        None => (status, response.body).into_response(),
    }
}
