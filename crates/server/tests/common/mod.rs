use anyhow::Context as _;
use rmcp::model::{CallToolRequestParams, CallToolResult, JsonObject};
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::{ConfigureCommandExt as _, TokioChildProcess};
use rmcp::ServiceExt as _;
use serde_json::Value;
use tokio::process::Command;

pub use housecall_test_support::{MockResponse, MockUpstream};

pub const BIN: &str = env!("CARGO_BIN_EXE_housecall-mcp");

pub type McpClient = RunningService<RoleClient, ()>;

/// Spawn the server over stdio, pointed at `base_url`.
pub async fn spawn_server(base_url: &str) -> anyhow::Result<McpClient> {
    let base_url = base_url.to_string();
    let transport = TokioChildProcess::new(Command::new(BIN).configure(|cmd| {
        cmd.env("HOUSECALL_PRO_API_KEY", "test-key")
            .env("HOUSECALL_PRO_BASE_URL", &base_url)
            .env("HOUSECALL_PRO_TIMEOUT_SECS", "5")
            .env("HOUSECALL_MCP_LOG", "warn");
    }))
    .context("spawn housecall-mcp")?;
    ().serve(transport).await.context("initialize MCP session")
}

pub async fn call(
    client: &McpClient,
    name: &str,
    arguments: Value,
) -> anyhow::Result<CallToolResult> {
    let arguments: Option<JsonObject> = match arguments {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => anyhow::bail!("tool arguments must be an object, got {other}"),
    };
    client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: name.to_string().into(),
            arguments,
            task: None,
        })
        .await
        .with_context(|| format!("call {name}"))
}

pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| c.raw.as_text().map(|t| t.text.clone()))
        .collect()
}

pub fn result_json(result: &CallToolResult) -> anyhow::Result<Value> {
    serde_json::from_str(&result_text(result)).context("tool result is not JSON")
}
