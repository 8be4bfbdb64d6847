mod common;

use anyhow::Context as _;
use serde_json::json;
use std::process::Stdio;

use common::{BIN, MockResponse, MockUpstream, call, result_json, result_text, spawn_server};

#[tokio::test(flavor = "multi_thread")]
async fn lists_every_tool_with_annotations() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let client = spawn_server(mock.base_url()).await?;

    let tools = client.list_all_tools().await.context("tools/list")?;
    assert_eq!(tools.len(), housecall_mcp::TOOL_SPECS.len());

    let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
    for expected in [
        "get_customers",
        "create_job",
        "query_invoices",
        "summarize_employees",
        "find_category_by_name",
        "create_webhook_subscription",
        "disable_application",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    let get_customers = tools
        .iter()
        .find(|t| t.name == "get_customers")
        .context("get_customers")?;
    let annotations = get_customers.annotations.as_ref().context("annotations")?;
    assert_eq!(annotations.read_only_hint, Some(true));
    assert_eq!(annotations.open_world_hint, Some(true));

    assert!(mock.requests().is_empty());
    client.cancel().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn tool_call_proxies_to_upstream() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let customer = json!({"id": "cus_1", "first_name": "Jane"});
    mock.respond("GET", "/customers/cus_1", MockResponse::json(200, &customer));
    let client = spawn_server(mock.base_url()).await?;

    let result = call(&client, "get_customer", json!({"customer_id": "cus_1"})).await?;
    assert_ne!(result.is_error, Some(true));
    assert_eq!(result_json(&result)?, customer);

    let req = mock.last_request().context("request recorded")?;
    assert_eq!(req.header("authorization"), Some("Token test-key"));

    client.cancel().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_failure_is_an_error_result() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond(
        "GET",
        "/jobs/job_404",
        MockResponse::json(404, &json!({"message": "not here"})),
    );
    let client = spawn_server(mock.base_url()).await?;

    let result = call(&client, "get_job_by_id", json!({"job_id": "job_404"})).await?;
    assert_eq!(result.is_error, Some(true));
    let body = result_json(&result)?;
    assert_eq!(body["status_code"], json!(404));
    assert_eq!(body["details"], json!({"message": "not here"}));

    client.cancel().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn validation_failure_sends_nothing() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let client = spawn_server(mock.base_url()).await?;

    let result = call(
        &client,
        "create_webhook_subscription",
        json!({"url": "ftp://bad", "events": ["job.created"]}),
    )
    .await?;
    assert_eq!(result.is_error, Some(true));
    assert!(result_json(&result)?.get("error").is_some());
    assert!(mock.requests().is_empty());

    client.cancel().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn employee_summary_is_plain_text() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond(
        "GET",
        "/employees",
        MockResponse::json(200, &json!({"employees": [{"role": "admin", "is_active": true}]})),
    );
    let client = spawn_server(mock.base_url()).await?;

    let result = call(&client, "summarize_employees", serde_json::Value::Null).await?;
    let text = result_text(&result);
    assert!(text.starts_with("Employee Summary:"), "{text}");
    assert!(text.contains("admin: 1"));

    client.cancel().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_tool_is_a_protocol_error() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let client = spawn_server(mock.base_url()).await?;

    let outcome = call(&client, "drop_all_customers", json!({})).await;
    assert!(outcome.is_err());

    client.cancel().await?;
    Ok(())
}

#[test]
fn missing_api_key_fails_startup() -> anyhow::Result<()> {
    let output = std::process::Command::new(BIN)
        .env_remove("HOUSECALL_PRO_API_KEY")
        .env("HOUSECALL_MCP_LOG", "error")
        .stdin(Stdio::null())
        .output()
        .context("run housecall-mcp")?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HOUSECALL_PRO_API_KEY"), "{stderr}");
    assert!(output.stdout.is_empty());
    Ok(())
}
