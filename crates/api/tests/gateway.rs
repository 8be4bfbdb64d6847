use anyhow::Context as _;
use housecall_api::resources::customers::{CreateCustomerArgs, CustomerDetails, CustomerIdArgs};
use housecall_api::resources::jobs::GetJobsArgs;
use housecall_api::{ApiError, ClientConfig, HousecallClient};
use housecall_test_support::{MockResponse, MockUpstream};
use serde_json::json;
use std::time::Duration;

fn client_for(mock: &MockUpstream) -> anyhow::Result<HousecallClient> {
    let cfg = ClientConfig::new("test-key")?.with_base_url(mock.base_url());
    Ok(HousecallClient::new(&cfg)?)
}

#[tokio::test]
async fn sends_token_auth_and_json_headers() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let client = client_for(&mock)?;

    client.get_jobs(&GetJobsArgs::default()).await?;

    let req = mock.last_request().context("request recorded")?;
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/jobs");
    assert!(req.query.is_empty());
    assert_eq!(req.header("authorization"), Some("Token test-key"));
    assert_eq!(req.header("accept"), Some("application/json"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    Ok(())
}

#[tokio::test]
async fn success_body_is_passed_through() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let body = json!({"customers": [{"id": "c1"}], "page": 1, "total_pages": 3});
    mock.respond("GET", "/customers", MockResponse::json(200, &body));
    let client = client_for(&mock)?;

    let out = client.get_customers(&Default::default()).await?;
    assert_eq!(out, body);
    Ok(())
}

#[tokio::test]
async fn empty_success_body_becomes_empty_object() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond_all(MockResponse::empty(204));
    let client = client_for(&mock)?;

    let out = client
        .delete_webhook_subscription(&housecall_api::resources::webhooks::WebhookIdArgs {
            webhook_id: "wh_1".to_string(),
        })
        .await?;
    assert_eq!(out, json!({}));
    assert_eq!(mock.requests()[0].method, "DELETE");
    assert_eq!(mock.requests()[0].path, "/webhooks/wh_1");
    Ok(())
}

#[tokio::test]
async fn status_error_carries_code_and_details() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond_all(MockResponse::json(422, &json!({"message": "bad phone"})));
    let client = client_for(&mock)?;

    let err = client
        .create_customer(&CreateCustomerArgs {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            details: CustomerDetails::default(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    let value = err.to_value();
    assert_eq!(value["status_code"], json!(422));
    assert_eq!(value["details"], json!({"message": "bad phone"}));
    assert!(
        value["error"]
            .as_str()
            .is_some_and(|m| m.starts_with("API returned 422"))
    );
    Ok(())
}

#[tokio::test]
async fn customer_not_found_has_friendly_message() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond("GET", "/customers/c_404", MockResponse::text(404, "nope"));
    let client = client_for(&mock)?;

    let err = client
        .get_customer(&CustomerIdArgs {
            customer_id: "c_404".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_value(),
        json!({"error": "Customer c_404 not found", "status_code": 404})
    );
    Ok(())
}

#[tokio::test]
async fn unauthorized_is_reported_with_status() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond_all(MockResponse::json(401, &json!({"error": "invalid token"})));
    let client = client_for(&mock)?;

    let err = client.get_company().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    Ok(())
}

#[tokio::test]
async fn non_json_success_body_is_unexpected() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond_all(MockResponse::text(200, "<html>maintenance</html>"));
    let client = client_for(&mock)?;

    let err = client.get_jobs(&GetJobsArgs::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedResponse(_)));
    Ok(())
}

#[tokio::test]
async fn slow_upstream_times_out() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond_all(MockResponse::json(200, &json!({})).with_delay(Duration::from_secs(3)));
    let cfg = ClientConfig::new("test-key")?
        .with_base_url(mock.base_url())
        .with_timeout(Duration::from_millis(200))?;
    let client = HousecallClient::new(&cfg)?;

    let err = client.get_jobs(&GetJobsArgs::default()).await.unwrap_err();
    match err {
        ApiError::Transport(message) => assert!(message.contains("timed out"), "{message}"),
        other => panic!("expected transport error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() -> anyhow::Result<()> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind probe")?;
        listener.local_addr()?.port()
    };
    let cfg = ClientConfig::new("test-key")?.with_base_url(format!("http://127.0.0.1:{port}"));
    let client = HousecallClient::new(&cfg)?;

    let err = client.get_jobs(&GetJobsArgs::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
    assert!(err.to_value().get("status_code").is_none());
    Ok(())
}
