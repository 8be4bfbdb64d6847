use housecall_api::resources::customers::CustomerAddressArgs;
use housecall_api::resources::invoices::GetJobInvoicesArgs;
use housecall_api::resources::job_types::{CreateJobTypeArgs, JobTypeFields, UpdateJobTypeArgs};
use housecall_api::resources::jobs::DispatchJobArgs;
use housecall_api::resources::lead_sources::UpdateLeadSourceArgs;
use housecall_api::resources::material_categories::UpdateMaterialCategoryArgs;
use housecall_api::resources::price_book::{CreateMaterialArgs, MaterialFields, UpdateMaterialArgs};
use housecall_api::{ApiError, ClientConfig, HousecallClient};
use housecall_test_support::{MockResponse, MockUpstream};
use serde_json::json;

fn client_for(mock: &MockUpstream) -> anyhow::Result<HousecallClient> {
    let cfg = ClientConfig::new("test-key")?.with_base_url(mock.base_url());
    Ok(HousecallClient::new(&cfg)?)
}

fn job_invoices(job_id: &str) -> GetJobInvoicesArgs {
    GetJobInvoicesArgs {
        job_id: job_id.to_string(),
        include_line_items: None,
        include_attachments: None,
        include_payments: None,
        status: None,
    }
}

fn validation(msg: &str) -> ApiError {
    ApiError::Validation(msg.to_string())
}

#[tokio::test]
async fn job_invoice_lookup_names_the_job() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond("GET", "/jobs/j404/invoices", MockResponse::json(404, &json!({})));
    mock.respond("GET", "/jobs/j1/invoices", MockResponse::json(403, &json!({})));
    let client = client_for(&mock)?;

    let err = client.get_job_invoices(&job_invoices("j404")).await.unwrap_err();
    assert_eq!(
        err.to_value(),
        json!({"error": "Job with ID 'j404' not found", "status_code": 404})
    );

    let err = client.get_job_invoices(&job_invoices("j1")).await.unwrap_err();
    assert_eq!(
        err.to_value(),
        json!({"error": "Access denied to job 'j1' - check permissions", "status_code": 403})
    );
    Ok(())
}

#[tokio::test]
async fn missing_customer_address_names_both_ids() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond(
        "GET",
        "/customers/c1/addresses/a9",
        MockResponse::json(404, &json!({"message": "nope"})),
    );
    let client = client_for(&mock)?;

    let err = client
        .get_customer_address(&CustomerAddressArgs {
            customer_id: "c1".to_string(),
            address_id: "a9".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Address a9 not found for customer c1");
    Ok(())
}

#[tokio::test]
async fn job_type_conflicts_and_missing_ids_are_explained() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    mock.respond("POST", "/job_types", MockResponse::json(409, &json!({})));
    mock.respond("PUT", "/job_types/jt404", MockResponse::json(404, &json!({})));
    mock.respond("PUT", "/job_types/jt1", MockResponse::json(409, &json!({})));
    let client = client_for(&mock)?;

    let err = client
        .create_job_type(&CreateJobTypeArgs {
            name: " Repair ".to_string(),
            fields: JobTypeFields::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_value(),
        json!({"error": "Job type with name 'Repair' already exists", "status_code": 409})
    );

    let rename = |id: &str| UpdateJobTypeArgs {
        job_type_id: id.to_string(),
        name: Some("Install".to_string()),
        fields: JobTypeFields::default(),
    };
    let err = client.update_job_type(&rename("jt404")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Job type with ID 'jt404' not found");

    let err = client.update_job_type(&rename("jt1")).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Conflict - job type name may already exist");
    Ok(())
}

#[tokio::test]
async fn material_checks_run_before_sending() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let client = client_for(&mock)?;

    let create = |sku: &str, price: f64, cost: Option<f64>| CreateMaterialArgs {
        name: "Copper pipe".to_string(),
        sku: sku.to_string(),
        price,
        fields: MaterialFields {
            cost,
            ..Default::default()
        },
    };
    let err = client.create_material(&create("CP-1", -1.0, None)).await.unwrap_err();
    assert_eq!(err, validation("price cannot be negative"));
    let err = client.create_material(&create("CP-1", 4.5, Some(-0.5))).await.unwrap_err();
    assert_eq!(err, validation("cost cannot be negative"));
    let err = client.create_material(&create("  ", 4.5, None)).await.unwrap_err();
    assert_eq!(err, validation("sku is required"));

    let update = |sku: Option<&str>, price: Option<f64>| UpdateMaterialArgs {
        material_id: "m1".to_string(),
        name: None,
        sku: sku.map(str::to_string),
        price,
        fields: MaterialFields::default(),
    };
    let err = client.update_material(&update(None, Some(-2.0))).await.unwrap_err();
    assert_eq!(err, validation("price cannot be negative"));
    let err = client.update_material(&update(Some(" "), None)).await.unwrap_err();
    assert_eq!(err, validation("sku cannot be empty"));
    let err = client.update_material(&update(None, None)).await.unwrap_err();
    assert_eq!(err, validation("At least one field must be provided for update"));

    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn lead_source_and_category_updates_need_a_real_change() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let client = client_for(&mock)?;

    let lead_source = |name: Option<&str>| UpdateLeadSourceArgs {
        lead_source_id: "ls1".to_string(),
        name: name.map(str::to_string),
        is_active: None,
    };
    let err = client.update_lead_source(&lead_source(Some("  "))).await.unwrap_err();
    assert_eq!(err, validation("name cannot be empty"));
    let err = client.update_lead_source(&lead_source(None)).await.unwrap_err();
    assert_eq!(err, validation("At least one field must be provided for update"));

    let category = |name: Option<&str>| UpdateMaterialCategoryArgs {
        category_id: "mc1".to_string(),
        name: name.map(str::to_string),
        description: None,
        is_active: None,
    };
    let err = client.update_material_category(&category(Some(""))).await.unwrap_err();
    assert_eq!(err, validation("name cannot be empty"));
    let err = client.update_material_category(&category(None)).await.unwrap_err();
    assert_eq!(err, validation("At least one field must be provided for update"));

    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn dispatch_requires_at_least_one_employee() -> anyhow::Result<()> {
    let mock = MockUpstream::start().await?;
    let client = client_for(&mock)?;

    let err = client
        .dispatch_job_to_employees(&DispatchJobArgs {
            job_id: "job_1".to_string(),
            employee_ids: Vec::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, validation("employee_ids must contain at least one item"));
    assert!(mock.requests().is_empty());
    Ok(())
}
