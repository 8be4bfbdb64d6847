//! The tool surface: one entry per Housecall Pro operation.
//!
//! Each entry names the client method it calls (the tool name is the method name), the
//! argument type (which also provides the advertised JSON schema) and the HTTP method used to
//! derive MCP annotations.

use housecall_api::resources::appointments::{
    AppointmentIdArgs, CreateAppointmentArgs, GetAppointmentsArgs, UpdateAppointmentArgs,
};
use housecall_api::resources::customers::{
    CreateCustomerAddressArgs, CreateCustomerArgs, CustomerAddressArgs, CustomerIdArgs,
    GetCustomersArgs, UpdateCustomerArgs,
};
use housecall_api::resources::employees::{
    ActiveEmployeesArgs, EmployeesByRoleArgs, GetEmployeeArgs, GetEmployeesArgs,
    MobileEmployeesArgs, SearchEmployeesArgs,
};
use housecall_api::resources::estimates::{
    CreateEstimateArgs, EstimateIdArgs, GetEstimatesArgs, UpdateEstimateArgs,
};
use housecall_api::resources::events::{EventIdArgs, GetEventsArgs};
use housecall_api::resources::invoices::{
    AddInvoiceAttachmentArgs, AddInvoiceLineItemArgs, CreateInvoiceArgs, DownloadInvoiceArgs,
    GetInvoiceArgs, GetInvoicesArgs, GetJobInvoicesArgs, InvoiceIdArgs, InvoiceLineItemArgs,
    MarkInvoicePaidArgs, QueryInvoicesArgs, SendInvoiceArgs, UpdateInvoiceArgs,
    UpdateInvoiceLineItemArgs, VoidInvoiceArgs,
};
use housecall_api::resources::job_types::{
    CreateJobTypeArgs, GetJobTypesArgs, JobTypeIdArgs, UpdateJobTypeArgs,
};
use housecall_api::resources::jobs::{
    AddJobAttachmentArgs, AddJobLineItemArgs, AddJobNoteArgs, BulkUpdateJobInputMaterialsArgs,
    BulkUpdateJobLineItemsArgs, CreateJobArgs, CreateJobLinkArgs, DispatchJobArgs, GetJobsArgs,
    JobIdArgs, JobLineItemArgs, JobNoteArgs, JobTagArgs, UpdateJobLineItemArgs,
    UpdateJobScheduleArgs,
};
use housecall_api::resources::lead_sources::{
    CreateLeadSourceArgs, GetLeadSourcesArgs, UpdateLeadSourceArgs,
};
use housecall_api::resources::leads::{
    ConvertLeadArgs, CreateLeadArgs, GetLeadsArgs, LeadIdArgs, UpdateLeadArgs,
};
use housecall_api::resources::material_categories::{
    CreateMaterialCategoryArgs, GetMaterialCategoriesArgs, MaterialCategoryIdArgs,
    UpdateMaterialCategoryArgs,
};
use housecall_api::resources::price_book::{
    CreateMaterialArgs, FindCategoryArgs, GetMaterialsArgs, MaterialIdArgs,
    PriceBookCategoriesArgs, UpdateMaterialArgs,
};
use housecall_api::resources::price_forms::CreatePriceFormArgs;
use housecall_api::resources::schedule::{
    BookingWindowsArgs, ScheduleWindowsArgs, UpdateScheduleWindowsArgs,
};
use housecall_api::resources::tags::{CreateTagArgs, GetTagsArgs, UpdateTagArgs};
use housecall_api::resources::webhooks::{CreateWebhookArgs, WebhookIdArgs};
use housecall_api::{ApiError, ApiMethod, HousecallClient};
use rmcp::handler::server::common::schema_for_type;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Arguments of tools that take none. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

/// Static description of one tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub method: ApiMethod,
    schema: fn() -> Arc<JsonObject>,
}

impl ToolSpec {
    #[must_use]
    pub fn input_schema(&self) -> Arc<JsonObject> {
        (self.schema)()
    }

    #[must_use]
    pub fn to_tool(&self) -> Tool {
        let mut tool = Tool::new(self.name, self.description, self.input_schema());
        tool.annotations = Some(self.method.annotations());
        tool
    }
}

/// What a tool produced on success.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Json(Value),
    Text(String),
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for ToolOutput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl ToolOutput {
    #[must_use]
    pub fn into_call_result(self) -> CallToolResult {
        let text = match self {
            Self::Text(text) => text,
            Self::Json(body) => {
                serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
            }
        };
        CallToolResult::success(vec![Content::text(text)])
    }
}

/// Render a normalized error as an `isError` tool result.
#[must_use]
pub fn error_result(err: &ApiError) -> CallToolResult {
    let body = err.to_value();
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    CallToolResult::error(vec![Content::text(text)])
}

/// Decode tool arguments; absent arguments decode like `{}`.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when the arguments do not match the tool's schema.
pub fn parse_args<T: DeserializeOwned>(arguments: Option<JsonObject>) -> housecall_api::Result<T> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| ApiError::validation(format!("Invalid arguments: {e}")))
}

macro_rules! tool_catalog {
    (@call $client:ident, $name:ident, NoArgs, $arguments:ident) => {
        match parse_args::<NoArgs>($arguments) {
            Ok(_) => $client.$name().await.map(ToolOutput::from),
            Err(e) => Err(e),
        }
    };
    (@call $client:ident, $name:ident, $args:ident, $arguments:ident) => {
        match parse_args::<$args>($arguments) {
            Ok(args) => $client.$name(&args).await.map(ToolOutput::from),
            Err(e) => Err(e),
        }
    };
    ($($name:ident($args:ident) $method:ident: $description:literal;)+) => {
        /// Every tool, in advertised order.
        pub const TOOL_SPECS: &[ToolSpec] = &[
            $(ToolSpec {
                name: stringify!($name),
                description: $description,
                method: ApiMethod::$method,
                schema: schema_for_type::<$args>,
            },)+
        ];

        async fn dispatch(
            client: &HousecallClient,
            name: &str,
            arguments: Option<JsonObject>,
        ) -> Option<housecall_api::Result<ToolOutput>> {
            let result = match name {
                $(stringify!($name) => tool_catalog!(@call client, $name, $args, arguments),)+
                _ => return None,
            };
            Some(result)
        }
    };
}

tool_catalog! {
    // customers
    get_customers(GetCustomersArgs) Get: "List customers with optional search, contact, tag and date filters.";
    get_customer(CustomerIdArgs) Get: "Get a single customer by ID.";
    create_customer(CreateCustomerArgs) Post: "Create a customer.";
    update_customer(UpdateCustomerArgs) Put: "Update an existing customer.";
    get_customer_addresses(CustomerIdArgs) Get: "List all addresses for a customer.";
    get_customer_address(CustomerAddressArgs) Get: "Get one address of a customer.";
    create_customer_address(CreateCustomerAddressArgs) Post: "Add an address to a customer.";

    // jobs
    get_jobs(GetJobsArgs) Get: "List jobs with optional customer, employee, status, tag and date filters.";
    get_job_by_id(JobIdArgs) Get: "Get a single job by ID.";
    create_job(CreateJobArgs) Post: "Create a job for a customer.";
    add_job_attachment(AddJobAttachmentArgs) Post: "Upload a base64-encoded file to a job.";
    get_job_line_items(JobIdArgs) Get: "List the line items of a job.";
    add_job_line_item(AddJobLineItemArgs) Post: "Add a line item to a job.";
    bulk_update_job_line_items(BulkUpdateJobLineItemsArgs) Put: "Replace or update several job line items at once.";
    update_job_line_item(UpdateJobLineItemArgs) Put: "Update one job line item.";
    delete_job_line_item(JobLineItemArgs) Delete: "Delete one job line item.";
    update_job_schedule(UpdateJobScheduleArgs) Put: "Set the schedule window (and optionally the crew) of a job.";
    delete_job_schedule(JobIdArgs) Delete: "Remove the schedule from a job.";
    dispatch_job_to_employees(DispatchJobArgs) Post: "Dispatch a job to one or more employees.";
    get_job_input_materials(JobIdArgs) Get: "List the input materials of a job.";
    bulk_update_job_input_materials(BulkUpdateJobInputMaterialsArgs) Put: "Update several job input materials at once.";
    add_job_tag(JobTagArgs) Post: "Add a tag to a job.";
    remove_job_tag(JobTagArgs) Delete: "Remove a tag from a job.";
    add_job_note(AddJobNoteArgs) Post: "Add a note to a job.";
    delete_job_note(JobNoteArgs) Delete: "Delete a note from a job.";
    create_job_link(CreateJobLinkArgs) Post: "Attach an http(s) link to a job.";

    // invoices
    get_job_invoices(GetJobInvoicesArgs) Get: "List the invoices of a job.";
    get_invoices(GetInvoicesArgs) Get: "List invoices with optional customer, status and date filters.";
    query_invoices(QueryInvoicesArgs) Get: "Query invoices through the /v1/invoices endpoint (number, job and paid-date filters).";
    get_invoice_by_id(GetInvoiceArgs) Get: "Get a single invoice by ID.";
    create_invoice(CreateInvoiceArgs) Post: "Create an invoice for a job.";
    update_invoice(UpdateInvoiceArgs) Patch: "Update an invoice.";
    send_invoice(SendInvoiceArgs) Post: "Send an invoice to the customer.";
    void_invoice(VoidInvoiceArgs) Post: "Void an invoice.";
    mark_invoice_paid(MarkInvoicePaidArgs) Post: "Record a payment against an invoice.";
    get_invoice_payments(InvoiceIdArgs) Get: "List payments recorded for an invoice.";
    download_invoice_pdf(DownloadInvoiceArgs) Get: "Download an invoice; binary documents are returned base64-encoded.";
    get_invoice_line_items(InvoiceIdArgs) Get: "List the line items of an invoice.";
    add_invoice_line_item(AddInvoiceLineItemArgs) Post: "Add a line item to an invoice.";
    update_invoice_line_item(UpdateInvoiceLineItemArgs) Patch: "Update one invoice line item.";
    delete_invoice_line_item(InvoiceLineItemArgs) Delete: "Delete one invoice line item.";
    get_invoice_attachments(InvoiceIdArgs) Get: "List the attachments of an invoice.";
    add_invoice_attachment(AddInvoiceAttachmentArgs) Post: "Attach a base64-encoded file to an invoice.";

    // estimates
    get_estimates(GetEstimatesArgs) Get: "List estimates.";
    create_estimate(CreateEstimateArgs) Post: "Create an estimate.";
    update_estimate(UpdateEstimateArgs) Put: "Update an estimate.";
    delete_estimate(EstimateIdArgs) Delete: "Delete an estimate.";

    // appointments
    get_appointments(GetAppointmentsArgs) Get: "List appointments.";
    create_appointment(CreateAppointmentArgs) Post: "Create an appointment.";
    update_appointment(UpdateAppointmentArgs) Put: "Update an appointment.";
    delete_appointment(AppointmentIdArgs) Delete: "Delete an appointment.";

    // employees
    get_employees(GetEmployeesArgs) Get: "List employees with optional role, status and tag filters.";
    get_employee_by_id(GetEmployeeArgs) Get: "Get a single employee by ID.";
    search_employees(SearchEmployeesArgs) Get: "Search employees by name, email or phone.";
    get_employees_by_role(EmployeesByRoleArgs) Get: "List employees with a given role.";
    get_active_employees(ActiveEmployeesArgs) Get: "List active employees.";
    get_mobile_employees(MobileEmployeesArgs) Get: "List employees who use the mobile app.";
    summarize_employees(NoArgs) Get: "Summarize the roster: totals, active/inactive, mobile users and counts per role.";

    // leads
    get_leads(GetLeadsArgs) Get: "List leads with optional status, source and date filters.";
    get_lead(LeadIdArgs) Get: "Get a single lead by ID.";
    create_lead(CreateLeadArgs) Post: "Create a lead.";
    update_lead(UpdateLeadArgs) Patch: "Update a lead.";
    convert_lead_to_job(ConvertLeadArgs) Post: "Convert a lead into a job.";

    // lead sources
    get_lead_sources(GetLeadSourcesArgs) Get: "List lead sources.";
    create_lead_source(CreateLeadSourceArgs) Post: "Create a lead source.";
    update_lead_source(UpdateLeadSourceArgs) Put: "Update a lead source.";

    // job types
    get_job_types(GetJobTypesArgs) Get: "List job types.";
    create_job_type(CreateJobTypeArgs) Post: "Create a job type.";
    update_job_type(UpdateJobTypeArgs) Put: "Update a job type.";
    get_job_type_by_id(JobTypeIdArgs) Get: "Get a single job type by ID.";

    // price book
    get_price_book_material_categories(PriceBookCategoriesArgs) Get: "List price-book material categories, optionally under a parent.";
    find_category_by_name(FindCategoryArgs) Get: "Find a price-book category whose name contains the given text (case-insensitive).";
    get_materials(GetMaterialsArgs) Get: "List price-book materials in a category.";
    create_material(CreateMaterialArgs) Post: "Create a price-book material.";
    update_material(UpdateMaterialArgs) Put: "Update a price-book material.";
    delete_material(MaterialIdArgs) Delete: "Delete a price-book material.";

    // material categories
    get_material_categories(GetMaterialCategoriesArgs) Get: "List material categories.";
    create_material_category(CreateMaterialCategoryArgs) Post: "Create a material category.";
    update_material_category(UpdateMaterialCategoryArgs) Put: "Update a material category.";
    delete_material_category(MaterialCategoryIdArgs) Delete: "Delete a material category.";

    // price forms
    create_price_form(CreatePriceFormArgs) Post: "Create a price form for a lead.";

    // schedule
    get_schedule_windows(ScheduleWindowsArgs) Get: "Get schedule availability windows for a date range.";
    update_schedule_windows(UpdateScheduleWindowsArgs) Put: "Replace schedule availability windows.";
    get_booking_windows(BookingWindowsArgs) Get: "Get online booking windows for an address and services.";

    // tags
    get_tags(GetTagsArgs) Get: "List tags.";
    create_tag(CreateTagArgs) Post: "Create a tag.";
    update_tag(UpdateTagArgs) Put: "Update a tag.";

    // webhooks
    create_webhook_subscription(CreateWebhookArgs) Post: "Subscribe an http(s) URL to webhook events.";
    delete_webhook_subscription(WebhookIdArgs) Delete: "Delete a webhook subscription.";

    // events
    get_events(GetEventsArgs) Get: "Poll account events.";
    get_event_by_id(EventIdArgs) Get: "Get a single event by ID.";

    // company and application
    get_company(NoArgs) Get: "Get the company profile.";
    get_application(NoArgs) Get: "Get the state of this application (integration).";
    enable_application(NoArgs) Post: "Enable this application for the company.";
    disable_application(NoArgs) Post: "Disable this application for the company.";
}

/// Tools bound to a client.
#[derive(Clone)]
pub struct ToolCatalog {
    client: HousecallClient,
    tools: Arc<Vec<Tool>>,
}

impl ToolCatalog {
    #[must_use]
    pub fn new(client: HousecallClient) -> Self {
        let tools = TOOL_SPECS.iter().map(ToolSpec::to_tool).collect();
        Self {
            client,
            tools: Arc::new(tools),
        }
    }

    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Run a tool. `None` means the tool does not exist; API and validation failures come back
    /// as `isError` results carrying the normalized error mapping.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> Option<CallToolResult> {
        let started = Instant::now();
        let outcome = dispatch(&self.client, name, arguments).await?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        Some(match outcome {
            Ok(output) => {
                tracing::debug!(tool = name, elapsed_ms, "tool call succeeded");
                output.into_call_result()
            }
            Err(err) => {
                tracing::warn!(
                    tool = name,
                    elapsed_ms,
                    status = err.status(),
                    error = %err,
                    "tool call failed"
                );
                error_result(&err)
            }
        })
    }
}

impl std::fmt::Debug for ToolCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCatalog")
            .field("client", &self.client)
            .field("tools", &self.tools.len())
            .finish()
    }
}
