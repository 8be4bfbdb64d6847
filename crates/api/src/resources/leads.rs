//! `/leads`: listing, nested create/update payloads and conversion to a job.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::{JsonMap, clamp_page_size};
use crate::validate::{require_any_field, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_LEADS_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetLeadsArgs {
    pub page: Option<u32>,
    /// Results per page (max 100).
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    /// `new`, `contacted`, `qualified`, `unqualified` or `converted`.
    pub status: Option<String>,
    pub source: Option<String>,
    pub employee_id: Option<String>,
    pub job_type_id: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LeadIdArgs {
    pub lead_id: String,
}

/// Address and lead details shared by create and update.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct LeadDetails {
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub job_type_id: Option<String>,
    /// Where the lead came from: website, referral, phone, ...
    pub source: Option<String>,
    /// Work needed.
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Employee the lead is assigned to.
    pub employee_id: Option<String>,
    /// `low`, `medium` or `high`.
    pub priority: Option<String>,
    /// Estimated value in dollars.
    pub estimated_value: Option<f64>,
    /// Additional custom fields as key-value pairs.
    pub custom_fields: Option<JsonMap>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateLeadArgs {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    #[serde(flatten)]
    pub details: LeadDetails,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateLeadArgs {
    pub lead_id: String,
    pub status: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    #[serde(flatten)]
    pub details: LeadDetails,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConvertLeadArgs {
    pub lead_id: String,
    pub job_type_id: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    /// ISO 8601 start time.
    pub scheduled_start: Option<String>,
    /// ISO 8601 end time.
    pub scheduled_end: Option<String>,
    pub employee_ids: Option<Vec<String>>,
}

/// `Some(object)` only when at least one field is present.
fn nested(map: JsonMap) -> Option<Value> {
    (!map.is_empty()).then_some(Value::Object(map))
}

fn lead_body(
    customer: JsonMap,
    status: Option<&String>,
    details: &LeadDetails,
) -> JsonMap {
    let address = params! {
        "street" => details.address_street.as_ref(),
        "city" => details.address_city.as_ref(),
        "state" => details.address_state.as_ref(),
        "zip" => details.address_zip.as_ref(),
    };

    params! {
        "status" => status,
        "customer" => nested(customer),
        "address" => nested(address),
        "job_type_id" => details.job_type_id.as_ref(),
        "source" => details.source.as_ref(),
        "description" => details.description.as_ref(),
        "notes" => details.notes.as_ref(),
        "employee_id" => details.employee_id.as_ref(),
        "priority" => details.priority.as_ref(),
        "estimated_value" => details.estimated_value,
        "custom_fields" => details.custom_fields.as_ref().filter(|m| !m.is_empty()),
    }
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_leads(&self, args: &GetLeadsArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_LEADS_PAGE_SIZE),
            "sort_by" => args.sort_by.as_ref(),
            "sort_direction" => args.sort_direction.as_ref(),
            "status" => args.status.as_ref(),
            "source" => args.source.as_ref(),
            "employee_id" => args.employee_id.as_ref(),
            "job_type_id" => args.job_type_id.as_ref(),
            "created_after" => args.created_after.as_ref(),
            "created_before" => args.created_before.as_ref(),
            "updated_after" => args.updated_after.as_ref(),
            "updated_before" => args.updated_before.as_ref(),
            "customer_name" => args.customer_name.as_ref(),
            "customer_email" => args.customer_email.as_ref(),
            "customer_phone" => args.customer_phone.as_ref(),
        };
        self.get(&["leads"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_lead(&self, args: &LeadIdArgs) -> Result<Value> {
        let id = require_text("lead_id", &args.lead_id)?;
        self.get(&["leads", id.as_str()], None).await
    }

    /// Customer contact fields nest under `customer`, address fields under `address`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank customer name.
    pub async fn create_lead(&self, args: &CreateLeadArgs) -> Result<Value> {
        let customer = params! {
            "name" => Some(require_text("customer_name", &args.customer_name)?),
            "phone" => args.customer_phone.as_ref(),
            "email" => args.customer_email.as_ref(),
        };
        let body = lead_body(customer, None, &args.details);
        self.post(&["leads"], Some(&Value::Object(body))).await
    }

    /// # Errors
    ///
    /// Returns a validation error when no field is supplied.
    pub async fn update_lead(&self, args: &UpdateLeadArgs) -> Result<Value> {
        let id = require_text("lead_id", &args.lead_id)?;
        let customer = params! {
            "name" => args.customer_name.as_ref(),
            "phone" => args.customer_phone.as_ref(),
            "email" => args.customer_email.as_ref(),
        };
        let body = lead_body(customer, args.status.as_ref(), &args.details);
        require_any_field(&body)?;
        self.patch(&["leads", id.as_str()], &Value::Object(body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn convert_lead_to_job(&self, args: &ConvertLeadArgs) -> Result<Value> {
        let id = require_text("lead_id", &args.lead_id)?;
        let body = Value::Object(params! {
            "job_type_id" => args.job_type_id.as_ref(),
            "description" => args.description.as_ref(),
            "priority" => args.priority.as_ref(),
            "scheduled_start" => args.scheduled_start.as_ref(),
            "scheduled_end" => args.scheduled_end.as_ref(),
            "employee_ids" => args.employee_ids.as_ref().filter(|ids| !ids.is_empty()),
        });
        self.post(&["leads", id.as_str(), "convert"], Some(&body))
            .await
    }
}
