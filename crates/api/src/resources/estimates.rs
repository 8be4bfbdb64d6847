//! `/estimates`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::{require_items, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_ESTIMATES_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetEstimatesArgs {
    pub page: Option<u32>,
    /// Results per page (max 200).
    pub page_size: Option<u32>,
    pub customer_id: Option<String>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateEstimateArgs {
    pub customer_id: String,
    pub employee_id: String,
    /// Line items for the estimate.
    pub line_items: Vec<Value>,
    pub notes: Option<String>,
    pub work_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateEstimateArgs {
    pub estimate_id: String,
    pub notes: Option<String>,
    pub work_status: Option<String>,
    pub line_items: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EstimateIdArgs {
    pub estimate_id: String,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_estimates(&self, args: &GetEstimatesArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_ESTIMATES_PAGE_SIZE),
            "customer_id" => args.customer_id.as_ref(),
            "start_date" => args.start_date.as_ref(),
            "end_date" => args.end_date.as_ref(),
        };
        self.get(&["estimates"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns a validation error when required fields or line items are missing.
    pub async fn create_estimate(&self, args: &CreateEstimateArgs) -> Result<Value> {
        require_items("line_items", &args.line_items)?;
        let body = Value::Object(params! {
            "customer_id" => Some(require_text("customer_id", &args.customer_id)?),
            "employee_id" => Some(require_text("employee_id", &args.employee_id)?),
            "line_items" => Some(&args.line_items),
            "notes" => args.notes.as_ref(),
            "work_status" => args.work_status.as_ref(),
        });
        self.post(&["estimates"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_estimate(&self, args: &UpdateEstimateArgs) -> Result<Value> {
        let id = require_text("estimate_id", &args.estimate_id)?;
        let body = Value::Object(params! {
            "notes" => args.notes.as_ref(),
            "work_status" => args.work_status.as_ref(),
            "line_items" => args.line_items.as_ref(),
        });
        self.put(&["estimates", id.as_str()], &body).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_estimate(&self, args: &EstimateIdArgs) -> Result<Value> {
        let id = require_text("estimate_id", &args.estimate_id)?;
        self.delete(&["estimates", id.as_str()]).await
    }
}
