//! `/lead_sources`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::{optional_text, require_any_field, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_LEAD_SOURCES_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetLeadSourcesArgs {
    pub page: Option<u32>,
    /// Results per page (max 200).
    pub page_size: Option<u32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateLeadSourceArgs {
    pub name: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateLeadSourceArgs {
    pub lead_source_id: String,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_lead_sources(&self, args: &GetLeadSourcesArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_LEAD_SOURCES_PAGE_SIZE),
            "is_active" => args.is_active,
        };
        self.get(&["lead_sources"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub async fn create_lead_source(&self, args: &CreateLeadSourceArgs) -> Result<Value> {
        let body = Value::Object(params! {
            "name" => Some(require_text("name", &args.name)?),
            "is_active" => args.is_active,
        });
        self.post(&["lead_sources"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank name or an empty update.
    pub async fn update_lead_source(&self, args: &UpdateLeadSourceArgs) -> Result<Value> {
        let id = require_text("lead_source_id", &args.lead_source_id)?;
        let body = params! {
            "name" => optional_text("name", args.name.as_deref())?,
            "is_active" => args.is_active,
        };
        require_any_field(&body)?;
        self.put(&["lead_sources", id.as_str()], &Value::Object(body))
            .await
    }
}
