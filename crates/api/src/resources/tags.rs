//! `/tags`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::{optional_text, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_TAGS_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetTagsArgs {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    /// e.g. `customer`, `job`.
    pub tag_type: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTagArgs {
    pub name: String,
    pub tag_type: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTagArgs {
    pub tag_id: String,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_tags(&self, args: &GetTagsArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_TAGS_PAGE_SIZE),
            "name" => args.name.as_ref(),
            "tag_type" => args.tag_type.as_ref(),
            "is_active" => args.is_active,
        };
        self.get(&["tags"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank name or type.
    pub async fn create_tag(&self, args: &CreateTagArgs) -> Result<Value> {
        let body = Value::Object(params! {
            "name" => Some(require_text("name", &args.name)?),
            "tag_type" => Some(require_text("tag_type", &args.tag_type)?),
            "is_active" => args.is_active,
        });
        self.post(&["tags"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_tag(&self, args: &UpdateTagArgs) -> Result<Value> {
        let id = require_text("tag_id", &args.tag_id)?;
        let body = Value::Object(params! {
            "name" => optional_text("name", args.name.as_deref())?,
            "is_active" => args.is_active,
        });
        self.put(&["tags", id.as_str()], &body).await
    }
}
