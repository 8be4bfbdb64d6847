//! `/material_categories`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::{optional_text, require_any_field, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_MATERIAL_CATEGORIES_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetMaterialCategoriesArgs {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateMaterialCategoryArgs {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateMaterialCategoryArgs {
    pub category_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MaterialCategoryIdArgs {
    pub category_id: String,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_material_categories(&self, args: &GetMaterialCategoriesArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_MATERIAL_CATEGORIES_PAGE_SIZE),
            "name" => args.name.as_ref(),
            "is_active" => args.is_active,
        };
        self.get(&["material_categories"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub async fn create_material_category(
        &self,
        args: &CreateMaterialCategoryArgs,
    ) -> Result<Value> {
        let body = Value::Object(params! {
            "name" => Some(require_text("name", &args.name)?),
            "description" => args.description.as_deref().map(str::trim),
            "is_active" => args.is_active,
        });
        self.post(&["material_categories"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank name or an empty update.
    pub async fn update_material_category(
        &self,
        args: &UpdateMaterialCategoryArgs,
    ) -> Result<Value> {
        let id = require_text("category_id", &args.category_id)?;
        let body = params! {
            "name" => optional_text("name", args.name.as_deref())?,
            "description" => args.description.as_deref().map(str::trim),
            "is_active" => args.is_active,
        };
        require_any_field(&body)?;
        self.put(&["material_categories", id.as_str()], &Value::Object(body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_material_category(&self, args: &MaterialCategoryIdArgs) -> Result<Value> {
        let id = require_text("category_id", &args.category_id)?;
        self.delete(&["material_categories", id.as_str()]).await
    }
}
