//! Price-book materials and their category tree under `/api/price_book`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::{optional_text, require_any_field, require_non_negative, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

pub const MAX_MATERIALS_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PriceBookCategoriesArgs {
    /// Parent category UUID; omit for root-level categories.
    pub parent_uuid: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindCategoryArgs {
    /// Case-insensitive substring of the category name.
    pub category_name: String,
    /// Parent category UUID; omit to search the root level.
    pub parent_uuid: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetMaterialsArgs {
    /// Category whose materials are listed.
    pub material_category_uuid: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MaterialFields {
    /// Cost to the business; must not be negative.
    pub cost: Option<f64>,
    pub description: Option<String>,
    /// Unit of measure, e.g. `each`, `ft`.
    pub unit: Option<String>,
    pub is_active: Option<bool>,
    pub is_taxable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateMaterialArgs {
    pub name: String,
    pub sku: String,
    /// Sale price; must not be negative.
    pub price: f64,
    #[serde(flatten)]
    pub fields: MaterialFields,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateMaterialArgs {
    pub material_id: String,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    #[serde(flatten)]
    pub fields: MaterialFields,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MaterialIdArgs {
    pub material_id: String,
}

/// Pick the first category in `data[]` whose name contains `needle`, ignoring case.
#[must_use]
pub fn find_category(categories: &Value, needle: &str, parent_uuid: Option<&str>) -> Value {
    let lowered = needle.to_lowercase();
    let hit = categories
        .get("data")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find(|c| {
            c.get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.to_lowercase().contains(&lowered))
        });

    match hit {
        Some(category) => json!({
            "found": true,
            "category": category,
            "uuid": category.get("uuid"),
            "name": category.get("name"),
            "parent_uuid": parent_uuid,
        }),
        None => {
            let scope = parent_uuid.map_or_else(
                || " at root level".to_string(),
                |p| format!(" under parent {p}"),
            );
            json!({
                "found": false,
                "message": format!("No category found containing '{needle}'{scope}"),
            })
        }
    }
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_price_book_material_categories(
        &self,
        args: &PriceBookCategoriesArgs,
    ) -> Result<Value> {
        let parent = args
            .parent_uuid
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let query = params! { "parent_uuid" => parent };
        self.get(&["api", "price_book", "material_categories"], Some(&query))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error when the category listing fails.
    pub async fn find_category_by_name(&self, args: &FindCategoryArgs) -> Result<Value> {
        let needle = require_text("category_name", &args.category_name)?;
        let listing = self
            .get_price_book_material_categories(&PriceBookCategoriesArgs {
                parent_uuid: args.parent_uuid.clone(),
            })
            .await?;
        let parent = args
            .parent_uuid
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        Ok(find_category(&listing, &needle, parent))
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank category UUID.
    pub async fn get_materials(&self, args: &GetMaterialsArgs) -> Result<Value> {
        let query = params! {
            "material_category_uuid" => Some(require_text("material_category_uuid", &args.material_category_uuid)?),
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_MATERIALS_PAGE_SIZE),
            "name" => args.name.as_deref().map(str::trim),
            "sku" => args.sku.as_deref().map(str::trim),
            "is_active" => args.is_active,
        };
        self.get(&["api", "price_book", "materials"], Some(&query))
            .await
    }

    /// # Errors
    ///
    /// Returns a validation error for blank name/SKU or negative price/cost.
    pub async fn create_material(&self, args: &CreateMaterialArgs) -> Result<Value> {
        let name = require_text("name", &args.name)?;
        let sku = require_text("sku", &args.sku)?;
        require_non_negative("price", Some(args.price))?;
        require_non_negative("cost", args.fields.cost)?;
        let f = &args.fields;
        let body = Value::Object(params! {
            "name" => Some(name),
            "sku" => Some(sku),
            "price" => Some(args.price),
            "cost" => f.cost,
            "description" => f.description.as_deref().map(str::trim),
            "unit" => f.unit.as_deref().map(str::trim),
            "is_active" => f.is_active,
            "is_taxable" => f.is_taxable,
        });
        self.post(&["api", "price_book", "materials"], Some(&body))
            .await
    }

    /// # Errors
    ///
    /// Returns a validation error for blank name/SKU, negative price/cost, or an empty update.
    pub async fn update_material(&self, args: &UpdateMaterialArgs) -> Result<Value> {
        let id = require_text("material_id", &args.material_id)?;
        require_non_negative("price", args.price)?;
        require_non_negative("cost", args.fields.cost)?;
        let f = &args.fields;
        let body = params! {
            "name" => optional_text("name", args.name.as_deref())?,
            "sku" => optional_text("sku", args.sku.as_deref())?,
            "price" => args.price,
            "cost" => f.cost,
            "description" => f.description.as_deref().map(str::trim),
            "unit" => f.unit.as_deref().map(str::trim),
            "is_active" => f.is_active,
            "is_taxable" => f.is_taxable,
        };
        require_any_field(&body)?;
        self.put(
            &["api", "price_book", "materials", id.as_str()],
            &Value::Object(body),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_material(&self, args: &MaterialIdArgs) -> Result<Value> {
        let id = require_text("material_id", &args.material_id)?;
        self.delete(&["api", "price_book", "materials", id.as_str()])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::find_category;
    use serde_json::json;

    fn listing() -> serde_json::Value {
        json!({"data": [
            {"uuid": "c1", "name": "Plumbing Supplies"},
            {"uuid": "c2", "name": "Electrical"},
        ]})
    }

    #[test]
    fn matches_case_insensitive_substring() {
        let out = find_category(&listing(), "plumb", None);
        assert_eq!(out["found"], json!(true));
        assert_eq!(out["uuid"], json!("c1"));
        assert_eq!(out["name"], json!("Plumbing Supplies"));
        assert_eq!(out["parent_uuid"], json!(null));
    }

    #[test]
    fn miss_reports_scope() {
        let root = find_category(&listing(), "hvac", None);
        assert_eq!(root["found"], json!(false));
        assert_eq!(
            root["message"],
            json!("No category found containing 'hvac' at root level")
        );

        let nested = find_category(&listing(), "hvac", Some("p9"));
        assert_eq!(
            nested["message"],
            json!("No category found containing 'hvac' under parent p9")
        );
    }

    #[test]
    fn missing_data_array_is_a_miss() {
        let out = find_category(&json!({}), "x", None);
        assert_eq!(out["found"], json!(false));
    }
}
