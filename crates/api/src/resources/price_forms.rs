//! `/price_forms`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::validate::require_text;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePriceFormArgs {
    pub lead_id: String,
    pub customer_name: String,
    pub customer_phone_number: Option<String>,
    pub customer_email: Option<String>,
    /// Line items to include.
    pub line_items: Option<Vec<Value>>,
    /// YYYY-MM-DD
    pub expiration_date: Option<String>,
    pub notes: Option<String>,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Status errors are prefixed with `Failed to create price form` and prefer the upstream
    /// `message` field.
    pub async fn create_price_form(&self, args: &CreatePriceFormArgs) -> Result<Value> {
        let body = Value::Object(params! {
            "lead_id" => Some(require_text("lead_id", &args.lead_id)?),
            "customer_name" => Some(require_text("customer_name", &args.customer_name)?),
            "customer_phone_number" => args.customer_phone_number.as_deref().map(str::trim),
            "customer_email" => args.customer_email.as_deref().map(str::trim),
            "line_items" => args.line_items.as_ref(),
            "expiration_date" => args.expiration_date.as_ref(),
            "notes" => args.notes.as_deref().map(str::trim),
        });
        self.post(&["price_forms"], Some(&body)).await.map_err(|e| {
            let status = e.status();
            let upstream = e.upstream_message().map(str::to_string);
            match (status, upstream) {
                (Some(code), Some(message)) => e.on_status(code, || {
                    format!("Failed to create price form: {message}")
                }),
                _ => e.with_prefix("Failed to create price form"),
            }
        })
    }
}
