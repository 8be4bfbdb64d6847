//! `/webhooks` subscriptions.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::safety::require_http_url;
use crate::validate::{require_items, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateWebhookArgs {
    /// Delivery URL; must be http(s).
    pub url: String,
    /// Event types, e.g. `job.created`, `invoice.updated`, `lead.created`.
    pub events: Vec<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WebhookIdArgs {
    pub webhook_id: String,
}

impl HousecallClient {
    /// The URL and event list are checked locally; nothing is sent when they are invalid.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-http(s) URL or an empty event list.
    pub async fn create_webhook_subscription(&self, args: &CreateWebhookArgs) -> Result<Value> {
        let url = require_text("url", &args.url)?;
        require_http_url("url", &url)?;
        require_items("events", &args.events)?;
        let body = Value::Object(params! {
            "url" => Some(url),
            "events" => Some(&args.events),
            "description" => args.description.as_deref().map(str::trim),
            "is_active" => args.is_active,
        });
        self.post(&["webhooks"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_webhook_subscription(&self, args: &WebhookIdArgs) -> Result<Value> {
        let id = require_text("webhook_id", &args.webhook_id)?;
        self.delete(&["webhooks", id.as_str()]).await
    }
}
