//! `/events` polling.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::require_text;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_EVENTS_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetEventsArgs {
    pub page: Option<u32>,
    /// Events per page (max 50).
    pub page_size: Option<u32>,
    /// Only these event IDs.
    pub event_ids: Option<Vec<String>>,
    /// Only events after this ISO 8601 timestamp.
    pub last_polled_at: Option<String>,
    /// e.g. `job.created`.
    pub event_names: Option<Vec<String>>,
    /// e.g. `job`, `customer`.
    pub resource_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EventIdArgs {
    pub event_id: String,
}

fn non_empty(list: Option<&Vec<String>>) -> Option<&Vec<String>> {
    list.filter(|l| !l.is_empty())
}

impl HousecallClient {
    /// List filters are sent comma-joined under the singular key (`id`, `event_name`,
    /// `resource_name`).
    ///
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_events(&self, args: &GetEventsArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_EVENTS_PAGE_SIZE),
            "id" => non_empty(args.event_ids.as_ref()),
            "last_polled_at" => args.last_polled_at.as_ref(),
            "event_name" => non_empty(args.event_names.as_ref()),
            "resource_name" => non_empty(args.resource_names.as_ref()),
        };
        self.get(&["events"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_event_by_id(&self, args: &EventIdArgs) -> Result<Value> {
        let id = require_text("event_id", &args.event_id)?;
        self.get(&["events", id.as_str()], None).await
    }
}
