//! Schedule availability and booking windows under `/schedules`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::validate::{require_items, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScheduleWindowsArgs {
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateScheduleWindowsArgs {
    /// Schedule window objects to store.
    pub windows: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BookingWindowsArgs {
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
    /// Service address.
    pub address: String,
    /// Services to book; sent comma-joined.
    pub service_ids: Vec<String>,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_schedule_windows(&self, args: &ScheduleWindowsArgs) -> Result<Value> {
        let query = params! {
            "start_date" => Some(require_text("start_date", &args.start_date)?),
            "end_date" => Some(require_text("end_date", &args.end_date)?),
        };
        self.get(&["schedules", "windows"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_schedule_windows(&self, args: &UpdateScheduleWindowsArgs) -> Result<Value> {
        let body = json!({ "windows": args.windows });
        self.put(&["schedules", "windows"], &body).await
    }

    /// # Errors
    ///
    /// Returns a validation error when no service IDs are given.
    pub async fn get_booking_windows(&self, args: &BookingWindowsArgs) -> Result<Value> {
        require_items("service_ids", &args.service_ids)?;
        let query = params! {
            "start_date" => Some(require_text("start_date", &args.start_date)?),
            "end_date" => Some(require_text("end_date", &args.end_date)?),
            "address" => Some(require_text("address", &args.address)?),
            "service_ids" => Some(&args.service_ids),
        };
        self.get(&["schedules", "booking-windows"], Some(&query))
            .await
    }
}
