//! `/appointments`.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::require_text;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const MAX_APPOINTMENTS_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetAppointmentsArgs {
    pub page: Option<u32>,
    /// Results per page (max 200).
    pub page_size: Option<u32>,
    pub customer_id: Option<String>,
    pub employee_id: Option<String>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD
    pub end_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateAppointmentArgs {
    pub customer_id: String,
    pub employee_id: String,
    /// ISO 8601 start time.
    pub start_time: String,
    /// ISO 8601 end time.
    pub end_time: String,
    pub service_id: Option<String>,
    pub notes: Option<String>,
    /// Address object for the appointment.
    pub address: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateAppointmentArgs {
    pub appointment_id: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub employee_id: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AppointmentIdArgs {
    pub appointment_id: String,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_appointments(&self, args: &GetAppointmentsArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_APPOINTMENTS_PAGE_SIZE),
            "customer_id" => args.customer_id.as_ref(),
            "employee_id" => args.employee_id.as_ref(),
            "start_date" => args.start_date.as_ref(),
            "end_date" => args.end_date.as_ref(),
            "status" => args.status.as_ref(),
        };
        self.get(&["appointments"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns a validation error when a required field is blank.
    pub async fn create_appointment(&self, args: &CreateAppointmentArgs) -> Result<Value> {
        let body = Value::Object(params! {
            "customer_id" => Some(require_text("customer_id", &args.customer_id)?),
            "employee_id" => Some(require_text("employee_id", &args.employee_id)?),
            "start_time" => Some(require_text("start_time", &args.start_time)?),
            "end_time" => Some(require_text("end_time", &args.end_time)?),
            "service_id" => args.service_id.as_ref(),
            "notes" => args.notes.as_ref(),
            "address" => args.address.as_ref(),
        });
        self.post(&["appointments"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_appointment(&self, args: &UpdateAppointmentArgs) -> Result<Value> {
        let id = require_text("appointment_id", &args.appointment_id)?;
        let body = Value::Object(params! {
            "start_time" => args.start_time.as_ref(),
            "end_time" => args.end_time.as_ref(),
            "employee_id" => args.employee_id.as_ref(),
            "notes" => args.notes.as_ref(),
            "status" => args.status.as_ref(),
        });
        self.put(&["appointments", id.as_str()], &body).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_appointment(&self, args: &AppointmentIdArgs) -> Result<Value> {
        let id = require_text("appointment_id", &args.appointment_id)?;
        self.delete(&["appointments", id.as_str()]).await
    }
}
