//! `/job_types`, with friendlier messages for the common failure statuses.

use crate::client::HousecallClient;
use crate::error::{ApiError, Result};
use crate::params;
use crate::params::{JsonMap, clamp_page_size};
use crate::validate::{optional_text, require_any_field, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_JOB_TYPES_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetJobTypesArgs {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    /// Filter by active status.
    pub active: Option<bool>,
    /// Filter by name (partial match).
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct JobTypeFields {
    /// Hex color code, e.g. `#FF5733`.
    pub color: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub default_duration_hours: Option<f64>,
    pub requires_technician: Option<bool>,
    pub default_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateJobTypeArgs {
    pub name: String,
    #[serde(flatten)]
    pub fields: JobTypeFields,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateJobTypeArgs {
    pub job_type_id: String,
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: JobTypeFields,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JobTypeIdArgs {
    pub job_type_id: String,
}

fn job_type_body(name: Option<String>, f: &JobTypeFields) -> JsonMap {
    params! {
        "name" => name,
        "color" => f.color.as_ref(),
        "description" => f.description.as_ref(),
        "active" => f.active,
        "default_duration_hours" => f.default_duration_hours,
        "requires_technician" => f.requires_technician,
        "default_price" => f.default_price,
    }
}

fn bad_request_message(err: ApiError) -> ApiError {
    match err {
        ApiError::Status {
            status: 400,
            details,
            ..
        } => {
            let body = match &details {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            ApiError::Status {
                status: 400,
                message: format!("Bad request - check your input data: {body}"),
                details,
            }
        }
        other => other,
    }
}

impl HousecallClient {
    /// # Errors
    ///
    /// 401/403 are reported with the shared access wording.
    pub async fn get_job_types(&self, args: &GetJobTypesArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_JOB_TYPES_PAGE_SIZE),
            "sort_by" => args.sort_by.as_ref(),
            "sort_direction" => args.sort_direction.as_ref(),
            "active" => args.active,
            "name" => args.name.as_ref(),
        };
        self.get(&["job_types"], Some(&query))
            .await
            .map_err(ApiError::with_access_messages)
    }

    /// # Errors
    ///
    /// A 409 means the name is taken; 400/401/403 get explanatory messages.
    pub async fn create_job_type(&self, args: &CreateJobTypeArgs) -> Result<Value> {
        let name = require_text("name", &args.name)?;
        let body = job_type_body(Some(name.clone()), &args.fields);
        self.post(&["job_types"], Some(&Value::Object(body)))
            .await
            .map_err(|e| {
                bad_request_message(e)
                    .with_access_messages()
                    .on_status(409, || format!("Job type with name '{name}' already exists"))
            })
    }

    /// # Errors
    ///
    /// Returns a validation error for an empty update; 400/401/403/404/409 get explanatory
    /// messages.
    pub async fn update_job_type(&self, args: &UpdateJobTypeArgs) -> Result<Value> {
        let id = require_text("job_type_id", &args.job_type_id)?;
        let name = optional_text("name", args.name.as_deref())?;
        let body = job_type_body(name, &args.fields);
        require_any_field(&body)?;
        self.put(&["job_types", id.as_str()], &Value::Object(body))
            .await
            .map_err(|e| {
                bad_request_message(e)
                    .with_access_messages()
                    .on_status(404, || format!("Job type with ID '{id}' not found"))
                    .on_status(409, || {
                        "Conflict - job type name may already exist".to_string()
                    })
            })
    }

    /// # Errors
    ///
    /// 404/401/403 get explanatory messages.
    pub async fn get_job_type_by_id(&self, args: &JobTypeIdArgs) -> Result<Value> {
        let id = require_text("job_type_id", &args.job_type_id)?;
        self.get(&["job_types", id.as_str()], None)
            .await
            .map_err(|e| {
                e.with_access_messages()
                    .on_status(404, || format!("Job type with ID '{id}' not found"))
            })
    }
}
