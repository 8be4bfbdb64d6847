//! `/jobs` and job sub-resources: attachments, line items, schedule, dispatch, input materials,
//! tags, notes and links.

use crate::client::HousecallClient;
use crate::error::{ApiError, Result};
use crate::params;
use crate::params::clamp_page_size;
use crate::safety::require_http_url;
use crate::validate::{decode_base64, parse_content_type, require_items, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

pub const MAX_JOBS_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetJobsArgs {
    pub customer_id: Option<String>,
    pub employee_id: Option<String>,
    pub status: Option<String>,
    /// Jobs on or after this date (YYYY-MM-DD).
    pub date_start: Option<String>,
    /// Jobs on or before this date (YYYY-MM-DD).
    pub date_end: Option<String>,
    /// e.g. `scheduled`, `in_progress`, `completed`.
    pub work_status: Option<String>,
    /// Comma-separated tag names.
    pub tags: Option<String>,
    pub include_notes: Option<bool>,
    pub include_line_items: Option<bool>,
    pub include_photos: Option<bool>,
    /// Results per page (max 100).
    pub page_size: Option<u32>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_direction: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
    pub scheduled_start_min: Option<String>,
    pub scheduled_start_max: Option<String>,
    pub scheduled_end_min: Option<String>,
    pub scheduled_end_max: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JobIdArgs {
    pub job_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateJobArgs {
    pub customer_id: String,
    /// Initial work status, e.g. `needs_scheduling`.
    pub work_status: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub lead_source: Option<String>,
    pub note_to_customer: Option<String>,
    /// ISO 8601 start time.
    pub scheduled_start: Option<String>,
    /// ISO 8601 end time.
    pub scheduled_end: Option<String>,
    /// Employees to assign.
    pub employee_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddJobAttachmentArgs {
    pub job_id: String,
    /// File name of the attachment.
    pub name: String,
    /// Base64-encoded file content.
    pub file_data: String,
    /// MIME type of the file (default `application/octet-stream`).
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddJobLineItemArgs {
    pub job_id: String,
    pub name: String,
    pub quantity: f64,
    /// Unit price.
    pub price: f64,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BulkUpdateJobLineItemsArgs {
    pub job_id: String,
    /// Line item objects with their updates.
    pub line_items: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateJobLineItemArgs {
    pub job_id: String,
    pub line_item_id: String,
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JobLineItemArgs {
    pub job_id: String,
    pub line_item_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateJobScheduleArgs {
    pub job_id: String,
    /// ISO 8601 start time.
    pub scheduled_start: String,
    /// ISO 8601 end time.
    pub scheduled_end: String,
    pub employee_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DispatchJobArgs {
    pub job_id: String,
    /// Employees to dispatch the job to.
    pub employee_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BulkUpdateJobInputMaterialsArgs {
    pub job_id: String,
    /// Input material objects with their updates.
    pub input_materials: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JobTagArgs {
    pub job_id: String,
    pub tag: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddJobNoteArgs {
    pub job_id: String,
    pub note: String,
    /// `internal` or `customer`.
    pub note_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JobNoteArgs {
    pub job_id: String,
    pub note_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateJobLinkArgs {
    pub job_id: String,
    /// Link target; must be http(s).
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_jobs(&self, args: &GetJobsArgs) -> Result<Value> {
        let query = params! {
            "customer_id" => args.customer_id.as_ref(),
            "employee_id" => args.employee_id.as_ref(),
            "status" => args.status.as_ref(),
            "date_start" => args.date_start.as_ref(),
            "date_end" => args.date_end.as_ref(),
            "work_status" => args.work_status.as_ref(),
            "tags" => args.tags.as_ref(),
            "include_notes" => args.include_notes,
            "include_line_items" => args.include_line_items,
            "include_photos" => args.include_photos,
            "page_size" => clamp_page_size(args.page_size, MAX_JOBS_PAGE_SIZE),
            "page" => args.page,
            "sort_by" => args.sort_by.as_ref(),
            "sort_direction" => args.sort_direction.as_ref(),
            "created_after" => args.created_after.as_ref(),
            "created_before" => args.created_before.as_ref(),
            "updated_after" => args.updated_after.as_ref(),
            "updated_before" => args.updated_before.as_ref(),
            "scheduled_start_min" => args.scheduled_start_min.as_ref(),
            "scheduled_start_max" => args.scheduled_start_max.as_ref(),
            "scheduled_end_min" => args.scheduled_end_min.as_ref(),
            "scheduled_end_max" => args.scheduled_end_max.as_ref(),
        };
        self.get(&["jobs"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_job_by_id(&self, args: &JobIdArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        self.get(&["jobs", id.as_str()], None).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn create_job(&self, args: &CreateJobArgs) -> Result<Value> {
        let body = Value::Object(params! {
            "customer_id" => Some(require_text("customer_id", &args.customer_id)?),
            "work_status" => args.work_status.as_ref(),
            "description" => args.description.as_ref(),
            "tags" => args.tags.as_ref(),
            "lead_source" => args.lead_source.as_ref(),
            "note_to_customer" => args.note_to_customer.as_ref(),
            "scheduled_start" => args.scheduled_start.as_ref(),
            "scheduled_end" => args.scheduled_end.as_ref(),
            "employee_ids" => args.employee_ids.as_ref(),
        });
        self.post(&["jobs"], Some(&body)).await
    }

    /// Upload a base64-encoded file as the multipart field `attachment`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed base64 or MIME type.
    pub async fn add_job_attachment(&self, args: &AddJobAttachmentArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let name = require_text("name", &args.name)?;
        let bytes = decode_base64("file_data", &args.file_data)?;
        let content_type = match args.content_type.as_deref() {
            Some(ct) => parse_content_type("content_type", ct)?,
            None => mime::APPLICATION_OCTET_STREAM,
        };

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(name)
            .mime_str(content_type.as_ref())
            .map_err(|e| ApiError::validation(format!("content_type is not usable: {e}")))?;
        let form = reqwest::multipart::Form::new().part("attachment", part);

        self.post_multipart(&["jobs", id.as_str(), "attachments"], form)
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_job_line_items(&self, args: &JobIdArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        self.get(&["jobs", id.as_str(), "line_items"], None).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn add_job_line_item(&self, args: &AddJobLineItemArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let body = Value::Object(params! {
            "name" => Some(require_text("name", &args.name)?),
            "quantity" => Some(args.quantity),
            "price" => Some(args.price),
            "unit" => args.unit.as_ref(),
            "description" => args.description.as_ref(),
            "sku" => args.sku.as_ref(),
        });
        self.post(&["jobs", id.as_str(), "line_items"], Some(&body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn bulk_update_job_line_items(
        &self,
        args: &BulkUpdateJobLineItemsArgs,
    ) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        require_items("line_items", &args.line_items)?;
        let body = json!({ "line_items": args.line_items });
        self.put(&["jobs", id.as_str(), "line_items"], &body).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_job_line_item(&self, args: &UpdateJobLineItemArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let line_item_id = require_text("line_item_id", &args.line_item_id)?;
        let body = Value::Object(params! {
            "name" => args.name.as_ref(),
            "quantity" => args.quantity,
            "price" => args.price,
            "unit" => args.unit.as_ref(),
            "description" => args.description.as_ref(),
            "sku" => args.sku.as_ref(),
        });
        self.put(
            &["jobs", id.as_str(), "line_items", line_item_id.as_str()],
            &body,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_job_line_item(&self, args: &JobLineItemArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let line_item_id = require_text("line_item_id", &args.line_item_id)?;
        self.delete(&["jobs", id.as_str(), "line_items", line_item_id.as_str()])
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_job_schedule(&self, args: &UpdateJobScheduleArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let body = Value::Object(params! {
            "scheduled_start" => Some(require_text("scheduled_start", &args.scheduled_start)?),
            "scheduled_end" => Some(require_text("scheduled_end", &args.scheduled_end)?),
            "employee_ids" => args.employee_ids.as_ref(),
        });
        self.put(&["jobs", id.as_str(), "schedule"], &body).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_job_schedule(&self, args: &JobIdArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        self.delete(&["jobs", id.as_str(), "schedule"]).await
    }

    /// # Errors
    ///
    /// Returns a validation error when no employees are given.
    pub async fn dispatch_job_to_employees(&self, args: &DispatchJobArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        require_items("employee_ids", &args.employee_ids)?;
        let body = json!({ "employee_ids": args.employee_ids });
        self.post(&["jobs", id.as_str(), "dispatch"], Some(&body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_job_input_materials(&self, args: &JobIdArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        self.get(&["jobs", id.as_str(), "input_materials"], None)
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn bulk_update_job_input_materials(
        &self,
        args: &BulkUpdateJobInputMaterialsArgs,
    ) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        require_items("input_materials", &args.input_materials)?;
        let body = json!({ "input_materials": args.input_materials });
        self.put(&["jobs", id.as_str(), "input_materials"], &body)
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn add_job_tag(&self, args: &JobTagArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let tag = require_text("tag", &args.tag)?;
        let body = json!({ "tag": tag });
        self.post(&["jobs", id.as_str(), "tags"], Some(&body)).await
    }

    /// The tag is sent as a single path segment, so `/` and spaces are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn remove_job_tag(&self, args: &JobTagArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let tag = require_text("tag", &args.tag)?;
        self.delete(&["jobs", id.as_str(), "tags", tag.as_str()])
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn add_job_note(&self, args: &AddJobNoteArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let body = Value::Object(params! {
            "note" => Some(require_text("note", &args.note)?),
            "note_type" => args.note_type.as_ref(),
        });
        self.post(&["jobs", id.as_str(), "notes"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_job_note(&self, args: &JobNoteArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let note_id = require_text("note_id", &args.note_id)?;
        self.delete(&["jobs", id.as_str(), "notes", note_id.as_str()])
            .await
    }

    /// # Errors
    ///
    /// Returns a validation error for non-http(s) URLs.
    pub async fn create_job_link(&self, args: &CreateJobLinkArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        require_http_url("url", &args.url)?;
        let body = Value::Object(params! {
            "url" => Some(args.url.trim()),
            "name" => args.name.as_ref(),
            "description" => args.description.as_ref(),
        });
        self.post(&["jobs", id.as_str(), "links"], Some(&body)).await
    }
}
