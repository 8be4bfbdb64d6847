//! Invoices: job invoices, `/invoices`, the `/v1/invoices` query endpoint, payments, line items
//! and attachments.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::{decode_base64, parse_content_type, require_text};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_INVOICES_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetJobInvoicesArgs {
    pub job_id: String,
    pub include_line_items: Option<bool>,
    pub include_attachments: Option<bool>,
    pub include_payments: Option<bool>,
    /// `draft`, `sent`, `paid`, `overdue` or `void`.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetInvoicesArgs {
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub due_date_start: Option<String>,
    pub due_date_end: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
    /// Only invoices that have (or have not) been sent.
    pub sent: Option<bool>,
    /// Only past-due invoices.
    pub past_due: Option<bool>,
    pub page: Option<u32>,
    /// Results per page (max 100).
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub include_line_items: Option<bool>,
    pub include_attachments: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryInvoicesArgs {
    pub page: Option<u32>,
    /// Results per page (max 100).
    pub page_size: Option<u32>,
    pub customer_id: Option<String>,
    pub job_id: Option<String>,
    pub status: Option<String>,
    /// Invoice number.
    pub number: Option<String>,
    pub invoice_date_start: Option<String>,
    pub invoice_date_end: Option<String>,
    pub due_date_start: Option<String>,
    pub due_date_end: Option<String>,
    pub paid_date_start: Option<String>,
    pub paid_date_end: Option<String>,
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetInvoiceArgs {
    pub invoice_id: String,
    pub include_line_items: Option<bool>,
    pub include_attachments: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InvoiceIdArgs {
    pub invoice_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct InvoiceFields {
    /// Total amount; defaults to the job total upstream.
    pub amount: Option<f64>,
    /// Due date (YYYY-MM-DD).
    pub due_date: Option<String>,
    /// e.g. `net_30`, `due_on_receipt`.
    pub due_terms: Option<String>,
    /// Message shown to the customer.
    pub message: Option<String>,
    /// Internal notes.
    pub notes: Option<String>,
    /// Accepted payment methods.
    pub payment_methods: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateInvoiceArgs {
    /// Job to invoice.
    pub job_id: String,
    #[serde(flatten)]
    pub fields: InvoiceFields,
    pub send_immediately: Option<bool>,
    /// Copy the job's line items onto the invoice.
    pub include_line_items: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateInvoiceArgs {
    pub invoice_id: String,
    #[serde(flatten)]
    pub fields: InvoiceFields,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendInvoiceArgs {
    pub invoice_id: String,
    /// `email`, `sms` or `both`.
    pub delivery_method: Option<String>,
    pub message: Option<String>,
    pub include_attachments: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VoidInvoiceArgs {
    pub invoice_id: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MarkInvoicePaidArgs {
    pub invoice_id: String,
    pub amount_paid: f64,
    /// `cash`, `check`, `credit_card`, ...
    pub payment_method: Option<String>,
    /// Payment date (YYYY-MM-DD).
    pub payment_date: Option<String>,
    /// Check number or transaction reference.
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DownloadInvoiceArgs {
    pub invoice_id: String,
    pub include_attachments: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddInvoiceLineItemArgs {
    pub invoice_id: String,
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub taxable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateInvoiceLineItemArgs {
    pub invoice_id: String,
    pub line_item_id: String,
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub taxable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InvoiceLineItemArgs {
    pub invoice_id: String,
    pub line_item_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddInvoiceAttachmentArgs {
    pub invoice_id: String,
    pub name: String,
    /// Base64-encoded file content.
    pub file_data: String,
    /// MIME type (default `application/octet-stream`).
    pub content_type: Option<String>,
}

fn invoice_fields(map: &mut params::JsonMap, f: &InvoiceFields) {
    map.extend(params! {
        "amount" => f.amount,
        "due_date" => f.due_date.as_ref(),
        "due_terms" => f.due_terms.as_ref(),
        "message" => f.message.as_ref(),
        "notes" => f.notes.as_ref(),
        "payment_methods" => f.payment_methods.as_ref(),
    });
}

impl HousecallClient {
    /// # Errors
    ///
    /// A 404 or 403 is reported with the job ID in the message.
    pub async fn get_job_invoices(&self, args: &GetJobInvoicesArgs) -> Result<Value> {
        let id = require_text("job_id", &args.job_id)?;
        let query = params! {
            "include_line_items" => args.include_line_items,
            "include_attachments" => args.include_attachments,
            "include_payments" => args.include_payments,
            "status" => args.status.as_ref(),
        };
        self.get(&["jobs", id.as_str(), "invoices"], Some(&query))
            .await
            .map_err(|e| {
                e.on_status(404, || format!("Job with ID '{id}' not found"))
                    .on_status(403, || {
                        format!("Access denied to job '{id}' - check permissions")
                    })
            })
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_invoices(&self, args: &GetInvoicesArgs) -> Result<Value> {
        let query = params! {
            "customer_id" => args.customer_id.as_ref(),
            "status" => args.status.as_ref(),
            "due_date_start" => args.due_date_start.as_ref(),
            "due_date_end" => args.due_date_end.as_ref(),
            "created_after" => args.created_after.as_ref(),
            "created_before" => args.created_before.as_ref(),
            "updated_after" => args.updated_after.as_ref(),
            "updated_before" => args.updated_before.as_ref(),
            "sent" => args.sent,
            "past_due" => args.past_due,
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_INVOICES_PAGE_SIZE),
            "sort_by" => args.sort_by.as_ref(),
            "sort_direction" => args.sort_direction.as_ref(),
            "include_line_items" => args.include_line_items,
            "include_attachments" => args.include_attachments,
        };
        self.get(&["invoices"], Some(&query)).await
    }

    /// Query the versioned `/v1/invoices` listing.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn query_invoices(&self, args: &QueryInvoicesArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "page_size" => clamp_page_size(args.page_size, MAX_INVOICES_PAGE_SIZE),
            "customer_id" => args.customer_id.as_ref(),
            "job_id" => args.job_id.as_ref(),
            "status" => args.status.as_ref(),
            "number" => args.number.as_ref(),
            "invoice_date_start" => args.invoice_date_start.as_ref(),
            "invoice_date_end" => args.invoice_date_end.as_ref(),
            "due_date_start" => args.due_date_start.as_ref(),
            "due_date_end" => args.due_date_end.as_ref(),
            "paid_date_start" => args.paid_date_start.as_ref(),
            "paid_date_end" => args.paid_date_end.as_ref(),
            "sort_by" => args.sort_by.as_ref(),
            "sort_dir" => args.sort_dir.as_ref(),
        };
        self.get(&["v1", "invoices"], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_invoice_by_id(&self, args: &GetInvoiceArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let query = params! {
            "include_line_items" => args.include_line_items,
            "include_attachments" => args.include_attachments,
        };
        self.get(&["invoices", id.as_str()], Some(&query)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn create_invoice(&self, args: &CreateInvoiceArgs) -> Result<Value> {
        let mut body = params! { "job_id" => Some(require_text("job_id", &args.job_id)?) };
        invoice_fields(&mut body, &args.fields);
        body.extend(params! {
            "send_immediately" => args.send_immediately,
            "include_line_items" => args.include_line_items,
        });
        self.post(&["invoices"], Some(&Value::Object(body))).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_invoice(&self, args: &UpdateInvoiceArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let mut body = params::JsonMap::new();
        invoice_fields(&mut body, &args.fields);
        self.patch(&["invoices", id.as_str()], &Value::Object(body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn send_invoice(&self, args: &SendInvoiceArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let body = Value::Object(params! {
            "delivery_method" => args.delivery_method.as_ref(),
            "message" => args.message.as_ref(),
            "include_attachments" => args.include_attachments,
        });
        self.post(&["invoices", id.as_str(), "send"], Some(&body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn void_invoice(&self, args: &VoidInvoiceArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let body = Value::Object(params! { "reason" => args.reason.as_ref() });
        self.post(&["invoices", id.as_str(), "void"], Some(&body))
            .await
    }

    /// Record a payment against an invoice.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn mark_invoice_paid(&self, args: &MarkInvoicePaidArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let body = Value::Object(params! {
            "amount_paid" => Some(args.amount_paid),
            "payment_method" => args.payment_method.as_ref(),
            "payment_date" => args.payment_date.as_ref(),
            "reference_number" => args.reference_number.as_ref(),
            "notes" => args.notes.as_ref(),
        });
        self.post(&["invoices", id.as_str(), "payments"], Some(&body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_invoice_payments(&self, args: &InvoiceIdArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        self.get(&["invoices", id.as_str(), "payments"], None).await
    }

    /// Binary PDF bodies come back base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn download_invoice_pdf(&self, args: &DownloadInvoiceArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let query = params! { "include_attachments" => args.include_attachments };
        self.get_document(&["invoices", id.as_str(), "download"], Some(&query))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_invoice_line_items(&self, args: &InvoiceIdArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        self.get(&["invoices", id.as_str(), "line_items"], None)
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn add_invoice_line_item(&self, args: &AddInvoiceLineItemArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let body = Value::Object(params! {
            "name" => Some(require_text("name", &args.name)?),
            "quantity" => Some(args.quantity),
            "price" => Some(args.price),
            "unit" => args.unit.as_ref(),
            "description" => args.description.as_ref(),
            "sku" => args.sku.as_ref(),
            "taxable" => args.taxable,
        });
        self.post(&["invoices", id.as_str(), "line_items"], Some(&body))
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_invoice_line_item(
        &self,
        args: &UpdateInvoiceLineItemArgs,
    ) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let line_item_id = require_text("line_item_id", &args.line_item_id)?;
        let body = Value::Object(params! {
            "name" => args.name.as_ref(),
            "quantity" => args.quantity,
            "price" => args.price,
            "unit" => args.unit.as_ref(),
            "description" => args.description.as_ref(),
            "sku" => args.sku.as_ref(),
            "taxable" => args.taxable,
        });
        self.patch(
            &["invoices", id.as_str(), "line_items", line_item_id.as_str()],
            &body,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn delete_invoice_line_item(&self, args: &InvoiceLineItemArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        let line_item_id = require_text("line_item_id", &args.line_item_id)?;
        self.delete(&["invoices", id.as_str(), "line_items", line_item_id.as_str()])
            .await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_invoice_attachments(&self, args: &InvoiceIdArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        self.get(&["invoices", id.as_str(), "attachments"], None)
            .await
    }

    /// The attachment travels as JSON with the base64 payload intact.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed base64 or MIME type.
    pub async fn add_invoice_attachment(&self, args: &AddInvoiceAttachmentArgs) -> Result<Value> {
        let id = require_text("invoice_id", &args.invoice_id)?;
        decode_base64("file_data", &args.file_data)?;
        let content_type = match args.content_type.as_deref() {
            Some(ct) => parse_content_type("content_type", ct)?,
            None => mime::APPLICATION_OCTET_STREAM,
        };
        let body = Value::Object(params! {
            "name" => Some(require_text("name", &args.name)?),
            "file_data" => Some(args.file_data.trim()),
            "content_type" => Some(content_type.to_string()),
        });
        self.post(&["invoices", id.as_str(), "attachments"], Some(&body))
            .await
    }
}
