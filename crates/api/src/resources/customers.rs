//! `/customers` and customer addresses.

use crate::client::HousecallClient;
use crate::error::Result;
use crate::params;
use crate::params::clamp_page_size;
use crate::validate::require_text;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_CUSTOMERS_PER_PAGE: u32 = 200;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetCustomersArgs {
    /// Page number to return.
    pub page: Option<u32>,
    /// Customers per page (max 200).
    pub per_page: Option<u32>,
    /// Free-text search across name, email, phone and address.
    pub search: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Comma-separated tag names.
    pub tags: Option<String>,
    /// Created on or after this ISO 8601 date.
    pub created_start: Option<String>,
    /// Created on or before this ISO 8601 date.
    pub created_end: Option<String>,
    /// Updated on or after this ISO 8601 date.
    pub updated_start: Option<String>,
    /// Updated on or before this ISO 8601 date.
    pub updated_end: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CustomerIdArgs {
    /// The customer ID.
    pub customer_id: String,
}

/// Contact details shared by create and update.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CustomerDetails {
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub home_number: Option<String>,
    pub work_number: Option<String>,
    pub company_name: Option<String>,
    /// Whether this is a commercial customer.
    pub is_commercial: Option<bool>,
    /// Whether the customer receives notifications.
    pub notifications_enabled: Option<bool>,
    /// How the customer found the business.
    pub lead_source: Option<String>,
    /// Tags to assign to the customer.
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCustomerArgs {
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub details: CustomerDetails,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCustomerArgs {
    /// The customer ID to update.
    pub customer_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub details: CustomerDetails,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CustomerAddressArgs {
    pub customer_id: String,
    pub address_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCustomerAddressArgs {
    pub customer_id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Country code, e.g. `US`.
    pub country: Option<String>,
    /// Address type: `service` or `billing`.
    #[serde(rename = "type")]
    pub address_type: Option<String>,
    pub notes: Option<String>,
    /// Contact person at this address.
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    /// Whether this is the customer's primary address.
    pub is_primary: Option<bool>,
}

fn details_body(first_name: Option<&str>, last_name: Option<&str>, d: &CustomerDetails) -> Value {
    Value::Object(params! {
        "first_name" => first_name,
        "last_name" => last_name,
        "email" => d.email.as_ref(),
        "mobile_number" => d.mobile_number.as_ref(),
        "home_number" => d.home_number.as_ref(),
        "work_number" => d.work_number.as_ref(),
        "company_name" => d.company_name.as_ref(),
        "is_commercial" => d.is_commercial,
        "notifications_enabled" => d.notifications_enabled,
        "lead_source" => d.lead_source.as_ref(),
        "tags" => d.tags.as_ref(),
        "notes" => d.notes.as_ref(),
    })
}

impl HousecallClient {
    /// List customers with optional filters.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_customers(&self, args: &GetCustomersArgs) -> Result<Value> {
        let query = params! {
            "page" => args.page,
            "per_page" => clamp_page_size(args.per_page, MAX_CUSTOMERS_PER_PAGE),
            "search" => args.search.as_ref(),
            "email" => args.email.as_ref(),
            "phone" => args.phone.as_ref(),
            "company_name" => args.company_name.as_ref(),
            "first_name" => args.first_name.as_ref(),
            "last_name" => args.last_name.as_ref(),
            "tags" => args.tags.as_ref(),
            "created_start" => args.created_start.as_ref(),
            "created_end" => args.created_end.as_ref(),
            "updated_start" => args.updated_start.as_ref(),
            "updated_end" => args.updated_end.as_ref(),
        };
        self.get(&["customers"], Some(&query)).await
    }

    /// # Errors
    ///
    /// A 404 is reported as `Customer <id> not found`.
    pub async fn get_customer(&self, args: &CustomerIdArgs) -> Result<Value> {
        let id = require_text("customer_id", &args.customer_id)?;
        self.get(&["customers", id.as_str()], None)
            .await
            .map_err(|e| e.on_status(404, || format!("Customer {id} not found")))
    }

    /// # Errors
    ///
    /// Returns a validation error for blank names, otherwise the normalized API error.
    pub async fn create_customer(&self, args: &CreateCustomerArgs) -> Result<Value> {
        let first_name = require_text("first_name", &args.first_name)?;
        let last_name = require_text("last_name", &args.last_name)?;
        let body = details_body(Some(&first_name), Some(&last_name), &args.details);
        self.post(&["customers"], Some(&body)).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn update_customer(&self, args: &UpdateCustomerArgs) -> Result<Value> {
        let id = require_text("customer_id", &args.customer_id)?;
        let body = details_body(
            args.first_name.as_deref(),
            args.last_name.as_deref(),
            &args.details,
        );
        self.put(&["customers", id.as_str()], &body).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_customer_addresses(&self, args: &CustomerIdArgs) -> Result<Value> {
        let id = require_text("customer_id", &args.customer_id)?;
        self.get(&["customers", id.as_str(), "addresses"], None).await
    }

    /// # Errors
    ///
    /// A 404 is reported as `Address <address_id> not found for customer <customer_id>`.
    pub async fn get_customer_address(&self, args: &CustomerAddressArgs) -> Result<Value> {
        let customer_id = require_text("customer_id", &args.customer_id)?;
        let address_id = require_text("address_id", &args.address_id)?;
        self.get(
            &["customers", customer_id.as_str(), "addresses", address_id.as_str()],
            None,
        )
        .await
        .map_err(|e| {
            e.on_status(404, || {
                format!("Address {address_id} not found for customer {customer_id}")
            })
        })
    }

    /// # Errors
    ///
    /// Returns a validation error for blank address parts, otherwise the normalized API error.
    pub async fn create_customer_address(&self, args: &CreateCustomerAddressArgs) -> Result<Value> {
        let id = require_text("customer_id", &args.customer_id)?;
        let body = Value::Object(params! {
            "street" => Some(require_text("street", &args.street)?),
            "city" => Some(require_text("city", &args.city)?),
            "state" => Some(require_text("state", &args.state)?),
            "zip" => Some(require_text("zip", &args.zip)?),
            "country" => args.country.as_ref(),
            "type" => args.address_type.as_ref(),
            "notes" => args.notes.as_ref(),
            "contact_name" => args.contact_name.as_ref(),
            "contact_phone" => args.contact_phone.as_ref(),
            "is_primary" => args.is_primary,
        });
        self.post(&["customers", id.as_str(), "addresses"], Some(&body))
            .await
    }
}
