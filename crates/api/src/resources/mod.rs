//! Typed wrappers, one module per Housecall Pro resource group.
//!
//! Each module defines the argument structs for its tools (serde + JSON schema) and an
//! `impl HousecallClient` block whose methods build path, query and body and make one call.

pub mod account;
pub mod appointments;
pub mod customers;
pub mod employees;
pub mod estimates;
pub mod events;
pub mod invoices;
pub mod job_types;
pub mod jobs;
pub mod lead_sources;
pub mod leads;
pub mod material_categories;
pub mod price_book;
pub mod price_forms;
pub mod schedule;
pub mod tags;
pub mod webhooks;
