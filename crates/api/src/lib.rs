//! Housecall Pro REST client.
//!
//! The crate is organised around a single [`HousecallClient`]: one authenticated request
//! gateway (`send`) plus thin, typed wrapper methods per resource group under [`resources`].
//!
//! It intentionally contains **no** MCP dispatch logic; the `housecall-mcp` server crate maps
//! tool calls onto these methods.

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod resources;
pub mod safety;
pub mod semantics;
pub mod validate;

pub use client::HousecallClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use semantics::ApiMethod;
