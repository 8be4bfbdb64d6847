//! Housecall Pro MCP server.
//!
//! Wraps [`housecall_api::HousecallClient`] in an rmcp [`rmcp::ServerHandler`] and serves it
//! over stdio. Tool definitions live in [`catalog`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use catalog::{TOOL_SPECS, ToolCatalog, ToolOutput};
pub use config::{Cli, LogFormat};
pub use error::{Result, ServerError};
pub use server::HousecallServer;
