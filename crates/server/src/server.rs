//! MCP `ServerHandler` over the tool catalog.

use crate::catalog::ToolCatalog;
use crate::error::{Result, ServerError};
use housecall_api::HousecallClient;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt as _};

const INSTRUCTIONS: &str = "Tools for the Housecall Pro field-service API: customers, jobs, \
invoices, estimates, appointments, employees, leads, price book, schedule, tags, webhooks and \
events. Failed calls return an error result whose text is a JSON object with `error` and, for \
API responses, `status_code` and `details`.";

#[derive(Clone, Debug)]
pub struct HousecallServer {
    catalog: ToolCatalog,
}

impl HousecallServer {
    #[must_use]
    pub fn new(client: HousecallClient) -> Self {
        Self {
            catalog: ToolCatalog::new(client),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Serve MCP over stdin/stdout until the peer disconnects.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] if the handshake fails or the service task aborts.
    pub async fn serve_stdio(self) -> Result<()> {
        let running = self
            .serve(stdio())
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;
        let reason = running
            .waiting()
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;
        tracing::info!(reason = ?reason, "stdio session ended");
        Ok(())
    }
}

impl ServerHandler for HousecallServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                title: Some("Housecall Pro".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.catalog.tools().to_vec()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let name = request.name;
        match self.catalog.call(&name, request.arguments).await {
            Some(result) => Ok(result),
            None => Err(ErrorData::invalid_params(
                format!("unknown tool: {name}"),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use housecall_api::ClientConfig;

    #[test]
    fn info_advertises_tools_only() {
        let cfg = ClientConfig::new("key").expect("key");
        let server = HousecallServer::new(HousecallClient::new(&cfg).expect("client"));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "housecall-mcp");
        assert!(!server.catalog().tools().is_empty());
    }
}
