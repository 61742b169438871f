use crate::error::{ConsoleError, Result};
use crate::transport::{ApiRequest, ApiTransport};
use crate::types::{
    normalize_prefix, ActivationStatus, GatewayConfig, McpServer, McpServerCreate, McpServerUpdate,
};

/// Gateway ("MCP") servers. Identified by numeric id for management and by
/// prefix on the public gateway surface.
pub struct McpServersApi<'a> {
    transport: &'a ApiTransport,
}

impl<'a> McpServersApi<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<McpServer>> {
        self.transport
            .send(ApiRequest::get("/api/v1/mcp-servers").fallback("Failed to fetch MCP servers"))
            .await
    }

    pub async fn get(&self, id: i64) -> Result<McpServer> {
        self.transport
            .send(
                ApiRequest::get(format!("/api/v1/mcp-servers/{id}"))
                    .fallback("Failed to fetch MCP server"),
            )
            .await
    }

    pub async fn create(&self, server: &McpServerCreate) -> Result<McpServer> {
        if normalize_prefix(&server.prefix).is_none() {
            return Err(ConsoleError::InvalidRequest(format!(
                "invalid MCP prefix '{}': use letters, digits, '_' or '-'",
                server.prefix
            )));
        }

        let request = ApiRequest::post("/api/v1/mcp-servers")
            .json(server)?
            .fallback("Failed to create MCP server");
        self.transport.send(request).await
    }

    pub async fn update(&self, id: i64, update: &McpServerUpdate) -> Result<McpServer> {
        let request = ApiRequest::put(format!("/api/v1/mcp-servers/{id}"))
            .json(update)?
            .fallback("Failed to update MCP server");
        self.transport.send(request).await
    }

    pub async fn set_status(&self, id: i64, status: ActivationStatus) -> Result<McpServer> {
        let request = ApiRequest::patch(format!("/api/v1/mcp-servers/{id}/status"))
            .query("status", status)
            .fallback("Failed to update MCP server status");
        self.transport.send(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .send_empty(
                ApiRequest::delete(format!("/api/v1/mcp-servers/{id}"))
                    .fallback("Failed to delete MCP server"),
            )
            .await
    }

    /// Public lookup of the client configuration snippet for `prefix`.
    pub async fn config(&self, prefix: &str) -> Result<GatewayConfig> {
        let prefix = normalize_prefix(prefix).ok_or_else(|| {
            ConsoleError::InvalidRequest(format!("invalid MCP prefix '{prefix}'"))
        })?;

        self.transport
            .send(
                ApiRequest::get(format!("/mcp/{prefix}/config"))
                    .public()
                    .fallback("Failed to fetch MCP server config"),
            )
            .await
    }
}
