use crate::error::Result;
use crate::transport::{ApiRequest, ApiTransport};
use crate::types::{ApiEndpoint, McpToolsDefinition};

/// OpenAPI introspection helpers. Both endpoints are public.
pub struct ToolsApi<'a> {
    transport: &'a ApiTransport,
}

impl<'a> ToolsApi<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// Operations listed in the OpenAPI document at `url`; used to pick
    /// endpoints for a combination.
    pub async fn list_endpoints(&self, url: &str) -> Result<Vec<ApiEndpoint>> {
        self.transport
            .send(
                ApiRequest::get("/api/v1/endpoints")
                    .query("url", url)
                    .public()
                    .fallback("Failed to fetch API endpoints"),
            )
            .await
    }

    /// MCP tool definitions derived from an OpenAPI document. Without a URL
    /// the backend answers from its built-in sample document.
    pub async fn mcp_tools(&self, openapi_url: Option<&str>) -> Result<McpToolsDefinition> {
        let mut request = ApiRequest::get("/mcp/v1/tools")
            .public()
            .fallback("Failed to fetch MCP tools");
        if let Some(url) = openapi_url {
            request = request.query("openapi_url", url);
        }
        self.transport.send(request).await
    }
}
