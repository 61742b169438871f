//! Typed resource clients.
//!
//! All of them borrow one [`ApiTransport`]; nothing is cached, every call
//! goes to the server.

mod auth;
mod combinations;
mod dashboard;
mod mcp_servers;
mod services;
mod tools;
mod users;

pub use auth::AuthApi;
pub use combinations::CombinationsApi;
pub use dashboard::DashboardApi;
pub use mcp_servers::McpServersApi;
pub use services::ServicesApi;
pub use tools::ToolsApi;
pub use users::UsersApi;

use crate::config::Config;
use crate::error::Result;
use crate::session::{self, SessionStore};
use crate::transport::{ApiTransport, UnauthorizedHandler};

#[derive(Debug, Clone)]
pub struct ConsoleClient {
    transport: ApiTransport,
}

impl ConsoleClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Opens the configured session store and builds the transport on it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let session = session::open(&config.session)?;
        Ok(Self::new(ApiTransport::from_config(&config.api, session)?))
    }

    pub fn on_unauthorized<H: UnauthorizedHandler>(&self, handler: H) {
        self.transport.set_unauthorized_handler(handler);
    }

    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    pub fn session(&self) -> &SessionStore {
        self.transport.session()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.transport)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.transport)
    }

    pub fn services(&self) -> ServicesApi<'_> {
        ServicesApi::new(&self.transport)
    }

    pub fn combinations(&self) -> CombinationsApi<'_> {
        CombinationsApi::new(&self.transport)
    }

    pub fn mcp_servers(&self) -> McpServersApi<'_> {
        McpServersApi::new(&self.transport)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(&self.transport)
    }

    pub fn tools(&self) -> ToolsApi<'_> {
        ToolsApi::new(&self.transport)
    }
}
