//! Wire types for the console backend.
//!
//! Field naming follows the backend exactly, which mixes `snake_case` and
//! `camelCase` between resources.

pub mod combination;
pub mod dashboard;
pub mod mcp_server;
pub mod service;
pub mod timestamp;
pub mod tools;
pub mod user;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use combination::{Combination, CombinationCreate, CombinationUpdate, EndpointRef};
pub use dashboard::{DashboardStats, RecentItem, StatusCounts, TotalCount};
pub use mcp_server::{
    normalize_prefix, GatewayConfig, GatewayEndpoint, McpServer, McpServerCreate, McpServerUpdate,
};
pub use service::{Service, ServiceCreate, ServiceStatus, ServiceUpdate};
pub use tools::{ApiEndpoint, McpTool, McpToolsDefinition, ToolMetadata};
pub use user::{
    LoginRequest, LoginResponse, MessageResponse, Role, UserCreate, UserList, UserProfile,
    UserUpdate,
};

/// Status shared by combinations and gateway servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivationStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationStatus::Active => "active",
            ActivationStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ActivationStatus::Active => ActivationStatus::Inactive,
            ActivationStatus::Inactive => ActivationStatus::Active,
        }
    }
}

impl fmt::Display for ActivationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ActivationStatus::Active),
            "inactive" => Ok(ActivationStatus::Inactive),
            other => Err(format!(
                "status must be 'active' or 'inactive', got '{other}'"
            )),
        }
    }
}
