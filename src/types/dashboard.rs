use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TotalCount {
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatusCounts {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentItem {
    pub id: i64,
    pub name: String,
    /// `combination` or `mcp_server`.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Server-computed aggregate; read only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub services: TotalCount,
    pub combinations: StatusCounts,
    pub mcp_servers: StatusCounts,
    pub endpoints: TotalCount,
    #[serde(default)]
    pub recent_items: Vec<RecentItem>,
}
