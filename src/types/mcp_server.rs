use super::ActivationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Gateway entry point exposing the union of its combinations' endpoints
/// under `/mcp/{prefix}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServer {
    pub id: i64,
    pub name: String,
    pub prefix: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ActivationStatus,
    #[serde(default)]
    pub combination_ids: Vec<i64>,
    #[serde(rename = "createdAt", with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerCreate {
    pub name: String,
    pub prefix: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub combination_ids: Vec<i64>,
}

/// The prefix is fixed at creation time and cannot be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpServerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combination_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayEndpoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Client configuration snippet served at `/mcp/{prefix}/config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub config: HashMap<String, GatewayEndpoint>,
    #[serde(default)]
    pub example: serde_json::Value,
    pub endpoint: String,
    #[serde(default)]
    pub instructions: HashMap<String, String>,
}

/// Prefixes are case-insensitive on the server and restricted to
/// `[A-Za-z0-9_-]`. Returns the normalized lowercase form.
pub fn normalize_prefix(prefix: &str) -> Option<String> {
    let valid = !prefix.is_empty()
        && prefix.len() <= 50
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| prefix.to_ascii_lowercase())
}
