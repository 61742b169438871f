use super::ActivationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalized pointer to one operation of one service. Stored by value so
/// a combination keeps rendering even after the service changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRef {
    pub service_name: String,
    pub service_url: String,
    pub path: String,
    pub method: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ActivationStatus,
    #[serde(default)]
    pub endpoints: Vec<EndpointRef>,
    #[serde(rename = "createdAt", with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombinationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<EndpointRef>>,
}
