use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Origin every request path is resolved against.
    #[serde(default = "default_base_url", alias = "base_url")]
    pub base_url: String,
    #[serde(default, alias = "user_agent")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Session file location. Falls back to `~/.synapse/session.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Keep the session in memory only; nothing survives the process.
    #[serde(default, alias = "in_memory")]
    pub in_memory: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl SessionConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::home_dir().map(|mut path| {
                path.push(".synapse");
                path.push("session.json");
                path
            })
        })
    }
}
