use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    /// The server rejected the session token. The local session has already
    /// been cleared by the time this error reaches the caller.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx answer. `message` is the server supplied `detail`
    /// or the fallback chosen by the call site.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),
}

impl ConsoleError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Unauthorized => Some(401),
            ConsoleError::Rejected { status, .. } => Some(*status),
            ConsoleError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ConsoleError::Unauthorized)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupted session file: {0}")]
    Corrupted(String),

    #[error("No home directory available for the session file")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
