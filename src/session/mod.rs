mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{SessionState, SessionStore, TOKEN_KEY, USER_KEY};

use crate::config::SessionConfig;
use crate::error::{Result, StorageError};

/// Opens the session store described by the configuration.
pub fn open(config: &SessionConfig) -> Result<SessionStore> {
    if config.in_memory {
        return Ok(SessionStore::in_memory());
    }

    let path = config.resolved_path().ok_or(StorageError::NoHomeDir)?;
    tracing::debug!("Using session file {}", path.display());
    SessionStore::open_file(path)
}
