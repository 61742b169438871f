use super::storage::{FileStorage, MemoryStorage, SessionStorage};
use crate::error::Result;
use crate::types::UserProfile;
use std::path::Path;
use std::sync::Arc;

pub const TOKEN_KEY: &str = "synapse_access_token";
pub const USER_KEY: &str = "synapse_current_user";

/// Cheap local view of the session used by the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub authenticated: bool,
    pub admin: bool,
}

/// Handle to the client-held session: bearer token plus cached profile.
///
/// Clones share the same storage. There is no locking across handles; two
/// writers racing on the same storage resolve as last writer wins.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Arc::new(FileStorage::open(path)?)))
    }

    pub fn save(&self, token: &str, profile: &UserProfile) -> Result<()> {
        self.save_token(token)?;
        self.save_profile(profile)
    }

    pub fn save_token(&self, token: &str) -> Result<()> {
        self.storage.set_item(TOKEN_KEY, token)?;
        Ok(())
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.storage.set_item(USER_KEY, &json)?;
        Ok(())
    }

    pub fn current_token(&self) -> Option<String> {
        self.storage
            .get_item(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// A profile that fails to parse is reported as absent. The token is
    /// left alone, so the caller may still be authenticated.
    pub fn current_profile(&self) -> Option<UserProfile> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::debug!("Cached profile is unreadable, treating as absent: {}", e);
                None
            }
        }
    }

    /// Removes token and profile together. Both are gone from this handle's
    /// view even when persisting the removal fails; the error is still
    /// returned because the stale token may survive on disk.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_items(&[TOKEN_KEY, USER_KEY])?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_profile()
            .map(|profile| profile.is_admin())
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            authenticated: self.is_authenticated(),
            admin: self.is_admin(),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
