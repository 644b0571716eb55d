//! Login session persistence
//!
//! Keeps the last successful login (token and user) in the `user` record.
//! Passwords are never stored.

use tracing::warn;

use crate::api::AuthData;
use crate::storage::{StorageResult, StoreAdapter};

/// The persisted login session
pub struct SessionStore {
    store: Box<dyn StoreAdapter>,
}

impl SessionStore {
    pub fn new(store: Box<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    /// The current session, if logged in
    ///
    /// A malformed record counts as logged out.
    pub fn load(&self) -> Option<AuthData> {
        let raw = self.store.read_raw()?;
        match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(error = %e, "stored session is malformed, ignoring");
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }

    /// Replace the session
    pub fn save(&self, data: &AuthData) -> StorageResult<()> {
        let text = serde_json::to_string(data)?;
        self.store.write_raw(&text)
    }

    /// Log out
    pub fn clear(&self) -> StorageResult<()> {
        self.store.clear()
    }
}
