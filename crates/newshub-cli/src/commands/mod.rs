//! Command handlers

pub mod auth;
pub mod bookmark;
pub mod config;
pub mod news;

use newshub_core::{
    BookmarkRepository, Config, FileStore, NotificationBus, SessionStore, StorageError,
};

/// Bookmark repository over the record in the configured data directory
pub fn open_repository(config: &Config) -> BookmarkRepository {
    BookmarkRepository::new(
        Box::new(FileStore::at_path(config.bookmarks_path())),
        NotificationBus::new(),
    )
}

/// Login session stored in the configured data directory
pub fn open_sessions(config: &Config) -> SessionStore {
    SessionStore::new(Box::new(FileStore::at_path(config.session_path())))
}

/// `anyhow::Context` for storage writes that keeps the recovery suggestion
pub trait StorageContext<T> {
    /// Wrap the error with `action`, followed by what the user can do about it
    fn storage_context(self, action: &str) -> anyhow::Result<T>;
}

impl<T> StorageContext<T> for Result<T, StorageError> {
    fn storage_context(self, action: &str) -> anyhow::Result<T> {
        self.map_err(|error| {
            let message = match error.recovery_suggestion() {
                Some(hint) => format!("{}. {}", action, hint),
                None => action.to_string(),
            };
            anyhow::Error::new(error).context(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn denied() -> StorageError {
        StorageError::from_io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/data/bookmarkedArticles.json"),
        )
    }

    #[test]
    fn test_storage_context_adds_suggestion() {
        let result: Result<(), StorageError> = Err(denied());
        let err = result.storage_context("Failed to save bookmark").unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Failed to save bookmark. "));
        assert!(message.contains("permissions"));
        assert!(err.downcast_ref::<StorageError>().is_some());
    }

    #[test]
    fn test_storage_context_without_suggestion() {
        let result: Result<(), StorageError> = Err(StorageError::from_io(
            io::Error::new(io::ErrorKind::Other, "device busy"),
            PathBuf::from("/data/user.json"),
        ));
        let err = result.storage_context("Failed to save session").unwrap_err();
        assert_eq!(err.to_string(), "Failed to save session");
    }
}
