//! In-memory record

use std::sync::{Mutex, PoisonError};

use super::{StorageResult, StoreAdapter};

/// A record held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a record already present
    pub fn with_value(text: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(text.into())),
        }
    }
}

impl StoreAdapter for MemoryStore {
    fn read_raw(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write_raw(&self, text: &str) -> StorageResult<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        assert!(MemoryStore::new().read_raw().is_none());
    }

    #[test]
    fn test_write_then_clear() {
        let store = MemoryStore::new();
        store.write_raw("[]").unwrap();
        assert_eq!(store.read_raw().as_deref(), Some("[]"));

        store.clear().unwrap();
        assert!(store.read_raw().is_none());
    }

    #[test]
    fn test_with_value() {
        let store = MemoryStore::with_value("not json");
        assert_eq!(store.read_raw().as_deref(), Some("not json"));
    }
}
