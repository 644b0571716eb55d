//! File-backed records
//!
//! Each record is a single file `<dir>/<key>.json`. Writes are atomic
//! (write to temp file, sync, then rename) so a reader never sees a
//! partially-written record.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{StorageError, StorageResult, StoreAdapter};

/// A named record stored as a file in a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Record `key` inside `dir`
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    /// Record at an explicit file path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreAdapter for FileStore {
    fn read_raw(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "failed to read record");
                None
            }
        }
    }

    fn write_raw(&self, text: &str) -> StorageResult<()> {
        atomic_write(&self.path, text.as_bytes())?;
        debug!(path = %self.path.display(), bytes = text.len(), "record written");
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::RemoveError {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_record_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path(), "bookmarkedArticles");

        assert!(!store.path().exists());
        assert!(store.read_raw().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path(), "bookmarkedArticles");

        store.write_raw(r#"[{"url":"u1"}]"#).unwrap();
        assert!(store.path().exists());
        assert!(store.path().ends_with("bookmarkedArticles.json"));
        assert_eq!(store.read_raw().as_deref(), Some(r#"[{"url":"u1"}]"#));

        store.write_raw("[]").unwrap();
        assert_eq!(store.read_raw().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path(), "bookmarkedArticles");

        store.write_raw("[]").unwrap();
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_clear_removes_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path(), "user");

        store.write_raw("{}").unwrap();
        store.clear().unwrap();
        assert!(store.read_raw().is_none());

        // Clearing again is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("record.json");
        let store = FileStore::at_path(&nested);

        store.write_raw("test data").unwrap();
        assert_eq!(fs::read_to_string(&nested).unwrap(), "test data");
    }

    #[test]
    fn test_unreadable_record_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as text
        let path = temp_dir.path().join("bookmarkedArticles.json");
        fs::create_dir_all(&path).unwrap();

        let store = FileStore::at_path(&path);
        assert!(store.read_raw().is_none());
    }
}
