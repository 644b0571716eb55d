//! Storage layer
//!
//! A minimal key-value store: each named record is one text value.
//! Bookmarks live in the `bookmarkedArticles` record, the login session in
//! the `user` record.
//!
//! - `FileStore`: one JSON file per record in the data directory
//! - `MemoryStore`: process-local record, no filesystem

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Record key holding the bookmark collection
pub const BOOKMARKS_KEY: &str = "bookmarkedArticles";

/// Record key holding the logged-in session
pub const SESSION_KEY: &str = "user";

/// Read/write access to a single named record
///
/// Reads are fail-soft: storage that is missing or unreadable reads as
/// `None`. Writes replace the whole record at once.
pub trait StoreAdapter: Send + Sync {
    /// Raw record text, or `None` if never written (or unreadable)
    fn read_raw(&self) -> Option<String>;

    /// Replace the record
    fn write_raw(&self, text: &str) -> StorageResult<()>;

    /// Remove the record; a later `read_raw` returns `None`
    fn clear(&self) -> StorageResult<()>;
}
