//! Bookmark repository
//!
//! The only writer of the bookmark record. Every operation reads the whole
//! collection from the store adapter, changes it, and writes the whole
//! collection back; after a successful write it publishes on the
//! notification bus.
//!
//! ## Usage
//!
//! ```ignore
//! let bus = NotificationBus::new();
//! let repo = BookmarkRepository::new(Box::new(FileStore::new(dir, BOOKMARKS_KEY)), bus);
//!
//! repo.add(&article)?;
//! assert!(repo.is_bookmarked(&article.url));
//! ```
//!
//! ## Invariants
//!
//! - No two entries share a `url`.
//! - Untouched entries keep their relative insertion order.
//! - Subscribers are notified only after the write has completed, so a
//!   `list()` from inside a handler sees the new state.

use chrono::Utc;
use tracing::{debug, warn};

use crate::bus::{NotificationBus, Subscription};
use crate::models::{Article, BookmarkCollection, BookmarkEntry};
use crate::storage::{StorageResult, StoreAdapter};

/// Bookmark storage with change notifications
pub struct BookmarkRepository {
    store: Box<dyn StoreAdapter>,
    bus: NotificationBus,
}

impl BookmarkRepository {
    /// Create a repository over a store adapter, publishing on `bus`
    pub fn new(store: Box<dyn StoreAdapter>, bus: NotificationBus) -> Self {
        Self { store, bus }
    }

    /// The bus this repository publishes on
    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    /// Subscribe to bookmark changes
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bus.subscribe(handler)
    }

    /// Current bookmarks, oldest first
    ///
    /// Absent or malformed data reads as an empty collection.
    pub fn list(&self) -> BookmarkCollection {
        let Some(raw) = self.store.read_raw() else {
            return Vec::new();
        };

        match serde_json::from_str::<BookmarkCollection>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "stored bookmarks are malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Number of bookmarks
    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Check whether `url` is bookmarked
    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.list().iter().any(|entry| entry.url == url)
    }

    /// Look up a single bookmark
    pub fn get(&self, url: &str) -> Option<BookmarkEntry> {
        self.list().into_iter().find(|entry| entry.url == url)
    }

    /// Bookmark an article
    ///
    /// Adding an already-bookmarked URL changes nothing: no write, no
    /// notification, and the existing snapshot is kept.
    pub fn add(&self, article: &Article) -> StorageResult<BookmarkCollection> {
        let mut entries = self.list();
        if entries.iter().any(|entry| entry.url == article.url) {
            debug!(url = %article.url, "already bookmarked");
            return Ok(entries);
        }

        entries.push(BookmarkEntry::from_article(article, Utc::now()));
        self.persist(&entries)?;
        debug!(url = %article.url, count = entries.len(), "bookmark added");
        self.bus.publish();
        Ok(entries)
    }

    /// Remove the bookmark for `url`
    ///
    /// Removing a URL that is not bookmarked still rewrites the record and
    /// notifies.
    pub fn remove(&self, url: &str) -> StorageResult<BookmarkCollection> {
        let mut entries = self.list();
        entries.retain(|entry| entry.url != url);

        self.persist(&entries)?;
        debug!(url, count = entries.len(), "bookmark removed");
        self.bus.publish();
        Ok(entries)
    }

    /// Bookmark the article if it isn't, otherwise remove it
    ///
    /// Returns whether the article is bookmarked afterwards.
    pub fn toggle(&self, article: &Article) -> StorageResult<bool> {
        if self.is_bookmarked(&article.url) {
            self.remove(&article.url)?;
            Ok(false)
        } else {
            self.add(article)?;
            Ok(true)
        }
    }

    /// Remove every bookmark
    pub fn clear_all(&self) -> StorageResult<()> {
        self.store.clear()?;
        debug!("bookmarks cleared");
        self.bus.publish();
        Ok(())
    }

    fn persist(&self, entries: &BookmarkCollection) -> StorageResult<()> {
        let text = serde_json::to_string(entries)?;
        self.store.write_raw(&text)
    }
}

impl std::fmt::Debug for BookmarkRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkRepository")
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
