//! NewsHub Core Library
//!
//! This crate provides the core functionality for NewsHub, a news reader
//! with bookmarks for offline reading.
//!
//! # Architecture
//!
//! Bookmarks flow through three pieces:
//!
//! - **Store adapter** (`storage`): reads and writes one named record
//! - **Repository** (`repository`): the only writer of the bookmark record;
//!   keeps URLs unique and publishes after every write
//! - **Notification bus** (`bus`): tells observers that bookmarks changed
//!
//! Observers (`observers`) re-read the repository whenever the bus fires.
//!
//! # Quick Start
//!
//! ```text
//! let bus = NotificationBus::new();
//! let repo = Arc::new(BookmarkRepository::new(
//!     Box::new(FileStore::new(&config.data_dir, BOOKMARKS_KEY)),
//!     bus,
//! ));
//!
//! let badge = BookmarkBadge::mount(&repo);
//! repo.add(&article)?;
//! assert_eq!(badge.count(), 1);
//! ```
//!
//! # Modules
//!
//! - `models`: Articles and bookmark entries
//! - `storage`: Record adapters (file, memory)
//! - `repository`: Bookmark repository
//! - `bus`: Change notification bus
//! - `observers`: Badge, toggle, and offline library surfaces
//! - `watch`: External change detection for a record file
//! - `api`: News and auth backend clients
//! - `session`: Login session persistence
//! - `config`: Application configuration

pub mod api;
pub mod bus;
pub mod config;
pub mod models;
pub mod observers;
pub mod repository;
pub mod session;
pub mod storage;
pub mod watch;

pub use api::{ApiError, AuthClient, Category, FeedRequest, NewsClient};
pub use bus::{NotificationBus, Subscription};
pub use config::Config;
pub use models::{Article, BookmarkCollection, BookmarkEntry, Source};
pub use observers::{BookmarkBadge, BookmarkToggle, OfflineLibrary};
pub use repository::BookmarkRepository;
pub use session::SessionStore;
pub use storage::{FileStore, MemoryStore, StorageError, StoreAdapter, BOOKMARKS_KEY, SESSION_KEY};
pub use watch::RecordWatcher;
