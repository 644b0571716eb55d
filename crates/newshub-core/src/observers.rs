//! Bookmark observers
//!
//! UI surfaces that display bookmark state. Each one subscribes to the
//! notification bus when mounted, reads the repository, and re-reads on
//! every notification ("pull on signal"). Unmounting (or dropping) unsubscribes.
//!
//! - `BookmarkBadge`: the saved-article count
//! - `BookmarkToggle`: whether one article is saved
//! - `OfflineLibrary`: the full saved list

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::bus::Subscription;
use crate::models::{Article, BookmarkCollection};
use crate::repository::BookmarkRepository;
use crate::storage::StorageResult;

/// A value derived from the repository, refreshed on every notification
pub struct Mounted<T> {
    state: Arc<Mutex<T>>,
    revision: Arc<AtomicU64>,
    subscription: Subscription,
}

impl<T: Clone + Default + Send + 'static> Mounted<T> {
    /// Subscribe, then read now and again after every change
    ///
    /// Reads happen under the state lock, so a change published while
    /// the first read runs is never overwritten by an older value.
    pub fn mount<F>(repo: &Arc<BookmarkRepository>, read: F) -> Self
    where
        F: Fn(&BookmarkRepository) -> T + Send + Sync + 'static,
    {
        let read = Arc::new(read);
        let state = Arc::new(Mutex::new(T::default()));
        let revision = Arc::new(AtomicU64::new(0));

        // Weak: the repository's bus owns this handler
        let repo_ref = Arc::downgrade(repo);
        let target = state.clone();
        let refresh = read.clone();
        let bump = revision.clone();
        let subscription = repo.subscribe(move || {
            let Some(repo) = repo_ref.upgrade() else {
                return;
            };
            let mut value = target.lock().unwrap_or_else(PoisonError::into_inner);
            *value = refresh(&repo);
            bump.fetch_add(1, Ordering::SeqCst);
        });

        {
            let mut value = state.lock().unwrap_or_else(PoisonError::into_inner);
            *value = read(repo);
        }

        Self {
            state,
            revision,
            subscription,
        }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of refreshes since mount
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Stop observing
    pub fn unmount(self) {
        self.subscription.unsubscribe();
    }
}

/// Saved-article count indicator
pub struct BookmarkBadge {
    count: Mounted<usize>,
}

impl BookmarkBadge {
    pub fn mount(repo: &Arc<BookmarkRepository>) -> Self {
        Self {
            count: Mounted::mount(repo, BookmarkRepository::count),
        }
    }

    /// Count to display
    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn unmount(self) {
        self.count.unmount();
    }
}

/// Per-article bookmark control
pub struct BookmarkToggle {
    article: Article,
    repo: Arc<BookmarkRepository>,
    state: Mounted<bool>,
}

impl BookmarkToggle {
    pub fn mount(repo: &Arc<BookmarkRepository>, article: Article) -> Self {
        let url = article.url.clone();
        let state = Mounted::mount(repo, move |repo| repo.is_bookmarked(&url));
        Self {
            article,
            repo: repo.clone(),
            state,
        }
    }

    /// The article this control belongs to
    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn is_bookmarked(&self) -> bool {
        self.state.get()
    }

    /// Flip the bookmark; returns the new state
    pub fn toggle(&self) -> StorageResult<bool> {
        self.repo.toggle(&self.article)
    }

    pub fn unmount(self) {
        self.state.unmount();
    }
}

/// The offline reading list
pub struct OfflineLibrary {
    repo: Arc<BookmarkRepository>,
    entries: Mounted<BookmarkCollection>,
}

impl OfflineLibrary {
    pub fn mount(repo: &Arc<BookmarkRepository>) -> Self {
        Self {
            repo: repo.clone(),
            entries: Mounted::mount(repo, BookmarkRepository::list),
        }
    }

    /// Saved articles, oldest first
    pub fn entries(&self) -> BookmarkCollection {
        self.entries.get()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Changes seen since mount; lets a view notice the list moved
    pub fn revision(&self) -> u64 {
        self.entries.revision()
    }

    /// Remove one article from the list
    pub fn remove(&self, url: &str) -> StorageResult<()> {
        self.repo.remove(url).map(|_| ())
    }

    /// Empty the list
    pub fn clear_all(&self) -> StorageResult<()> {
        self.repo.clear_all()
    }

    pub fn unmount(self) {
        self.entries.unmount();
    }
}
