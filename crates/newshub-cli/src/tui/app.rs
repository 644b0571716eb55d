//! Application state and logic

use std::sync::Arc;
use std::time::{Duration, Instant};

use newshub_core::{
    Article, BookmarkBadge, BookmarkEntry, BookmarkRepository, BookmarkToggle, Category,
    FeedRequest, OfflineLibrary,
};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// Window for the second press of a confirming key
const CONFIRM_WINDOW: Duration = Duration::from_secs(2);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing a search query (after pressing /)
    Search,
}

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Feed,
    Library,
}

impl ActivePane {
    /// Switch to the other pane
    pub fn toggle(self) -> Self {
        match self {
            ActivePane::Feed => ActivePane::Library,
            ActivePane::Library => ActivePane::Feed,
        }
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Search input buffer
    pub search_input: String,
    /// Which pane has focus
    pub active_pane: ActivePane,
    /// Feed currently shown
    pub feed_request: FeedRequest,
    /// Country used for headline queries
    pub country: String,
    /// One toggle per feed article
    pub feed: Vec<BookmarkToggle>,
    /// Selected feed article
    pub feed_index: usize,
    /// Selected library entry
    pub library_index: usize,
    /// Whether a feed request is in flight
    pub is_loading: bool,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// First press of the clear-all key
    pub pending_clear: Option<Instant>,
    badge: BookmarkBadge,
    library: OfflineLibrary,
    /// Library revision the selection was last checked against
    library_seen: u64,
    repo: Arc<BookmarkRepository>,
}

impl App {
    /// Create the app and mount the bookmark observers
    pub fn new(repo: Arc<BookmarkRepository>, country: String) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            active_pane: ActivePane::Feed,
            feed_request: FeedRequest::Headlines {
                category: Category::General,
                summaries: false,
            },
            country,
            feed: Vec::new(),
            feed_index: 0,
            library_index: 0,
            is_loading: false,
            status_message: None,
            status_message_time: None,
            show_help: false,
            pending_clear: None,
            badge: BookmarkBadge::mount(&repo),
            library: OfflineLibrary::mount(&repo),
            library_seen: 0,
            repo,
        }
    }

    /// The shared repository
    pub fn repo(&self) -> &Arc<BookmarkRepository> {
        &self.repo
    }

    /// Saved-article count for the title bar
    pub fn badge_count(&self) -> usize {
        self.badge.count()
    }

    /// Current offline library
    pub fn library_entries(&self) -> Vec<BookmarkEntry> {
        self.library.entries()
    }

    /// Replace the feed, mounting a toggle for each article
    ///
    /// The previous toggles are dropped, which unsubscribes them.
    pub fn set_feed(&mut self, articles: Vec<Article>) {
        self.feed = articles
            .into_iter()
            .map(|article| BookmarkToggle::mount(&self.repo, article))
            .collect();
        self.feed_index = 0;
    }

    /// Selected feed article
    pub fn current_article(&self) -> Option<&Article> {
        self.feed.get(self.feed_index).map(|t| t.article())
    }

    /// Selected library entry
    pub fn current_entry(&self) -> Option<BookmarkEntry> {
        self.library.entries().into_iter().nth(self.library_index)
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Clear the status message once it has been shown long enough
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn switch_pane(&mut self) {
        self.active_pane = self.active_pane.toggle();
    }

    /// Move selection up in the active pane
    pub fn move_up(&mut self) {
        let index = self.selected_index_mut();
        *index = index.saturating_sub(1);
    }

    /// Move selection down in the active pane
    pub fn move_down(&mut self) {
        let len = self.active_len();
        let index = self.selected_index_mut();
        if *index + 1 < len {
            *index += 1;
        }
    }

    /// Keep selections inside their lists after the library changed
    pub fn clamp_selection(&mut self) {
        let library_len = self.library.len();
        if self.library_index >= library_len {
            self.library_index = library_len.saturating_sub(1);
        }
        if self.feed_index >= self.feed.len() {
            self.feed_index = self.feed.len().saturating_sub(1);
        }
    }

    /// Re-clamp selections if the library changed since the last check
    ///
    /// Returns true if it had changed.
    pub fn sync_library(&mut self) -> bool {
        let revision = self.library.revision();
        if revision == self.library_seen {
            return false;
        }
        self.library_seen = revision;
        self.clamp_selection();
        true
    }

    /// Bookmark or un-bookmark the selected feed article
    pub fn toggle_current(&mut self) -> anyhow::Result<()> {
        let Some(toggle) = self.feed.get(self.feed_index) else {
            return Ok(());
        };

        let title = toggle.article().title.clone();
        if toggle.toggle()? {
            self.set_status(format!("Saved for offline: {}", title));
        } else {
            self.set_status(format!("Removed: {}", title));
        }
        self.clamp_selection();
        Ok(())
    }

    /// Remove the selected library entry
    pub fn remove_current_entry(&mut self) -> anyhow::Result<()> {
        let Some(entry) = self.current_entry() else {
            return Ok(());
        };

        self.library.remove(&entry.url)?;
        self.set_status(format!("Removed: {}", entry.title));
        self.clamp_selection();
        Ok(())
    }

    /// Clear the library on the second press within the confirm window
    ///
    /// Returns true if the library was cleared.
    pub fn request_clear_all(&mut self) -> anyhow::Result<bool> {
        let confirmed = self
            .pending_clear
            .is_some_and(|time| time.elapsed() <= CONFIRM_WINDOW);

        if !confirmed {
            if self.library.is_empty() {
                self.set_status("Library is already empty");
            } else {
                self.pending_clear = Some(Instant::now());
                self.set_status(format!(
                    "Press C again to remove all {} bookmark(s)",
                    self.library.len()
                ));
            }
            return Ok(false);
        }

        self.pending_clear = None;
        self.library.clear_all()?;
        self.library_index = 0;
        self.set_status("Library cleared");
        Ok(true)
    }

    /// URL of the selection in the active pane
    pub fn selected_url(&self) -> Option<String> {
        match self.active_pane {
            ActivePane::Feed => self.current_article().map(|a| a.url.clone()),
            ActivePane::Library => self.current_entry().map(|e| e.url),
        }
    }

    /// Show headlines for the next (or previous) category
    pub fn cycle_category(&mut self, forward: bool) {
        let current = match self.feed_request {
            FeedRequest::Headlines { category, .. } => category,
            _ => Category::General,
        };
        let summaries = self.summaries_enabled();
        let category = if forward {
            current.next()
        } else {
            current.prev()
        };
        self.feed_request = FeedRequest::Headlines {
            category,
            summaries,
        };
    }

    /// Switch headlines between plain and summarized
    pub fn toggle_summaries(&mut self) {
        if let FeedRequest::Headlines { category, summaries } = self.feed_request {
            self.feed_request = FeedRequest::Headlines {
                category,
                summaries: !summaries,
            };
        }
    }

    pub fn show_top_stories(&mut self) {
        self.feed_request = FeedRequest::Top;
    }

    fn summaries_enabled(&self) -> bool {
        matches!(
            self.feed_request,
            FeedRequest::Headlines {
                summaries: true,
                ..
            }
        )
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input.clear();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Finish typing a query; returns false if it was empty
    pub fn submit_search(&mut self) -> bool {
        self.input_mode = InputMode::Normal;
        let query = self.search_input.trim();
        if query.is_empty() {
            return false;
        }
        self.feed_request = FeedRequest::search(query);
        true
    }

    fn active_len(&self) -> usize {
        match self.active_pane {
            ActivePane::Feed => self.feed.len(),
            ActivePane::Library => self.library.len(),
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.active_pane {
            ActivePane::Feed => &mut self.feed_index,
            ActivePane::Library => &mut self.library_index,
        }
    }
}
