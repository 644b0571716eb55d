//! Record watcher
//!
//! Detects changes made to a record file by another process (a second
//! `newshub` instance, or a user editing the file). Observers treat such a
//! change the same as a local notification: re-read the repository.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

/// Something happened to the watched record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEvent {
    Changed,
}

/// Watches one record file for external changes
pub struct RecordWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<RecordEvent>,
}

impl RecordWatcher {
    /// Watch the file at `record_path`
    ///
    /// The parent directory is watched so the record may be created,
    /// replaced, or deleted while watching.
    pub fn new(record_path: &Path) -> Result<Self> {
        let dir = record_path
            .parent()
            .ok_or_else(|| anyhow!("Record path has no parent: {:?}", record_path))?;
        let file_name = record_path
            .file_name()
            .ok_or_else(|| anyhow!("Record path has no file name: {:?}", record_path))?
            .to_os_string();

        let (tx, rx) = bounded::<RecordEvent>(100);
        let mut watcher = create_watcher(tx, file_name)?;
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {:?}", dir))?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Drain pending events; true if the record changed since the last call
    pub fn check_events(&self) -> bool {
        let mut has_events = false;
        while self.receiver.try_recv().is_ok() {
            has_events = true;
        }
        has_events
    }
}

fn create_watcher(tx: Sender<RecordEvent>, file_name: OsString) -> Result<RecommendedWatcher> {
    let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if touches_record(&event, &file_name) {
                // Full channel means a refresh is already pending
                let _ = tx.try_send(RecordEvent::Changed);
            }
        }
        Err(e) => warn!(error = %e, "record watch error"),
    })
    .context("Failed to create file watcher")?;

    Ok(watcher)
}

/// Whether `event` is a create/modify/remove of the record file
fn touches_record(event: &Event, file_name: &OsStr) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );

    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|name| name == file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
    use std::path::PathBuf;

    fn record() -> &'static OsStr {
        OsStr::new("bookmarkedArticles.json")
    }

    #[test]
    fn test_modify_of_record_counts() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/data/newshub/bookmarkedArticles.json"));
        assert!(touches_record(&event, record()));
    }

    #[test]
    fn test_create_and_remove_count() {
        let created = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/data/bookmarkedArticles.json"));
        let removed = Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("/data/bookmarkedArticles.json"));
        assert!(touches_record(&created, record()));
        assert!(touches_record(&removed, record()));
    }

    #[test]
    fn test_other_files_ignored() {
        let temp = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/data/bookmarkedArticles.tmp"));
        let session = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/data/user.json"));
        assert!(!touches_record(&temp, record()));
        assert!(!touches_record(&session, record()));
    }

    #[test]
    fn test_access_ignored() {
        let event = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/data/bookmarkedArticles.json"));
        assert!(!touches_record(&event, record()));
    }

    #[test]
    fn test_watcher_starts_on_existing_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let watcher = RecordWatcher::new(&temp_dir.path().join("bookmarkedArticles.json")).unwrap();
        // Nothing has happened yet
        assert!(!watcher.check_events());
    }
}
