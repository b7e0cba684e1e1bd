//! Files Service
//!
//! Workspace file listing and row actions for the file-management screen.
//! Entries live in an in-memory store; list order is insertion order.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::providers::types::{FileEntry, FileIcon, FilesTab};
use crate::state::AppState;

/// Shared, ordered collection of workspace files
#[derive(Clone, Default)]
pub struct FileStore {
    entries: Arc<RwLock<Vec<FileEntry>>>,
}

impl FileStore {
    pub fn replace_all(&self, entries: Vec<FileEntry>) {
        *self.entries.write() = entries;
    }

    /// Append an entry; it lists after everything already present
    pub fn push(&self, entry: FileEntry) {
        self.entries.write().push(entry);
    }

    pub fn all(&self) -> Vec<FileEntry> {
        self.entries.read().clone()
    }

    pub fn find(&self, id: &str) -> Option<FileEntry> {
        self.entries.read().iter().find(|e| e.id == id).cloned()
    }

    /// Flip the star on an entry, returning the new value
    pub fn toggle_star(&self, id: &str) -> Option<bool> {
        let mut entries = self.entries.write();
        let entry = entries.iter_mut().find(|e| e.id == id)?;
        entry.starred = !entry.starred;
        Some(entry.starred)
    }

    pub fn remove(&self, id: &str) -> Option<FileEntry> {
        let mut entries = self.entries.write();
        let position = entries.iter().position(|e| e.id == id)?;
        Some(entries.remove(position))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// One display-ready file row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRow {
    #[serde(flatten)]
    pub entry: FileEntry,
    pub icon: FileIcon,
}

/// Listing payload for one tab of the file screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListing {
    pub tab: FilesTab,
    pub entries: Vec<FileRow>,
}

/// Files service for business logic
pub struct FilesService;

impl FilesService {
    /// List the active tab, optionally narrowed by a name search
    ///
    /// Passing a tab makes it the active one. Empty or whitespace queries
    /// match everything.
    pub fn list(state: &AppState, tab: Option<FilesTab>, query: Option<&str>) -> FileListing {
        let tab = match tab {
            Some(tab) => {
                state.files_view.write().active_tab = tab;
                tab
            }
            None => state.files_view.read().active_tab,
        };

        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let entries = state
            .file_store
            .all()
            .into_iter()
            .filter(|entry| Self::in_tab(entry, tab))
            .filter(|entry| {
                needle
                    .as_deref()
                    .map_or(true, |q| entry.name.to_lowercase().contains(q))
            })
            .map(|entry| FileRow {
                icon: entry.kind.icon(),
                entry,
            })
            .collect();

        FileListing { tab, entries }
    }

    /// Make a tab the active one without listing it
    pub fn select_tab(state: &AppState, tab: FilesTab) {
        info!("FilesService::select_tab {:?}", tab);
        state.files_view.write().active_tab = tab;
    }

    /// Flip the star on a file, returning the new value
    pub fn toggle_star(state: &AppState, id: &str) -> Result<bool> {
        state
            .file_store
            .toggle_star(id)
            .ok_or_else(|| Self::unknown_file(id))
    }

    /// Remove a file from the workspace
    pub fn delete(state: &AppState, id: &str) -> Result<FileEntry> {
        let entry = state
            .file_store
            .remove(id)
            .ok_or_else(|| Self::unknown_file(id))?;
        info!("Deleted file '{}'", entry.name);
        Ok(entry)
    }

    /// Resolve a file for download; the transfer itself is simulated
    pub fn download(state: &AppState, id: &str) -> Result<FileEntry> {
        let entry = state
            .file_store
            .find(id)
            .ok_or_else(|| Self::unknown_file(id))?;
        info!("Download prepared for '{}'", entry.name);
        Ok(entry)
    }

    /// Resolve a file for the share dialog; sharing itself is simulated
    pub fn share(state: &AppState, id: &str) -> Result<FileEntry> {
        let entry = state
            .file_store
            .find(id)
            .ok_or_else(|| Self::unknown_file(id))?;
        info!("Share requested for '{}'", entry.name);
        Ok(entry)
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn in_tab(entry: &FileEntry, tab: FilesTab) -> bool {
        match tab {
            FilesTab::MyFiles => entry.shared_by.is_none(),
            FilesTab::SharedWithMe => entry.shared_by.is_some(),
            // No template entries are seeded; the tab renders empty
            FilesTab::Templates => false,
        }
    }

    fn unknown_file(id: &str) -> AppError {
        AppError::NotFound(format!("Unknown file '{}'", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{MockFileStorageProvider, MockMarketDataProvider};
    use crate::providers::types::{FileKind, IconGlyph, IconTone};
    use chrono::NaiveDate;
    use std::time::Duration;

    async fn seeded_state() -> AppState {
        let state = AppState::new(
            Arc::new(MockMarketDataProvider::with_latency(Duration::ZERO)),
            Arc::new(MockFileStorageProvider::new()),
        );
        state.warm_up().await.unwrap();
        state
    }

    fn entry(id: &str, name: &str) -> FileEntry {
        FileEntry {
            id: id.to_string(),
            name: name.to_string(),
            kind: FileKind::from_file_name(name),
            uploaded: NaiveDate::from_ymd_opt(2023, 11, 20).unwrap(),
            size_label: "1.0 MB".to_string(),
            starred: false,
            shared_by: None,
        }
    }

    #[test]
    fn test_store_preserves_insertion_order() {
        let store = FileStore::default();
        store.replace_all(vec![entry("a", "first.csv"), entry("b", "second.csv")]);
        store.push(entry("c", "third.csv"));

        let ids: Vec<String> = store.all().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_list_splits_tabs() {
        let state = seeded_state().await;

        let mine = FilesService::list(&state, Some(FilesTab::MyFiles), None);
        assert_eq!(mine.entries.len(), 5);
        assert!(mine.entries.iter().all(|r| r.entry.shared_by.is_none()));

        let shared = FilesService::list(&state, Some(FilesTab::SharedWithMe), None);
        assert_eq!(shared.entries.len(), 2);
        assert_eq!(shared.entries[0].entry.shared_by.as_deref(), Some("Jane Doe"));

        let templates = FilesService::list(&state, Some(FilesTab::Templates), None);
        assert!(templates.entries.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let state = seeded_state().await;

        let hits = FilesService::list(&state, Some(FilesTab::MyFiles), Some("q3"));
        let names: Vec<&str> = hits.entries.iter().map(|r| r.entry.name.as_str()).collect();
        assert_eq!(names, ["Q3 Earnings Analysis.xlsx", "Industry Report Q3.pdf"]);

        // Whitespace-only queries match everything
        let all = FilesService::list(&state, None, Some("   "));
        assert_eq!(all.entries.len(), 5);
    }

    #[tokio::test]
    async fn test_search_applies_to_active_tab() {
        let state = seeded_state().await;
        FilesService::select_tab(&state, FilesTab::SharedWithMe);

        let hits = FilesService::list(&state, None, Some("tech"));
        assert_eq!(hits.tab, FilesTab::SharedWithMe);
        assert_eq!(hits.entries.len(), 1);
        assert_eq!(hits.entries[0].entry.name, "Team Analysis - Tech Sector.xlsx");
    }

    #[tokio::test]
    async fn test_listing_rows_carry_icons() {
        let state = seeded_state().await;
        let mine = FilesService::list(&state, Some(FilesTab::MyFiles), None);

        let pdf = mine
            .entries
            .iter()
            .find(|r| r.entry.id == "FL-0003")
            .unwrap();
        assert_eq!(pdf.icon.glyph, IconGlyph::Document);
        assert_eq!(pdf.icon.tone, IconTone::Error);
    }

    #[tokio::test]
    async fn test_toggle_star_flips_and_persists() {
        let state = seeded_state().await;

        assert!(FilesService::toggle_star(&state, "FL-0002").unwrap());
        assert!(state.file_store.find("FL-0002").unwrap().starred);

        assert!(!FilesService::toggle_star(&state, "FL-0002").unwrap());
        assert!(!state.file_store.find("FL-0002").unwrap().starred);
    }

    #[tokio::test]
    async fn test_delete_removes_once() {
        let state = seeded_state().await;

        let removed = FilesService::delete(&state, "FL-0004").unwrap();
        assert_eq!(removed.name, "Portfolio Holdings.csv");
        assert_eq!(state.file_store.len(), 6);

        let err = FilesService::delete(&state, "FL-0004").unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_row_actions_reject_unknown_ids() {
        let state = seeded_state().await;

        assert_eq!(FilesService::toggle_star(&state, "nope").unwrap_err().code(), "NOT_FOUND");
        assert_eq!(FilesService::download(&state, "nope").unwrap_err().code(), "NOT_FOUND");
        assert_eq!(FilesService::share(&state, "nope").unwrap_err().code(), "NOT_FOUND");

        let entry = FilesService::download(&state, "FL-0001").unwrap();
        assert_eq!(entry.name, "Q3 Earnings Analysis.xlsx");
    }

    #[tokio::test]
    async fn test_new_entries_list_last() {
        let state = seeded_state().await;
        state.file_store.push(entry("new-1", "Fresh Upload.csv"));

        let mine = FilesService::list(&state, Some(FilesTab::MyFiles), None);
        assert_eq!(mine.entries.last().unwrap().entry.id, "new-1");
    }
}
