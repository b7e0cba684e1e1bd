//! File management commands

use crate::error::Result;
use crate::providers::types::{FileEntry, FilesTab};
use crate::services::{FileListing, FilesService, UploadProgress, UploadRequest};
use crate::state::AppState;

/// List files, optionally switching tab and narrowing by a search query
pub async fn list_files(
    state: &AppState,
    tab: Option<FilesTab>,
    query: Option<String>,
) -> Result<FileListing> {
    Ok(FilesService::list(state, tab, query.as_deref()))
}

/// Make a tab the active one and list it
pub async fn select_files_tab(state: &AppState, tab: FilesTab) -> Result<FileListing> {
    FilesService::select_tab(state, tab);
    Ok(FilesService::list(state, None, None))
}

/// Flip the star on a file, returning the new value
pub async fn toggle_star(state: &AppState, id: String) -> Result<bool> {
    FilesService::toggle_star(state, &id)
}

/// Remove a file from the workspace
pub async fn delete_file(state: &AppState, id: String) -> Result<FileEntry> {
    FilesService::delete(state, &id)
}

/// Resolve a file for download; the transfer itself is simulated
pub async fn download_file(state: &AppState, id: String) -> Result<FileEntry> {
    FilesService::download(state, &id)
}

/// Resolve a file for the share dialog; sharing itself is simulated
pub async fn share_file(state: &AppState, id: String) -> Result<FileEntry> {
    FilesService::share(state, &id)
}

/// Begin the simulated upload; false while one is already running
pub async fn start_upload(state: &AppState, request: UploadRequest) -> Result<bool> {
    Ok(state.upload.start(request))
}

/// Abort the upload in flight, returning whether one was running
pub async fn cancel_upload(state: &AppState) -> Result<bool> {
    Ok(state.upload.cancel())
}

/// Latest upload progress snapshot
pub async fn upload_progress(state: &AppState) -> Result<UploadProgress> {
    Ok(state.upload.progress())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{MockFileStorageProvider, MockMarketDataProvider};
    use std::sync::Arc;
    use std::time::Duration;

    async fn seeded_state() -> AppState {
        let state = AppState::new(
            Arc::new(MockMarketDataProvider::with_latency(Duration::ZERO)),
            Arc::new(MockFileStorageProvider::new()),
        );
        state.warm_up().await.unwrap();
        state
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_upload_appears_in_listing() {
        let state = seeded_state().await;
        let mut rx = state.upload.subscribe();

        let started = start_upload(
            &state,
            UploadRequest {
                file_name: "DCF Model.xlsx".to_string(),
                size_label: "2.2 MB".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(started);

        loop {
            rx.changed().await.unwrap();
            if rx.borrow().succeeded {
                break;
            }
        }

        let listing = list_files(&state, Some(FilesTab::MyFiles), None).await.unwrap();
        assert_eq!(listing.entries.len(), 6);
        assert_eq!(listing.entries.last().unwrap().entry.name, "DCF Model.xlsx");

        let progress = upload_progress(&state).await.unwrap();
        assert_eq!(progress.percent, 100);
        assert!(progress.succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_upload_leaves_listing_untouched() {
        let state = seeded_state().await;
        let mut rx = state.upload.subscribe();

        start_upload(
            &state,
            UploadRequest {
                file_name: "Scratch.csv".to_string(),
                size_label: "0.1 MB".to_string(),
            },
        )
        .await
        .unwrap();
        rx.changed().await.unwrap();

        assert!(cancel_upload(&state).await.unwrap());

        let listing = list_files(&state, Some(FilesTab::MyFiles), None).await.unwrap();
        assert_eq!(listing.entries.len(), 5);
        assert_eq!(
            upload_progress(&state).await.unwrap(),
            UploadProgress::default()
        );
    }
}
