//! Upload Service
//!
//! Simulated upload worker. Progress advances by a fixed step on a fixed
//! timer and is published over a watch channel; subscribers render
//! whatever they last observed. Only one upload runs at a time.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use super::files_service::FileStore;
use crate::providers::types::{FileEntry, FileKind};

/// Interval between progress steps
pub const UPLOAD_TICK_MS: u64 = 300;

/// Progress gained per tick, in percent
pub const UPLOAD_STEP_PERCENT: u8 = 10;

/// Snapshot of the upload in flight, if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub is_uploading: bool,
    pub percent: u8,
    pub file_name: Option<String>,
    /// Set when the last upload ran to completion; cleared on the next start
    pub succeeded: bool,
}

/// What the user picked in the upload dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub file_name: String,
    pub size_label: String,
}

/// Drives the simulated upload and owns its progress feed
pub struct UploadManager {
    progress_tx: Arc<watch::Sender<UploadProgress>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    tick: Duration,
    store: FileStore,
}

impl UploadManager {
    pub fn new(store: FileStore) -> Self {
        Self::with_tick(store, Duration::from_millis(UPLOAD_TICK_MS))
    }

    /// Override the interval between progress steps
    pub fn with_tick(store: FileStore, tick: Duration) -> Self {
        let (progress_tx, _) = watch::channel(UploadProgress::default());
        Self {
            progress_tx: Arc::new(progress_tx),
            worker: Mutex::new(None),
            tick,
            store,
        }
    }

    /// Watch the progress feed
    pub fn subscribe(&self) -> watch::Receiver<UploadProgress> {
        self.progress_tx.subscribe()
    }

    /// Latest progress snapshot
    pub fn progress(&self) -> UploadProgress {
        self.progress_tx.borrow().clone()
    }

    /// Begin an upload; returns false while one is already running
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, request: UploadRequest) -> bool {
        let mut worker = self.worker.lock();

        if self.progress_tx.borrow().is_uploading {
            warn!(
                "Upload already in progress; ignoring '{}'",
                request.file_name
            );
            return false;
        }

        self.progress_tx.send_replace(UploadProgress {
            is_uploading: true,
            percent: 0,
            file_name: Some(request.file_name.clone()),
            succeeded: false,
        });
        info!("Upload started: '{}'", request.file_name);

        let progress_tx = self.progress_tx.clone();
        let store = self.store.clone();
        let tick = self.tick;

        *worker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // The first tick resolves immediately; progress starts after one period
            interval.tick().await;

            loop {
                interval.tick().await;

                let mut percent = 0;
                progress_tx.send_modify(|p| {
                    p.percent = (p.percent + UPLOAD_STEP_PERCENT).min(100);
                    percent = p.percent;
                });

                if percent >= 100 {
                    store.push(Self::completed_entry(&request));
                    progress_tx.send_modify(|p| {
                        p.is_uploading = false;
                        p.succeeded = true;
                    });
                    info!("Upload finished: '{}'", request.file_name);
                    break;
                }
            }
        }));

        true
    }

    /// Abort the upload in flight and reset the feed to idle
    ///
    /// Returns whether an upload was actually running.
    pub fn cancel(&self) -> bool {
        let mut worker = self.worker.lock();
        if let Some(handle) = worker.take() {
            handle.abort();
        }

        let was_uploading = self.progress_tx.borrow().is_uploading;
        if was_uploading {
            info!("Upload cancelled");
        }
        self.progress_tx.send_replace(UploadProgress::default());
        was_uploading
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn completed_entry(request: &UploadRequest) -> FileEntry {
        FileEntry {
            id: format!("FL-{}", Uuid::new_v4().simple()),
            name: request.file_name.clone(),
            kind: FileKind::from_file_name(&request.file_name),
            uploaded: Utc::now().date_naive(),
            size_label: request.size_label.clone(),
            starred: false,
            shared_by: None,
        }
    }
}

impl Drop for UploadManager {
    fn drop(&mut self) {
        if let Some(handle) = self.worker.lock().take() {
            handle.abort();
        }
    }
}
