//! Services Layer
//!
//! View-state and data-shaping logic shared by every UI command.
//! Commands stay thin; services own the transitions so the same logic
//! can back a desktop shell, a web view, or a test harness unchanged.
//!
//! # Architecture
//!
//! ```text
//! Frontend UI --> Commands --> Services --> Providers (market data, file storage)
//! ```
//!
//! # Services
//!
//! - `RatiosService` - Ratio dashboard tables and variance math
//! - `ScreenerService` - Filtering, pagination, screen export
//! - `FilesService` - Workspace file listing and actions
//! - `UploadManager` - Simulated upload worker and progress feed

pub mod files_service;
pub mod ratios_service;
pub mod screener_service;
pub mod upload_service;

// Re-export commonly used types and services
pub use files_service::{FileListing, FileRow, FileStore, FilesService};
pub use ratios_service::{RatioDashboard, RatioRow, RatiosService, DEFAULT_SYMBOL};
pub use screener_service::{
    FilterCriteria, MarketCapBucket, Pagination, ScreenResult, ScreenRow, ScreenerService,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
pub use upload_service::{UploadManager, UploadProgress, UploadRequest};
