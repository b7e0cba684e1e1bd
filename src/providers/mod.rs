//! Data provider adapters module

pub mod mock;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use types::*;

/// Market data source that all provider implementations must implement
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider display name (e.g., "mock")
    fn provider_name(&self) -> &'static str;

    /// Fetch the full screener universe
    async fn fetch_equities(&self) -> Result<Vec<EquityRecord>>;

    /// Fetch the ratio rows of one statement for a symbol
    async fn fetch_metrics(&self, symbol: &str, statement: StatementKind)
        -> Result<Vec<MetricRow>>;
}

/// File storage backend serving the file-management screen
#[async_trait]
pub trait FileStorageProvider: Send + Sync {
    /// Provider display name (e.g., "mock")
    fn provider_name(&self) -> &'static str;

    /// Fetch the seeded workspace files, shared entries included
    async fn fetch_files(&self) -> Result<Vec<FileEntry>>;
}
