//! Application state management

use crate::error::Result;
use crate::providers::mock::{MockFileStorageProvider, MockMarketDataProvider};
use crate::providers::types::{EquityRecord, FilesTab, StatementKind};
use crate::providers::{FileStorageProvider, MarketDataProvider};
use crate::services::files_service::FileStore;
use crate::services::ratios_service::DEFAULT_SYMBOL;
use crate::services::screener_service::{FilterCriteria, Pagination};
use crate::services::upload_service::UploadManager;
use dashmap::DashMap;
use futures_util::try_join;
use parking_lot::RwLock;
use std::sync::Arc;

/// Screener view state
#[derive(Debug, Clone, Default)]
pub struct ScreenerState {
    pub criteria: FilterCriteria,
    pub pagination: Pagination,
    /// Set while a universe fetch is in flight
    pub loading: bool,
}

/// Ratio dashboard view state
#[derive(Debug, Clone)]
pub struct RatiosState {
    pub symbol: String,
    pub statement: StatementKind,
}

impl Default for RatiosState {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            statement: StatementKind::BalanceSheet,
        }
    }
}

/// File screen view state
#[derive(Debug, Clone)]
pub struct FilesState {
    pub active_tab: FilesTab,
}

impl Default for FilesState {
    fn default() -> Self {
        Self {
            active_tab: FilesTab::MyFiles,
        }
    }
}

/// Application state shared across all commands
pub struct AppState {
    /// Market data source
    pub market: Arc<dyn MarketDataProvider>,

    /// File storage backend
    pub file_storage: Arc<dyn FileStorageProvider>,

    /// Last fetched screener universe, in provider order
    pub equity_universe: RwLock<Vec<EquityRecord>>,

    /// Symbol cache (symbol -> equity record)
    pub symbol_cache: DashMap<String, EquityRecord>,

    /// Screener view state
    pub screener: RwLock<ScreenerState>,

    /// Ratio dashboard view state
    pub ratios: RwLock<RatiosState>,

    /// File screen view state
    pub files_view: RwLock<FilesState>,

    /// Workspace files
    pub file_store: FileStore,

    /// Simulated upload worker
    pub upload: UploadManager,
}

impl AppState {
    /// Create new application state over the given providers
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        file_storage: Arc<dyn FileStorageProvider>,
    ) -> Self {
        let file_store = FileStore::default();
        let upload = UploadManager::new(file_store.clone());

        tracing::info!(
            "State initialized with '{}' market data and '{}' file storage",
            market.provider_name(),
            file_storage.provider_name()
        );

        Self {
            market,
            file_storage,
            equity_universe: RwLock::new(Vec::new()),
            symbol_cache: DashMap::new(),
            screener: RwLock::new(ScreenerState::default()),
            ratios: RwLock::new(RatiosState::default()),
            files_view: RwLock::new(FilesState::default()),
            file_store,
            upload,
        }
    }

    /// Create state wired to the bundled mock providers
    pub fn with_mock_providers() -> Self {
        Self::new(
            Arc::new(MockMarketDataProvider::new()),
            Arc::new(MockFileStorageProvider::new()),
        )
    }

    /// Prefetch both providers and seed the caches
    pub async fn warm_up(&self) -> Result<()> {
        let (records, files) = try_join!(
            self.market.fetch_equities(),
            self.file_storage.fetch_files()
        )?;

        self.load_symbol_cache(&records);
        *self.equity_universe.write() = records;

        tracing::info!("Seeded {} workspace files", files.len());
        self.file_store.replace_all(files);

        Ok(())
    }

    /// Look up an equity by symbol, case-insensitive
    pub fn lookup_symbol(&self, symbol: &str) -> Option<EquityRecord> {
        self.symbol_cache
            .get(&symbol.trim().to_uppercase())
            .map(|r| r.clone())
    }

    /// Load equities into the symbol cache
    pub fn load_symbol_cache(&self, records: &[EquityRecord]) {
        self.symbol_cache.clear();
        for record in records {
            self.symbol_cache
                .insert(record.symbol.to_uppercase(), record.clone());
        }
        tracing::info!("Loaded {} symbols into cache", self.symbol_cache.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_view_state_defaults() {
        let screener = ScreenerState::default();
        assert!(!screener.loading);
        assert_eq!(screener.pagination.page_index, 0);
        assert_eq!(screener.pagination.page_size, 10);

        let ratios = RatiosState::default();
        assert_eq!(ratios.symbol, "AAPL");
        assert_eq!(ratios.statement, StatementKind::BalanceSheet);

        assert_eq!(FilesState::default().active_tab, FilesTab::MyFiles);
    }

    #[tokio::test]
    async fn test_warm_up_seeds_caches() {
        let state = AppState::new(
            Arc::new(MockMarketDataProvider::with_latency(Duration::ZERO)),
            Arc::new(MockFileStorageProvider::new()),
        );
        state.warm_up().await.unwrap();

        assert_eq!(state.equity_universe.read().len(), 10);
        assert_eq!(state.file_store.len(), 7);

        // Lookup ignores case and padding
        let record = state.lookup_symbol(" aapl ").unwrap();
        assert_eq!(record.name, "Apple Inc.");
        assert!(state.lookup_symbol("ZZZZ").is_none());
    }
}
