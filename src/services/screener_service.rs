//! Screener Service
//!
//! Filters the equity universe, pages the matches, and keeps the
//! screener view state (criteria, pagination, loading flag) consistent.
//! Filtering never reorders records; universe order is the display order.

use crate::error::{AppError, Result};
use crate::providers::types::{EquityRecord, TrendMarker};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

/// Rows-per-page choices offered by the table footer
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Conventional cap-size cutoffs, in billions of dollars
const LARGE_CAP_MIN_BILLIONS: f64 = 10.0;
const MID_CAP_MIN_BILLIONS: f64 = 2.0;

/// Market capitalization bucket filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapBucket {
    Any,
    Large,
    Mid,
    Small,
}

impl MarketCapBucket {
    /// Whether a market cap (in billions) falls inside this bucket
    pub fn matches(&self, market_cap_billions: f64) -> bool {
        match self {
            MarketCapBucket::Any => true,
            MarketCapBucket::Large => market_cap_billions >= LARGE_CAP_MIN_BILLIONS,
            MarketCapBucket::Mid => {
                market_cap_billions >= MID_CAP_MIN_BILLIONS
                    && market_cap_billions < LARGE_CAP_MIN_BILLIONS
            }
            MarketCapBucket::Small => market_cap_billions < MID_CAP_MIN_BILLIONS,
        }
    }
}

impl Default for MarketCapBucket {
    fn default() -> Self {
        MarketCapBucket::Any
    }
}

impl FromStr for MarketCapBucket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(MarketCapBucket::Any),
            "large" => Ok(MarketCapBucket::Large),
            "mid" => Ok(MarketCapBucket::Mid),
            "small" => Ok(MarketCapBucket::Small),
            other => Err(AppError::InvalidFilterValue(format!(
                "Unknown market cap bucket '{}'",
                other
            ))),
        }
    }
}

/// Active screen criteria; `None` fields are unset and match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub market_cap: MarketCapBucket,
    pub sector: Option<String>,
    pub max_pe_ratio: Option<f64>,
    pub min_dividend_yield: Option<f64>,
}

impl FilterCriteria {
    fn accepts(&self, record: &EquityRecord) -> bool {
        if !self.market_cap.matches(record.market_cap_billions) {
            return false;
        }
        if let Some(sector) = &self.sector {
            if &record.sector != sector {
                return false;
            }
        }
        if let Some(max_pe) = self.max_pe_ratio {
            if record.pe_ratio > max_pe {
                return false;
            }
        }
        if let Some(min_yield) = self.min_dividend_yield {
            if record.dividend_yield_percent < min_yield {
                return false;
            }
        }
        true
    }
}

/// Current table window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One display-ready screener row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenRow {
    #[serde(flatten)]
    pub record: EquityRecord,
    /// Trillions, one decimal (e.g. "$2.5T")
    pub market_cap_label: String,
    /// Two decimals (e.g. "$175.32")
    pub price_label: String,
    /// Raw percent (e.g. "0.6%"); "-" for non-payers
    pub dividend_yield_label: String,
    pub change_marker: TrendMarker,
}

/// Screen output: one page of matches plus table bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenResult {
    pub rows: Vec<ScreenRow>,
    pub total_matches: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Distinct sectors of the universe, first-appearance order
    pub available_sectors: Vec<String>,
    pub criteria: FilterCriteria,
}

/// Payload written when the user exports the current screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPayload {
    pub exported_at: DateTime<Utc>,
    pub criteria: FilterCriteria,
    pub total_matches: usize,
    /// All matches, not just the visible page
    pub rows: Vec<EquityRecord>,
}

/// Screener service for business logic
pub struct ScreenerService;

impl ScreenerService {
    /// Matching records in universe order
    pub fn apply_filters(
        universe: &[EquityRecord],
        criteria: &FilterCriteria,
    ) -> Vec<EquityRecord> {
        universe
            .iter()
            .filter(|record| criteria.accepts(record))
            .cloned()
            .collect()
    }

    /// Window of `rows` for the given page; out-of-range pages are empty
    pub fn paginate<'a>(rows: &'a [EquityRecord], pagination: &Pagination) -> &'a [EquityRecord] {
        let start = pagination.page_index.saturating_mul(pagination.page_size);
        if start >= rows.len() {
            return &[];
        }
        let end = (start + pagination.page_size).min(rows.len());
        &rows[start..end]
    }

    /// Number of pages needed for `total` rows; zero rows means zero pages
    pub fn page_count(total: usize, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        total.div_ceil(page_size)
    }

    /// Distinct sectors in first-appearance order, for the filter dropdown
    pub fn available_sectors(universe: &[EquityRecord]) -> Vec<String> {
        let mut sectors: Vec<String> = Vec::new();
        for record in universe {
            if !sectors.iter().any(|s| s == &record.sector) {
                sectors.push(record.sector.clone());
            }
        }
        sectors
    }

    /// Reject page sizes the footer does not offer
    pub fn validate_page_size(page_size: usize) -> Result<usize> {
        if PAGE_SIZE_OPTIONS.contains(&page_size) {
            Ok(page_size)
        } else {
            Err(AppError::Config(format!(
                "Unsupported page size {}; choose one of {:?}",
                page_size, PAGE_SIZE_OPTIONS
            )))
        }
    }

    /// Refresh the universe from the provider, then recompute the screen
    ///
    /// The loading flag stays set for the duration of the fetch, including
    /// the failure path.
    pub async fn run(state: &AppState) -> Result<ScreenResult> {
        info!("ScreenerService::run");
        state.screener.write().loading = true;

        let records = match state.market.fetch_equities().await {
            Ok(records) => records,
            Err(e) => {
                state.screener.write().loading = false;
                return Err(e);
            }
        };

        state.load_symbol_cache(&records);
        *state.equity_universe.write() = records;

        let result = Self::recompute(state);
        state.screener.write().loading = false;

        info!(
            "Screen applied: {} of {} records match",
            result.total_matches,
            state.equity_universe.read().len()
        );
        Ok(result)
    }

    /// Persist new criteria and run the screen
    pub async fn apply(state: &AppState, criteria: FilterCriteria) -> Result<ScreenResult> {
        state.screener.write().criteria = criteria;
        Self::run(state).await
    }

    /// Current screen from the stored universe, no provider round-trip
    pub fn snapshot(state: &AppState) -> ScreenResult {
        Self::recompute(state)
    }

    /// Jump to a page; indexes past the last page are clamped
    pub fn set_page(state: &AppState, page_index: usize) -> ScreenResult {
        state.screener.write().pagination.page_index = page_index;
        Self::recompute(state)
    }

    /// Switch rows-per-page and jump back to the first page
    pub fn set_page_size(state: &AppState, page_size: usize) -> Result<ScreenResult> {
        let page_size = Self::validate_page_size(page_size)?;
        {
            let mut screener = state.screener.write();
            screener.pagination.page_size = page_size;
            screener.pagination.page_index = 0;
        }
        Ok(Self::recompute(state))
    }

    /// Clear criteria and return to the first page; rows-per-page is kept
    pub fn reset(state: &AppState) -> ScreenResult {
        info!("ScreenerService::reset");
        {
            let mut screener = state.screener.write();
            screener.criteria = FilterCriteria::default();
            screener.pagination.page_index = 0;
        }
        Self::recompute(state)
    }

    /// Serialize every current match to pretty JSON for download
    pub fn export_json(state: &AppState) -> Result<String> {
        let criteria = state.screener.read().criteria.clone();
        let rows = {
            let universe = state.equity_universe.read();
            Self::apply_filters(&universe, &criteria)
        };

        let payload = ExportPayload {
            exported_at: Utc::now(),
            total_matches: rows.len(),
            criteria,
            rows,
        };
        let json = serde_json::to_string_pretty(&payload)?;

        info!(
            "Exported screen: {} rows, {} bytes",
            payload.total_matches,
            json.len()
        );
        Ok(json)
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    /// Recompute the visible page under the current state, clamping the
    /// page index so it never points past the last page.
    fn recompute(state: &AppState) -> ScreenResult {
        let universe = state.equity_universe.read();
        let mut screener = state.screener.write();

        let filtered = Self::apply_filters(&universe, &screener.criteria);
        let total_matches = filtered.len();
        let page_count = Self::page_count(total_matches, screener.pagination.page_size);

        screener.pagination.page_index = if page_count == 0 {
            0
        } else {
            screener.pagination.page_index.min(page_count - 1)
        };

        let rows = Self::paginate(&filtered, &screener.pagination)
            .iter()
            .cloned()
            .map(Self::display_row)
            .collect();

        ScreenResult {
            rows,
            total_matches,
            page_index: screener.pagination.page_index,
            page_size: screener.pagination.page_size,
            page_count,
            available_sectors: Self::available_sectors(&universe),
            criteria: screener.criteria.clone(),
        }
    }

    /// Attach the table's display labels to a matching record
    fn display_row(record: EquityRecord) -> ScreenRow {
        ScreenRow {
            market_cap_label: format!("${:.1}T", record.market_cap_billions / 1000.0),
            price_label: format!("${:.2}", record.price_usd),
            dividend_yield_label: if record.dividend_yield_percent > 0.0 {
                format!("{}%", record.dividend_yield_percent)
            } else {
                "-".to_string()
            },
            change_marker: TrendMarker::from_change(record.daily_change_percent),
            record,
        }
    }
}
