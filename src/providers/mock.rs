//! Mock data providers
//!
//! Serve the seeded demo datasets from memory. Equity fetches simulate
//! backend latency so loading states stay observable in the UI.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::types::*;
use super::{FileStorageProvider, MarketDataProvider};
use crate::error::Result;

/// Simulated round-trip for screener fetches
const FETCH_LATENCY_MS: u64 = 1_000;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn row(
    metric: &str,
    company_value: f64,
    industry_average: f64,
    unit: Unit,
    trend: TrendDirection,
) -> MetricRow {
    MetricRow {
        metric: metric.to_string(),
        company_value,
        industry_average,
        unit,
        trend,
    }
}

#[allow(clippy::too_many_arguments)]
fn equity(
    symbol: &str,
    name: &str,
    sector: &str,
    market_cap_billions: f64,
    pe_ratio: f64,
    dividend_yield_percent: f64,
    price_usd: f64,
    daily_change_percent: f64,
) -> EquityRecord {
    EquityRecord {
        symbol: symbol.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        market_cap_billions,
        pe_ratio,
        dividend_yield_percent,
        price_usd,
        daily_change_percent,
    }
}

fn seeded_file(
    id: &str,
    name: &str,
    uploaded: NaiveDate,
    size_label: &str,
    starred: bool,
    shared_by: Option<&str>,
) -> FileEntry {
    FileEntry {
        id: id.to_string(),
        name: name.to_string(),
        kind: FileKind::from_file_name(name),
        uploaded,
        size_label: size_label.to_string(),
        starred,
        shared_by: shared_by.map(str::to_string),
    }
}

/// In-memory market data source with a fixed screener universe
pub struct MockMarketDataProvider {
    latency: Duration,
}

impl MockMarketDataProvider {
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(FETCH_LATENCY_MS))
    }

    /// Override the simulated latency; tests pass `Duration::ZERO`
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn universe() -> Vec<EquityRecord> {
        vec![
            equity("AAPL", "Apple Inc.", "Technology", 2500.0, 28.5, 0.6, 175.32, 1.2),
            equity("MSFT", "Microsoft Corp.", "Technology", 2200.0, 32.1, 0.8, 310.45, -0.5),
            equity("JNJ", "Johnson & Johnson", "Healthcare", 450.0, 18.2, 2.5, 165.78, 0.8),
            equity("PG", "Procter & Gamble", "Consumer Goods", 380.0, 25.7, 2.3, 145.67, -1.1),
            equity("JPM", "JPMorgan Chase", "Financial", 420.0, 12.4, 2.8, 156.89, 2.3),
            equity("AMZN", "Amazon.com Inc.", "Consumer", 1600.0, 60.3, 0.0, 3200.45, 3.2),
            equity("TSLA", "Tesla Inc.", "Automotive", 800.0, 95.2, 0.0, 750.32, -2.7),
            equity("V", "Visa Inc.", "Financial", 500.0, 35.6, 0.7, 230.45, 1.5),
            equity("WMT", "Walmart Inc.", "Retail", 400.0, 22.1, 1.5, 145.67, 0.3),
            equity("KO", "Coca-Cola Co.", "Beverages", 250.0, 28.9, 3.0, 60.45, -0.8),
        ]
    }

    // Statement tables are symbol-independent in the mock dataset.
    fn statement_rows(statement: StatementKind) -> Vec<MetricRow> {
        match statement {
            StatementKind::BalanceSheet => vec![
                row("Current Ratio", 2.5, 1.8, Unit::None, TrendDirection::Up),
                row("Debt to Equity", 0.45, 0.60, Unit::None, TrendDirection::Down),
                row("Quick Ratio", 1.8, 1.2, Unit::None, TrendDirection::Up),
                row("Working Capital", 5.2, 3.1, Unit::Billions, TrendDirection::Up),
            ],
            StatementKind::IncomeStatement => vec![
                row("Gross Margin", 42.0, 38.0, Unit::Percent, TrendDirection::Up),
                row("Operating Margin", 28.0, 22.0, Unit::Percent, TrendDirection::Up),
                row("Net Profit Margin", 18.0, 15.0, Unit::Percent, TrendDirection::Up),
                row("EPS", 5.20, 3.80, Unit::None, TrendDirection::Up),
            ],
            StatementKind::CashFlow => vec![
                row("Operating Cash Flow", 8.5, 6.2, Unit::Billions, TrendDirection::Up),
                row("Free Cash Flow", 6.1, 4.3, Unit::Billions, TrendDirection::Up),
                row("Cash Flow Margin", 22.0, 18.0, Unit::Percent, TrendDirection::Up),
                row("CapEx Coverage", 3.5, 2.8, Unit::Multiple, TrendDirection::Up),
            ],
        }
    }
}

impl Default for MockMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_equities(&self) -> Result<Vec<EquityRecord>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(Self::universe())
    }

    async fn fetch_metrics(
        &self,
        _symbol: &str,
        statement: StatementKind,
    ) -> Result<Vec<MetricRow>> {
        Ok(Self::statement_rows(statement))
    }
}

/// In-memory file storage with the seeded workspace files
pub struct MockFileStorageProvider;

impl MockFileStorageProvider {
    pub fn new() -> Self {
        Self
    }

    fn seeded_files() -> Vec<FileEntry> {
        vec![
            seeded_file(
                "FL-0001",
                "Q3 Earnings Analysis.xlsx",
                date(2023, 11, 15),
                "2.4 MB",
                true,
                None,
            ),
            seeded_file(
                "FL-0002",
                "Valuation Model - AAPL.xlsx",
                date(2023, 11, 10),
                "1.8 MB",
                false,
                None,
            ),
            seeded_file(
                "FL-0003",
                "Industry Report Q3.pdf",
                date(2023, 11, 5),
                "4.2 MB",
                true,
                None,
            ),
            seeded_file(
                "FL-0004",
                "Portfolio Holdings.csv",
                date(2023, 10, 28),
                "0.8 MB",
                false,
                None,
            ),
            seeded_file(
                "FL-0005",
                "Market Research.pptx",
                date(2023, 10, 20),
                "5.7 MB",
                false,
                None,
            ),
            seeded_file(
                "FL-0006",
                "Team Analysis - Tech Sector.xlsx",
                date(2023, 11, 12),
                "3.1 MB",
                false,
                Some("Jane Doe"),
            ),
            seeded_file(
                "FL-0007",
                "Investment Thesis.docx",
                date(2023, 11, 8),
                "1.2 MB",
                false,
                Some("John Smith"),
            ),
        ]
    }
}

impl Default for MockFileStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStorageProvider for MockFileStorageProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_files(&self) -> Result<Vec<FileEntry>> {
        Ok(Self::seeded_files())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_universe_is_seeded() {
        let provider = MockMarketDataProvider::with_latency(Duration::ZERO);
        let records = provider.fetch_equities().await.unwrap();

        assert_eq!(records.len(), 10);
        assert_eq!(records[0].symbol, "AAPL");
        assert_eq!(records[0].sector, "Technology");

        let symbols: HashSet<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols.len(), records.len(), "symbols must be unique");
    }

    #[tokio::test]
    async fn test_statement_tables_have_nonzero_averages() {
        let provider = MockMarketDataProvider::with_latency(Duration::ZERO);
        let statements = [
            StatementKind::BalanceSheet,
            StatementKind::IncomeStatement,
            StatementKind::CashFlow,
        ];

        for statement in statements {
            let rows = provider.fetch_metrics("AAPL", statement).await.unwrap();
            assert_eq!(rows.len(), 4);
            for r in &rows {
                assert!(r.industry_average != 0.0, "{} average is zero", r.metric);
            }
        }
    }

    #[tokio::test]
    async fn test_balance_sheet_leads_with_current_ratio() {
        let provider = MockMarketDataProvider::with_latency(Duration::ZERO);
        let rows = provider
            .fetch_metrics("AAPL", StatementKind::BalanceSheet)
            .await
            .unwrap();

        assert_eq!(rows[0].metric, "Current Ratio");
        assert_eq!(rows[0].company_value, 2.5);
        assert_eq!(rows[0].industry_average, 1.8);
        assert_eq!(rows[0].unit, Unit::None);
    }

    #[tokio::test]
    async fn test_seeded_files_split_by_sharer() {
        let provider = MockFileStorageProvider::new();
        let files = provider.fetch_files().await.unwrap();

        assert_eq!(files.len(), 7);
        assert_eq!(files.iter().filter(|f| f.shared_by.is_none()).count(), 5);
        assert_eq!(files.iter().filter(|f| f.shared_by.is_some()).count(), 2);

        let ids: HashSet<&str> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), files.len(), "file ids must be unique");
    }

    #[tokio::test]
    async fn test_file_kinds_derived_from_names() {
        let provider = MockFileStorageProvider::new();
        let files = provider.fetch_files().await.unwrap();

        let by_id = |id: &str| files.iter().find(|f| f.id == id).unwrap();
        assert_eq!(by_id("FL-0001").kind, FileKind::Excel);
        assert_eq!(by_id("FL-0003").kind, FileKind::Pdf);
        assert_eq!(by_id("FL-0004").kind, FileKind::Csv);
        assert_eq!(by_id("FL-0005").kind, FileKind::Ppt);
        assert_eq!(by_id("FL-0007").kind, FileKind::Doc);
    }
}
