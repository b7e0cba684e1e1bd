//! Ratios Service
//!
//! Builds the financial ratio dashboard: statement tables, variance
//! against industry averages, and display formatting.

use crate::error::{AppError, Result};
use crate::providers::types::{CompanyProfile, MetricRow, StatementKind, TrendMarker, Unit};
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Symbol shown before the user picks one
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// One display-ready row of a statement table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioRow {
    pub metric: String,
    /// Formatted value, unit suffix attached (e.g. "5.2B", "42%")
    pub company_value: String,
    pub industry_average: String,
    /// Raw variance against the industry average, in percent
    pub variance_percent: f64,
    /// Signed one-decimal label (e.g. "+38.9%")
    pub variance_label: String,
    pub favorable: bool,
    pub trend: TrendMarker,
}

/// Full dashboard payload for one company and statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioDashboard {
    pub profile: CompanyProfile,
    pub statement: StatementKind,
    pub title: String,
    pub rows: Vec<RatioRow>,
}

/// Ratios service for business logic
pub struct RatiosService;

impl RatiosService {
    /// Variance of a value against its industry average, in percent
    ///
    /// Errors instead of producing inf/NaN when the average is zero.
    pub fn variance_percent(value: f64, average: f64) -> Result<f64> {
        if average == 0.0 {
            return Err(AppError::DivisionByZero(
                "industry average is zero".to_string(),
            ));
        }
        Ok((value / average - 1.0) * 100.0)
    }

    /// Raw value with its unit suffix concatenated, no padding
    pub fn format_value(value: f64, unit: Unit) -> String {
        format!("{}{}", value, unit.suffix())
    }

    /// Build the dashboard for a symbol, or the currently selected one
    ///
    /// Passing a symbol makes it the new selection; one that fails to
    /// resolve is rejected without touching the stored selection.
    pub async fn get_dashboard(state: &AppState, symbol: Option<String>) -> Result<RatioDashboard> {
        info!("RatiosService::get_dashboard");

        let (symbol, statement) = {
            let ratios = state.ratios.read();
            let symbol = match symbol {
                Some(symbol) => symbol.trim().to_uppercase(),
                None => ratios.symbol.clone(),
            };
            (symbol, ratios.statement)
        };

        let profile = Self::resolve_profile(state, &symbol).await?;
        // The selection moves only once the symbol has resolved
        state.ratios.write().symbol = symbol.clone();

        let metrics = state.market.fetch_metrics(&symbol, statement).await?;

        let rows = metrics
            .iter()
            .map(Self::build_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(RatioDashboard {
            profile,
            statement,
            title: statement.title().to_string(),
            rows,
        })
    }

    /// Switch the active statement tab
    pub fn select_statement(state: &AppState, statement: StatementKind) {
        info!("RatiosService::select_statement {:?}", statement);
        state.ratios.write().statement = statement;
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn build_row(metric: &MetricRow) -> Result<RatioRow> {
        let variance = Self::variance_percent(metric.company_value, metric.industry_average)
            .map_err(|_| {
                AppError::DivisionByZero(format!("industry average for '{}' is zero", metric.metric))
            })?;

        Ok(RatioRow {
            metric: metric.metric.clone(),
            company_value: Self::format_value(metric.company_value, metric.unit),
            industry_average: Self::format_value(metric.industry_average, metric.unit),
            variance_percent: variance,
            variance_label: format!("{:+.1}%", variance),
            favorable: variance >= 0.0,
            trend: metric.trend.marker(),
        })
    }

    async fn resolve_profile(state: &AppState, symbol: &str) -> Result<CompanyProfile> {
        if let Some(record) = state.lookup_symbol(symbol) {
            return Ok(CompanyProfile::from(&record));
        }

        // Cache miss: pull the universe once and retry before giving up.
        let records = state.market.fetch_equities().await?;
        state.load_symbol_cache(&records);
        *state.equity_universe.write() = records;

        state
            .lookup_symbol(symbol)
            .map(|record| CompanyProfile::from(&record))
            .ok_or_else(|| AppError::NotFound(format!("Unknown symbol '{}'", symbol)))
    }
}
