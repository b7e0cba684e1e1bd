//! Ratio dashboard commands

use crate::error::Result;
use crate::providers::types::StatementKind;
use crate::services::{RatioDashboard, RatiosService};
use crate::state::AppState;

/// Get the ratio dashboard for a symbol
///
/// Passing a symbol also makes it the current selection; `None` serves
/// whatever is already selected.
pub async fn get_ratio_dashboard(
    state: &AppState,
    symbol: Option<String>,
) -> Result<RatioDashboard> {
    let dashboard = RatiosService::get_dashboard(state, symbol).await?;
    tracing::info!(
        "Dashboard built for {} ({} rows)",
        dashboard.profile.symbol,
        dashboard.rows.len()
    );
    Ok(dashboard)
}

/// Switch the statement tab and rebuild the dashboard
pub async fn select_statement(
    state: &AppState,
    statement: StatementKind,
) -> Result<RatioDashboard> {
    RatiosService::select_statement(state, statement);
    RatiosService::get_dashboard(state, None).await
}
