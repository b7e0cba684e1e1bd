//! Stock screener commands

use crate::error::{AppError, Result};
use crate::services::{FilterCriteria, ScreenResult, ScreenerService};
use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// Raw filter form values as the frontend submits them
///
/// Numeric fields arrive as strings straight from the inputs; empty
/// means unset, as does an empty dropdown choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub market_cap: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub max_pe_ratio: String,
    #[serde(default)]
    pub min_dividend_yield: String,
}

impl FilterRequest {
    /// Parse the form into criteria, rejecting malformed numbers
    pub fn into_criteria(self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            market_cap: self.market_cap.parse()?,
            sector: parse_choice(&self.sector),
            max_pe_ratio: parse_number("Max P/E Ratio", &self.max_pe_ratio)?,
            min_dividend_yield: parse_number("Min Dividend Yield", &self.min_dividend_yield)?,
        })
    }
}

fn parse_choice(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_number(field: &str, value: &str) -> Result<Option<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let number: f64 = value.parse().map_err(|_| {
        AppError::InvalidFilterValue(format!("{} must be a number, got '{}'", field, value))
    })?;

    if !number.is_finite() || number < 0.0 {
        return Err(AppError::InvalidFilterValue(format!(
            "{} must be a non-negative finite number, got '{}'",
            field, value
        )));
    }

    Ok(Some(number))
}

/// Apply the filter form and run the screen
pub async fn apply_screen(state: &AppState, request: FilterRequest) -> Result<ScreenResult> {
    tracing::info!("apply_screen: {:?}", request);
    let criteria = request.into_criteria()?;
    ScreenerService::apply(state, criteria).await
}

/// Current screen from state, no provider round-trip
pub async fn get_screen(state: &AppState) -> Result<ScreenResult> {
    Ok(ScreenerService::snapshot(state))
}

/// Jump to a table page; out-of-range indexes clamp to the last page
pub async fn set_page(state: &AppState, page_index: usize) -> Result<ScreenResult> {
    Ok(ScreenerService::set_page(state, page_index))
}

/// Change rows-per-page and jump back to the first page
pub async fn set_page_size(state: &AppState, page_size: usize) -> Result<ScreenResult> {
    ScreenerService::set_page_size(state, page_size)
}

/// Clear criteria and jump back to the first page
pub async fn reset_screen(state: &AppState) -> Result<ScreenResult> {
    Ok(ScreenerService::reset(state))
}

/// Export every current match as pretty JSON
pub async fn export_screen(state: &AppState) -> Result<String> {
    ScreenerService::export_json(state)
}
