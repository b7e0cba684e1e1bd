//! FinAnalytics Desktop - Financial Analysis Dashboard Engine
//!
//! View-state and data logic behind the dashboard screens: mocked ratio
//! tables, the stock screener, and the file-management panel. Rendering
//! is left entirely to the embedding shell.

pub mod commands;
pub mod error;
pub mod providers;
pub mod services;
pub mod state;

use std::sync::Arc;

use error::Result;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// `RUST_LOG` overrides the default filter.
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finanalytics_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the engine over the bundled mock providers and warm its caches
pub async fn bootstrap() -> Result<Arc<AppState>> {
    tracing::info!("Starting FinAnalytics engine...");

    let state = Arc::new(AppState::with_mock_providers());
    state.warm_up().await?;

    tracing::info!("Engine ready");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_bootstrap_warms_caches() {
        let state = bootstrap().await.unwrap();

        assert_eq!(state.equity_universe.read().len(), 10);
        assert_eq!(state.file_store.len(), 7);
        assert!(!state.screener.read().loading);
    }
}
