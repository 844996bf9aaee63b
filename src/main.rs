// =============================================================================
// Price Dashboard — Main Entry Point
// =============================================================================
//
// Serves technical-analysis chart specifications over HTTP.  Each request
// fetches daily history for one instrument, computes the indicators, and
// returns the panel layout plus the headline delta.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod chart;
mod dashboard;
mod enrichment;
mod indicators;
mod market_data;
mod runtime_config;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::market_data::YahooClient;
use crate::runtime_config::RuntimeConfig;

const CONFIG_PATH: &str = "runtime_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Price Dashboard — starting up");

    let mut config = match RuntimeConfig::load(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            let cfg = RuntimeConfig::default();
            if let Err(e) = cfg.save(CONFIG_PATH) {
                error!(error = %e, "Failed to write default config");
            }
            cfg
        }
    };
    config.apply_env_overrides()?;

    info!(
        bind_addr = %config.bind_addr,
        lookback = config.lookback,
        history_range = %config.history_range,
        tickers = config.tickers.len(),
        "Configuration ready"
    );

    // ── 2. History collaborator & shared state ───────────────────────────
    let history = Arc::new(YahooClient::new(config.history_range.clone())?);
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, history));

    // ── 3. API server ────────────────────────────────────────────────────
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    // ── 4. Serve until Ctrl+C ────────────────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await
        .context("API server failed")?;

    info!("Price Dashboard shut down complete.");
    Ok(())
}
