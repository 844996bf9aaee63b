// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`:
//
//   GET /api/v1/health
//   GET /api/v1/tickers
//   GET /api/v1/dashboard?symbol=..&indicator=..&returns=..
//
// `indicator` takes "RSI" | "SMA" | "EMA" | "MACD"; `returns` takes
// "Daily Returns" | "Cumulative Returns".  Absent or empty means no panel.
//
// CORS is configured permissively so a browser front-end on another origin
// can call the API.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::dashboard::{load_dashboard, ChartRequest};
use crate::market_data::HistoryError;
use crate::types::UnknownChoice;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/tickers", get(tickers))
        .route("/api/v1/dashboard", get(dashboard))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Errors
// =============================================================================

/// Failures surfaced to API clients as `{ "error": "..." }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("query parameter 'symbol' is required")]
    MissingSymbol,

    #[error(transparent)]
    BadSelection(#[from] UnknownChoice),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingSymbol | Self::BadSelection(_) => StatusCode::BAD_REQUEST,
            Self::History(HistoryError::UnknownSymbol(_)) => StatusCode::NOT_FOUND,
            Self::History(HistoryError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            Self::History(HistoryError::InvalidSeries { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "dashboard request failed upstream");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Instrument catalogue
// =============================================================================

async fn tickers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tickers = state.runtime_config.read().tickers.clone();
    Json(tickers)
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    indicator: Option<String>,
    #[serde(default)]
    returns: Option<String>,
}

impl DashboardQuery {
    fn into_request(self) -> Result<ChartRequest, ApiError> {
        let symbol = self
            .symbol
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or(ApiError::MissingSymbol)?;

        Ok(ChartRequest {
            symbol,
            indicator: self.indicator.as_deref().unwrap_or("").parse()?,
            returns: self.returns.as_deref().unwrap_or("").parse()?,
        })
    }
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = query.into_request()?;

    // Copy what we need and release the lock before awaiting.
    let (params, lookback) = {
        let config = state.runtime_config.read();
        (config.indicator_params.clone(), config.lookback)
    };

    let dashboard = load_dashboard(state.history.as_ref(), &request, &params, lookback).await?;

    info!(
        symbol = %request.symbol,
        indicator = %request.indicator,
        returns = %request.returns,
        "dashboard served"
    );

    Ok(Json(dashboard))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::market_data::history::stub::StubSource;
    use crate::market_data::time_series::fixtures::series_from_closes;
    use crate::runtime_config::RuntimeConfig;

    fn app() -> Router {
        let closes: Vec<f64> = (1..=40).map(|x| 100.0 + (x % 5) as f64).collect();
        let mut source = StubSource::with("DLF.NS", series_from_closes(&closes));
        source
            .series
            .insert("ONE.NS".to_string(), series_from_closes(&[10.0]));
        source.failing.push("DOWN.NS".to_string());

        let state = Arc::new(AppState::new(RuntimeConfig::default(), Arc::new(source)));
        router(state)
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn tickers_lists_catalogue() {
        let (status, body) = get("/api/v1/tickers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 29);
        assert_eq!(body[0]["label"], "HDFC Bank Limited");
    }

    #[tokio::test]
    async fn dashboard_with_both_panels() {
        let (status, body) =
            get("/api/v1/dashboard?symbol=dlf.ns&indicator=MACD&returns=Daily%20Returns").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "DLF.NS");

        let kinds: Vec<&str> = body["chart"]["panels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["Price", "Volume", "Indicator", "Returns"]);
        assert_eq!(body["chart"]["panels"][2]["traces"][1]["name"], "Signal_Line");
        assert!(body["delta"]["relative_change"].is_number());
    }

    #[tokio::test]
    async fn absent_selections_omit_panels() {
        let (status, body) = get("/api/v1/dashboard?symbol=DLF.NS&indicator=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"]["panels"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn single_record_reports_undefined_delta() {
        let (status, body) = get("/api/v1/dashboard?symbol=ONE.NS").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["delta"].is_null());
    }

    #[tokio::test]
    async fn missing_symbol_is_bad_request() {
        let (status, body) = get("/api/v1/dashboard?indicator=RSI").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "query parameter 'symbol' is required");
    }

    #[tokio::test]
    async fn unknown_selection_is_bad_request() {
        let (status, body) = get("/api/v1/dashboard?symbol=DLF.NS&returns=Mean").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown returns selection 'Mean'");
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        let (status, _) = get("/api/v1/dashboard?symbol=NOPE.NS").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let (status, body) = get("/api/v1/dashboard?symbol=DOWN.NS").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("connection reset"));
    }
}
