// =============================================================================
// Dashboard pipeline — one request, one full recomputation
// =============================================================================
//
//   HistorySource -> TimeSeries (tail) -> EnrichedSeries -> ChartSpec + delta
//
// Nothing is cached between requests: every call derives its output from
// the history it was handed and the two selections, and nothing else.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::chart::{compose_chart, compute_delta, ChartSpec, DeltaSummary};
use crate::enrichment::{EnrichedSeries, IndicatorParams};
use crate::market_data::{HistoryError, HistorySource, TimeSeries};
use crate::types::{IndicatorChoice, ReturnsChoice};

/// Request-scoped input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub symbol: String,
    #[serde(default)]
    pub indicator: IndicatorChoice,
    #[serde(default)]
    pub returns: ReturnsChoice,
}

/// Output handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub symbol: String,
    pub chart: ChartSpec,
    /// `None` when the series has fewer than two records.
    pub delta: Option<DeltaSummary>,
}

/// Pure core: enrich `series` and compose the chart plus delta summary.
pub fn build_dashboard(
    series: TimeSeries,
    request: &ChartRequest,
    params: &IndicatorParams,
) -> Dashboard {
    let delta = compute_delta(&series);
    let enriched = EnrichedSeries::compute(series, params);
    let chart = compose_chart(&enriched, request.indicator, request.returns);

    debug!(
        symbol = %request.symbol,
        records = enriched.len(),
        indicator = %request.indicator,
        returns = %request.returns,
        panels = chart.panels.len(),
        "dashboard composed"
    );

    Dashboard {
        symbol: request.symbol.clone(),
        chart,
        delta,
    }
}

/// Fetch, trim to the newest `lookback` records, then run the core.
///
/// A fetch failure is returned as-is; the core is not invoked.
#[instrument(skip(source, params), fields(symbol = %request.symbol))]
pub async fn load_dashboard(
    source: &dyn HistorySource,
    request: &ChartRequest,
    params: &IndicatorParams,
    lookback: usize,
) -> Result<Dashboard, HistoryError> {
    let series = source.fetch_history(&request.symbol).await?.tail(lookback);

    info!(
        records = series.len(),
        from = %series.records()[0].date,
        to = %series.last().date,
        "history loaded"
    );

    Ok(build_dashboard(series, request, params))
}
