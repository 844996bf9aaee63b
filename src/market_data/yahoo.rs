// =============================================================================
// Yahoo Finance chart client — daily OHLCV history
// =============================================================================
//
// GET {base}/v8/finance/chart/{symbol}?range={range}&interval=1d
//
// The response is columnar: one `timestamp` array plus parallel `open`,
// `high`, `low`, `close`, `volume` arrays under `indicators.quote[0]`.  Rows
// with a null in any column (market holidays, halted sessions) are dropped.
// =============================================================================

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tracing::{debug, instrument, warn};

use super::history::{HistoryError, HistorySource};
use super::time_series::{OhlcvRecord, TimeSeries};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo chart-endpoint client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    base_url: String,
    range: String,
    client: reqwest::Client,
}

impl YahooClient {
    /// `range` is a Yahoo range token such as `"max"`, `"5y"` or `"1y"`.
    pub fn new(range: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("price-dashboard/1.0")
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            range: range.into(),
            client,
        })
    }

    #[instrument(skip(self), name = "yahoo::fetch_chart")]
    async fn fetch_chart(&self, symbol: &str) -> Result<TimeSeries, HistoryError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, self.range
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(HistoryError::UnknownSymbol(symbol.to_string()));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse chart response")?;

        if !status.is_success() {
            return Err(anyhow::anyhow!("Yahoo chart returned {status}: {body}").into());
        }

        let records = parse_chart(&body, symbol)?;
        if records.is_empty() {
            return Err(HistoryError::UnknownSymbol(symbol.to_string()));
        }

        debug!(symbol, count = records.len(), "daily history fetched");

        TimeSeries::new(records).map_err(|source| HistoryError::InvalidSeries {
            symbol: symbol.to_string(),
            source,
        })
    }
}

impl HistorySource for YahooClient {
    fn fetch_history<'a>(
        &'a self,
        symbol: &'a str,
    ) -> BoxFuture<'a, Result<TimeSeries, HistoryError>> {
        self.fetch_chart(symbol).boxed()
    }
}

/// Turn a chart payload into ascending, date-unique records.
///
/// A symbol-level error object in the payload (`chart.error`) maps to
/// `UnknownSymbol`; a missing structure is an upstream failure.
fn parse_chart(body: &serde_json::Value, symbol: &str) -> Result<Vec<OhlcvRecord>, HistoryError> {
    let chart = &body["chart"];

    if !chart["error"].is_null() {
        warn!(symbol, error = %chart["error"], "chart endpoint reported an error");
        return Err(HistoryError::UnknownSymbol(symbol.to_string()));
    }

    let result = chart["result"]
        .as_array()
        .and_then(|arr| arr.first())
        .context("chart.result is missing or empty")?;

    // A listed symbol with no trading history comes back without timestamps.
    let Some(timestamps) = result["timestamp"].as_array() else {
        return Ok(Vec::new());
    };

    let quote = &result["indicators"]["quote"][0];
    let (open, high, low, close, volume) = (
        quote_column(quote, "open")?,
        quote_column(quote, "high")?,
        quote_column(quote, "low")?,
        quote_column(quote, "close")?,
        quote_column(quote, "volume")?,
    );

    // Keyed by date so a late intraday row replaces the earlier one.
    let mut by_date: BTreeMap<NaiveDate, OhlcvRecord> = BTreeMap::new();
    let mut skipped = 0usize;

    for (i, ts) in timestamps.iter().enumerate() {
        let row = (
            ts.as_i64(),
            open.get(i).and_then(|v| v.as_f64()),
            high.get(i).and_then(|v| v.as_f64()),
            low.get(i).and_then(|v| v.as_f64()),
            close.get(i).and_then(|v| v.as_f64()),
            volume.get(i).and_then(|v| v.as_f64()),
        );
        let (Some(ts), Some(o), Some(h), Some(l), Some(c), Some(v)) = row else {
            skipped += 1;
            continue;
        };
        let date = DateTime::from_timestamp(ts, 0)
            .with_context(|| format!("timestamp {ts} out of range"))?
            .date_naive();
        by_date.insert(date, OhlcvRecord::new(date, o, h, l, c, v));
    }

    if skipped > 0 {
        debug!(symbol, skipped, "dropped rows with null columns");
    }

    Ok(by_date.into_values().collect())
}

fn quote_column<'a>(quote: &'a serde_json::Value, name: &str) -> Result<&'a Vec<serde_json::Value>> {
    quote[name]
        .as_array()
        .with_context(|| format!("quote column '{name}' is missing"))
}
