// =============================================================================
// Historical data retrieval — collaborator interface
// =============================================================================
//
// The indicator core never performs I/O.  A `HistorySource` is called once
// per request, before the core runs; any failure here is reported as a
// `HistoryError` and the core is not invoked at all.
// =============================================================================

use futures_util::future::BoxFuture;

use super::time_series::{SeriesError, TimeSeries};

/// Failure to obtain a usable series for a symbol.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The provider has no data for this symbol.
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    /// Transport, status, or payload failure talking to the provider.
    #[error("history provider failed: {0:#}")]
    Upstream(#[from] anyhow::Error),

    /// The provider answered, but the records violate the series invariants.
    #[error("history for '{symbol}' is unusable: {source}")]
    InvalidSeries {
        symbol: String,
        #[source]
        source: SeriesError,
    },
}

/// Anything that can hand back a daily OHLCV history for a ticker symbol.
///
/// Returned futures are boxed so the source can live behind `Arc<dyn _>` in
/// the shared application state.
pub trait HistorySource: Send + Sync {
    fn fetch_history<'a>(
        &'a self,
        symbol: &'a str,
    ) -> BoxFuture<'a, Result<TimeSeries, HistoryError>>;
}

#[cfg(test)]
pub mod stub {
    //! In-memory source for tests.

    use std::collections::HashMap;

    use futures_util::FutureExt;

    use super::*;

    #[derive(Default)]
    pub struct StubSource {
        pub series: HashMap<String, TimeSeries>,
        pub failing: Vec<String>,
    }

    impl StubSource {
        pub fn with(symbol: &str, series: TimeSeries) -> Self {
            let mut s = Self::default();
            s.series.insert(symbol.to_string(), series);
            s
        }
    }

    impl HistorySource for StubSource {
        fn fetch_history<'a>(
            &'a self,
            symbol: &'a str,
        ) -> BoxFuture<'a, Result<TimeSeries, HistoryError>> {
            async move {
                if self.failing.iter().any(|s| s == symbol) {
                    return Err(HistoryError::Upstream(anyhow::anyhow!("connection reset")));
                }
                self.series
                    .get(symbol)
                    .cloned()
                    .ok_or_else(|| HistoryError::UnknownSymbol(symbol.to_string()))
            }
            .boxed()
        }
    }
}
