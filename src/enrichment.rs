// =============================================================================
// Enrichment — raw history in, named derived series out
// =============================================================================
//
// Runs the indicator engine and the returns calculator over one TimeSeries.
// Every derived series is an independent value; nothing is written back into
// the records and no scratch series survive the call.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::{self, ema, macd, rsi, sma, Series};
use crate::market_data::{Column, TimeSeries};

fn default_sma_period() -> usize {
    sma::DEFAULT_SMA_PERIOD
}

fn default_ema_period() -> usize {
    ema::DEFAULT_EMA_PERIOD
}

fn default_macd_long() -> usize {
    macd::DEFAULT_MACD_LONG
}

fn default_macd_short() -> usize {
    macd::DEFAULT_MACD_SHORT
}

fn default_macd_signal() -> usize {
    macd::DEFAULT_MACD_SIGNAL
}

fn default_rsi_period() -> usize {
    rsi::DEFAULT_RSI_PERIOD
}

/// Look-back periods for every indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_sma_period")]
    pub sma_period: usize,

    #[serde(default = "default_ema_period")]
    pub ema_period: usize,

    #[serde(default = "default_macd_long")]
    pub macd_long: usize,

    #[serde(default = "default_macd_short")]
    pub macd_short: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Price column every indicator reads.
    #[serde(default)]
    pub column: Column,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: default_sma_period(),
            ema_period: default_ema_period(),
            macd_long: default_macd_long(),
            macd_short: default_macd_short(),
            macd_signal: default_macd_signal(),
            rsi_period: default_rsi_period(),
            column: Column::Close,
        }
    }
}

/// A TimeSeries together with every derived series the chart can draw.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSeries {
    pub series: TimeSeries,
    pub sma: Series,
    pub ema: Series,
    pub macd: Series,
    pub signal_line: Series,
    pub rsi: Series,
    pub daily_return: Series,
    pub cumulative_return: Series,
}

impl EnrichedSeries {
    pub fn compute(series: TimeSeries, params: &IndicatorParams) -> Self {
        let column = params.column;

        let sma = indicators::sma(&series, params.sma_period, column);
        let ema = indicators::ema(&series, params.ema_period, column);
        let macd = indicators::macd(
            &series,
            params.macd_long,
            params.macd_short,
            params.macd_signal,
            column,
        );
        let rsi = indicators::rsi(&series, params.rsi_period, column);
        let daily_return = indicators::daily_returns(&series);
        let cumulative_return = indicators::cumulative_returns(&series);

        Self {
            series,
            sma,
            ema,
            macd: macd.macd,
            signal_line: macd.signal,
            rsi,
            daily_return,
            cumulative_return,
        }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }
}
