// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD   = EMA(x, short) - EMA(x, long)
//   Signal = EMA(MACD, signal)
//
// Both EMAs seed on the first value, so MACD is defined from index 0 (it is
// only economically meaningful after `long` observations).
// =============================================================================

use crate::market_data::{Column, TimeSeries};

use super::ema::{ema_of, ema_of_defined};
use super::Series;

pub const DEFAULT_MACD_LONG: usize = 26;
pub const DEFAULT_MACD_SHORT: usize = 12;
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// MACD line and its signal line, both aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Series,
    pub signal: Series,
}

/// MACD of `column` over `series`.
pub fn macd(
    series: &TimeSeries,
    period_long: usize,
    period_short: usize,
    period_signal: usize,
    column: Column,
) -> MacdSeries {
    macd_of(&series.column(column), period_long, period_short, period_signal)
}

pub fn macd_of(
    values: &[f64],
    period_long: usize,
    period_short: usize,
    period_signal: usize,
) -> MacdSeries {
    let short = ema_of(values, period_short);
    let long = ema_of(values, period_long);

    let macd: Series = short
        .iter()
        .zip(long.iter())
        .map(|(s, l)| Some((*s)? - (*l)?))
        .collect();
    let signal = ema_of_defined(&macd, period_signal);

    MacdSeries { macd, signal }
}
