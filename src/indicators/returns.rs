// =============================================================================
// Returns — daily and cumulative, from close prices
// =============================================================================
//
//   daily_t      = close_t / close_{t-1} - 1          (undefined at t = 0)
//   cumulative_t = cumulative_{t-1} * (1 + daily_t),   cumulative_0 = 1.0
//
// A zero previous close makes the daily return undefined; the cumulative
// product cannot continue past that point either.
// =============================================================================

use crate::market_data::TimeSeries;

use super::Series;

pub fn daily_returns(series: &TimeSeries) -> Series {
    daily_returns_of(&series.closes())
}

pub fn cumulative_returns(series: &TimeSeries) -> Series {
    cumulative_returns_of(&daily_returns(series))
}

pub fn daily_returns_of(closes: &[f64]) -> Series {
    std::iter::once(None)
        .chain(closes.windows(2).map(|w| {
            let r = w[1] / w[0] - 1.0;
            r.is_finite().then_some(r)
        }))
        .take(closes.len())
        .collect()
}

/// Running product of `1 + daily`.  The leading undefined daily return counts
/// as zero, so a non-empty result always starts at 1.0.
pub fn cumulative_returns_of(daily: &[Option<f64>]) -> Series {
    let mut acc = Some(1.0);
    daily
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let r = if i == 0 { Some(r.unwrap_or(0.0)) } else { *r };
            acc = match (acc, r) {
                (Some(a), Some(r)) => Some(a * (1.0 + r)),
                _ => None,
            };
            acc
        })
        .collect()
}
