// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA_t = (x_{t-p+1} + ... + x_t) / p
//
// Positions with fewer than `p` values (current included) have no value.  A
// window that contains an undefined input is itself undefined, matching a
// rolling mean that requires `p` observations.
//
// Each window is summed on its own rather than with a running add/subtract so
// that an all-zero window sums to exactly zero; RSI depends on that.
// =============================================================================

use crate::market_data::{Column, TimeSeries};

use super::Series;

/// Default look-back used when no period is configured.
pub const DEFAULT_SMA_PERIOD: usize = 100;

/// SMA of `column` over `series`, aligned index-for-index with the records.
pub fn sma(series: &TimeSeries, period: usize, column: Column) -> Series {
    sma_of(&series.column(column), period)
}

/// SMA of a plain numeric slice.
pub fn sma_of(values: &[f64], period: usize) -> Series {
    let defined: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    sma_of_defined(&defined, period)
}

/// SMA of a slice that may itself contain undefined positions.
///
/// # Edge cases
/// - `period == 0` => every position undefined
/// - `values.len() < period` => every position undefined
pub fn sma_of_defined(values: &[Option<f64>], period: usize) -> Series {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    for end in (period - 1)..values.len() {
        let window = &values[end + 1 - period..=end];
        let sum: Option<f64> = window.iter().copied().sum();
        result[end] = sum.map(|s| s / period as f64);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_scenario_three_period() {
        let s = sma_of(&[10.0, 11.0, 12.0, 11.0, 10.0], 3);
        assert_eq!(s.len(), 5);
        assert_eq!(s[0], None);
        assert_eq!(s[1], None);
        assert_eq!(s[2], Some(11.0));
        assert!((s[3].unwrap() - 34.0 / 3.0).abs() < 1e-12);
        assert_eq!(s[4], Some(11.0));
    }

    #[test]
    fn sma_defined_from_period_minus_one() {
        let values: Vec<f64> = (1..=20).map(|x| (x * x) as f64).collect();
        for period in 1..=values.len() {
            let s = sma_of(&values, period);
            for (i, v) in s.iter().enumerate() {
                if i + 1 < period {
                    assert!(v.is_none(), "period {period} index {i} should be undefined");
                } else {
                    let mean = values[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
                    assert!((v.unwrap() - mean).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn sma_period_one_is_identity() {
        let s = sma_of(&[3.0, 1.0, 4.0], 1);
        assert_eq!(s, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }

    #[test]
    fn sma_insufficient_data() {
        assert_eq!(sma_of(&[1.0, 2.0], 5), vec![None, None]);
        assert!(sma_of(&[], 3).is_empty());
    }

    #[test]
    fn sma_period_zero() {
        assert_eq!(sma_of(&[1.0, 2.0, 3.0], 0), vec![None, None, None]);
    }

    #[test]
    fn sma_undefined_input_poisons_its_windows() {
        let s = sma_of_defined(&[None, Some(2.0), Some(4.0), Some(6.0)], 2);
        assert_eq!(s, vec![None, None, Some(3.0), Some(5.0)]);
    }

    #[test]
    fn zero_window_after_nonzero_is_exact_zero() {
        let s = sma_of(&[-0.3, -0.1, 0.0, 0.0, 0.0], 3);
        assert_eq!(s[4], Some(0.0));
    }
}
