// =============================================================================
// Relative Strength Index (RSI) — simple-average variant
// =============================================================================
//
// Step 1 — delta_t = x_t - x_{t-1}            (undefined at t = 0)
// Step 2 — up_t = max(delta_t, 0), down_t = min(delta_t, 0)
// Step 3 — avg_gain = SMA(up, period), avg_loss = |SMA(down, period)|
//          (plain rolling mean, not Wilder's smoothing)
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Because delta_0 is undefined, the first defined RSI is at index `period`.
// The up/down scratch series live only inside this function.
// =============================================================================

use crate::market_data::{Column, TimeSeries};

use super::sma::sma_of_defined;
use super::Series;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI of `column` over `series`, aligned with the records.
pub fn rsi(series: &TimeSeries, period: usize, column: Column) -> Series {
    rsi_of(&series.column(column), period)
}

/// RSI of a plain numeric slice.
///
/// # Edge cases
/// - fewer than `period + 1` values => every position undefined
/// - window with no losses but some gains => exactly 100.0
/// - window with neither gains nor losses => undefined
pub fn rsi_of(values: &[f64], period: usize) -> Series {
    let deltas: Vec<Option<f64>> = std::iter::once(None)
        .chain(values.windows(2).map(|w| Some(w[1] - w[0])))
        .take(values.len())
        .collect();

    let up: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
    let down: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.min(0.0))).collect();

    let avg_gain = sma_of_defined(&up, period);
    let avg_loss = sma_of_defined(&down, period);

    avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(g, l)| rsi_from_averages((*g)?, (*l)?.abs()))
        .collect()
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// - Both averages zero: no movement to rank, `None`.
/// - Average loss zero: RS is infinite, RSI is 100.0.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { None } else { Some(100.0) };
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);

    rsi.is_finite().then_some(rsi)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(rsi_of(&[], 14).is_empty());
    }

    #[test]
    fn rsi_single_value() {
        assert_eq!(rsi_of(&[5.0], 14), vec![None]);
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        let series = rsi_of(&closes, 14);
        assert_eq!(series.len(), 14);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_first_defined_at_period() {
        let closes: Vec<f64> = (1..=30).map(|x| (x % 4) as f64 + x as f64).collect();
        let series = rsi_of(&closes, 14);
        assert!(series[..14].iter().all(Option::is_none));
        assert!(series[14..].iter().all(Option::is_some));
    }

    #[test]
    fn rsi_all_gains_is_exactly_100() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64 * 1.5).collect();
        let series = rsi_of(&closes, 14);
        for v in series.iter().skip(14) {
            assert_eq!(*v, Some(100.0));
        }
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = rsi_of(&closes, 14);
        for v in series.iter().skip(14) {
            assert!(v.unwrap().abs() < 1e-10, "expected 0.0, got {v:?}");
        }
    }

    #[test]
    fn rsi_flat_market_is_undefined() {
        let series = rsi_of(&[100.0; 30], 14);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_100_once_losses_leave_the_window() {
        // Two early drops, then a long rise: once the drops fall out of the
        // trailing window the value must be exactly 100.
        let mut closes = vec![10.0, 9.7, 9.1];
        closes.extend((1..=20).map(|x| 9.1 + x as f64 * 0.3));
        let series = rsi_of(&closes, 5);
        // Last decrease is at delta index 2; windows ending at 7.. exclude it.
        for v in &series[7..] {
            assert_eq!(*v, Some(100.0));
        }
        assert!(series[5].unwrap() < 100.0);
    }

    #[test]
    fn rsi_known_value() {
        // deltas: +1, +1, -1, -1  with period 4 => gain 0.5, loss 0.5 => 50.
        let series = rsi_of(&[10.0, 11.0, 12.0, 11.0, 10.0], 4);
        assert_eq!(series[4], Some(50.0));

        // deltas: +2, -1 with period 2 => gain 1.0, loss 0.5 => RS 2 => 66.67
        let series = rsi_of(&[10.0, 12.0, 11.0], 2);
        assert!((series[2].unwrap() - 200.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13, 43.13, 43.13,
            43.13, 43.13, 43.13, 43.13, 43.13, 43.13, 43.13, 43.13, 43.13, 43.13,
            43.13, 43.13, 43.13, 44.0,
        ];
        for period in [2, 5, 14] {
            for v in rsi_of(&closes, period).into_iter().flatten() {
                assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
            }
        }
    }

    #[test]
    fn rsi_from_averages_edges() {
        assert_eq!(rsi_from_averages(0.0, 0.0), None);
        assert_eq!(rsi_from_averages(1.0, 0.0), Some(100.0));
        assert_eq!(rsi_from_averages(0.0, 1.0), Some(0.0));
        assert_eq!(rsi_from_averages(1.0, 1.0), Some(50.0));
    }
}
