// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha  = 2 / (period + 1)
//   EMA_0  = x_0
//   EMA_t  = alpha * x_t + (1 - alpha) * EMA_{t-1}
//
// The first value seeds the recurrence, so there is no undefined lead-in.
// =============================================================================

use crate::market_data::{Column, TimeSeries};

use super::Series;

/// Default look-back for the EMA panel.
pub const DEFAULT_EMA_PERIOD: usize = 20;

/// EMA of `column` over `series`, aligned with the records.
pub fn ema(series: &TimeSeries, period: usize, column: Column) -> Series {
    ema_of(&series.column(column), period)
}

/// EMA of a plain numeric slice.  Every position is defined.
///
/// `period == 0` gives alpha = 2, which is meaningless; it is clamped to 1
/// (alpha = 1, the input itself).
pub fn ema_of(values: &[f64], period: usize) -> Series {
    let alpha = 2.0 / (period.max(1) + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &x in values {
        let next = match prev {
            None => x,
            Some(p) => alpha * x + (1.0 - alpha) * p,
        };
        result.push(Some(next));
        prev = Some(next);
    }

    result
}

/// EMA over a series with possible undefined positions.
///
/// The recurrence seeds on the first defined value; undefined positions stay
/// undefined and do not advance the state.
pub fn ema_of_defined(values: &[Option<f64>], period: usize) -> Series {
    let alpha = 2.0 / (period.max(1) + 1) as f64;

    let mut prev: Option<f64> = None;
    values
        .iter()
        .map(|v| {
            let x = (*v)?;
            let next = match prev {
                None => x,
                Some(p) => alpha * x + (1.0 - alpha) * p,
            };
            prev = Some(next);
            Some(next)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(ema_of(&[], 5).is_empty());
    }

    #[test]
    fn ema_seeds_with_first_value() {
        for first in [0.0, 1.5, -3.0, 1e6] {
            let e = ema_of(&[first, 2.0, 3.0], 20);
            assert_eq!(e[0], Some(first));
        }
    }

    #[test]
    fn ema_known_values() {
        // alpha = 2 / 6 = 1/3
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let e = ema_of(&closes, 5);
        assert_eq!(e.len(), 10);

        let alpha = 1.0 / 3.0;
        let mut expected = 1.0;
        assert_eq!(e[0], Some(expected));
        for (i, &c) in closes.iter().enumerate().skip(1) {
            expected = alpha * c + (1.0 - alpha) * expected;
            assert!((e[i].unwrap() - expected).abs() < 1e-12, "index {i}");
        }
    }

    #[test]
    fn ema_of_constant_is_constant() {
        let e = ema_of(&[7.0; 30], 12);
        assert!(e.iter().all(|v| *v == Some(7.0)));
    }

    #[test]
    fn ema_period_one_tracks_input() {
        let e = ema_of(&[4.0, 9.0, 2.0], 1);
        assert_eq!(e, vec![Some(4.0), Some(9.0), Some(2.0)]);
    }

    #[test]
    fn ema_defined_skips_leading_gaps() {
        let e = ema_of_defined(&[None, Some(2.0), Some(4.0)], 1);
        assert_eq!(e, vec![None, Some(2.0), Some(4.0)]);

        let e = ema_of_defined(&[None, Some(3.0), Some(6.0)], 2);
        // alpha = 2/3
        assert_eq!(e[1], Some(3.0));
        assert!((e[2].unwrap() - 5.0).abs() < 1e-12);
    }
}
