// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators drawn by the
// dashboard.  Every function returns a `Series` aligned index-for-index with
// its input; positions without enough history hold `None`, so callers are
// forced to handle insufficient-data and numerical-edge-case scenarios.

pub mod ema;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod sma;

/// A derived numeric series aligned with the records it was computed from.
pub type Series = Vec<Option<f64>>;

pub use ema::ema;
pub use macd::macd;
pub use returns::{cumulative_returns, daily_returns};
pub use rsi::rsi;
pub use sma::sma;
