pub mod history;
pub mod time_series;
pub mod yahoo;

// Re-export the core data model for convenient access (e.g. `use crate::market_data::TimeSeries`).
pub use history::{HistoryError, HistorySource};
pub use time_series::{Column, OhlcvRecord, TimeSeries};
pub use yahoo::YahooClient;
