use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// One daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvRecord {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Value of a single price/volume column.
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Open => self.open,
            Column::High => self.high,
            Column::Low => self.low,
            Column::Close => self.close,
            Column::Volume => self.volume,
        }
    }
}

/// Column selector for the indicator functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Open,
    High,
    Low,
    #[default]
    Close,
    Volume,
}

/// Reasons a sequence of records cannot form a [`TimeSeries`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("time series has no records")]
    Empty,
    #[error("record {index} is not strictly after the previous date")]
    NonAscending { index: usize },
    #[error("record {index} has a non-finite price or volume")]
    NonFinite { index: usize },
    #[error("record {index} has negative volume")]
    NegativeVolume { index: usize },
}

// ---------------------------------------------------------------------------
// TimeSeries
// ---------------------------------------------------------------------------

/// Ordered OHLCV history for one instrument.
///
/// Invariants held by construction: at least one record, dates strictly
/// increasing, every field finite, volume non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    records: Vec<OhlcvRecord>,
}

impl TimeSeries {
    pub fn new(records: Vec<OhlcvRecord>) -> Result<Self, SeriesError> {
        if records.is_empty() {
            return Err(SeriesError::Empty);
        }

        for (index, r) in records.iter().enumerate() {
            let finite = [r.open, r.high, r.low, r.close, r.volume]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(SeriesError::NonFinite { index });
            }
            if r.volume < 0.0 {
                return Err(SeriesError::NegativeVolume { index });
            }
            if index > 0 && records[index - 1].date >= r.date {
                return Err(SeriesError::NonAscending { index });
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[OhlcvRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The shared x axis.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Copy out one column, oldest first.
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| r.get(column)).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.column(Column::Close)
    }

    pub fn last(&self) -> &OhlcvRecord {
        // Non-empty by construction.
        &self.records[self.records.len() - 1]
    }

    /// Keep only the newest `count` records.  A `count` of zero is treated as
    /// one so the non-empty invariant survives.
    pub fn tail(mut self, count: usize) -> Self {
        let keep = count.max(1);
        if self.records.len() > keep {
            let start = self.records.len() - keep;
            self.records.drain(..start);
        }
        self
    }
}

#[cfg(test)]
pub mod fixtures {
    use chrono::{Days, NaiveDate};

    use super::*;

    /// Consecutive daily bars starting 2023-06-01, with high/low one unit
    /// either side of the close.
    pub fn series_from_closes(closes: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let records = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = start.checked_add_days(Days::new(i as u64)).unwrap();
                OhlcvRecord::new(date, c, c + 1.0, c - 1.0, c, 500.0 + i as f64)
            })
            .collect();
        TimeSeries::new(records).unwrap()
    }
}
