// =============================================================================
// Delta Summary — current close vs previous close
// =============================================================================

use serde::Serialize;

use crate::market_data::TimeSeries;

/// Qualitative flag used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaDirection {
    Increase,
    Decrease,
}

impl DeltaDirection {
    pub fn color(self) -> &'static str {
        match self {
            Self::Increase => "green",
            Self::Decrease => "red",
        }
    }
}

/// Value + relative delta indicator for the headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaSummary {
    pub current: f64,
    pub previous: f64,
    /// `current / previous - 1`.
    pub relative_change: f64,
    pub direction: DeltaDirection,
    pub color: &'static str,
    /// Display format for `relative_change`.
    pub value_format: &'static str,
}

/// Compare the last two closes.
///
/// Returns `None` when there is no previous close to compare against (a
/// single-record series) or the previous close is zero; never a zero delta.
pub fn compute_delta(series: &TimeSeries) -> Option<DeltaSummary> {
    let records = series.records();
    let [.., prev, last] = records else {
        return None;
    };

    let (current, previous) = (last.close, prev.close);
    let relative_change = current / previous - 1.0;
    if !relative_change.is_finite() {
        return None;
    }

    let direction = if current >= previous {
        DeltaDirection::Increase
    } else {
        DeltaDirection::Decrease
    };

    Some(DeltaSummary {
        current,
        previous,
        relative_change,
        direction,
        color: direction.color(),
        value_format: ".2%",
    })
}
