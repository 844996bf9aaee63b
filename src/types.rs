// =============================================================================
// Shared selection types used across the dashboard
// =============================================================================
//
// The two user selections arrive as strings at the HTTP boundary ("RSI",
// "Daily Returns", ...).  They are parsed once into these enums so every
// consumer has to match on every variant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which momentum/trend indicator to draw in the indicator panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorChoice {
    None,
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "SMA")]
    Sma,
    #[serde(rename = "EMA")]
    Ema,
    #[serde(rename = "MACD")]
    Macd,
}

#[cfg(test)]
impl IndicatorChoice {
    pub const ALL: [IndicatorChoice; 5] = [
        Self::None,
        Self::Rsi,
        Self::Sma,
        Self::Ema,
        Self::Macd,
    ];
}

impl Default for IndicatorChoice {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for IndicatorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Rsi => write!(f, "RSI"),
            Self::Sma => write!(f, "SMA"),
            Self::Ema => write!(f, "EMA"),
            Self::Macd => write!(f, "MACD"),
        }
    }
}

impl FromStr for IndicatorChoice {
    type Err = UnknownChoice;

    /// An empty string is the boundary's "absent" value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "None" => Ok(Self::None),
            "RSI" => Ok(Self::Rsi),
            "SMA" => Ok(Self::Sma),
            "EMA" => Ok(Self::Ema),
            "MACD" => Ok(Self::Macd),
            other => Err(UnknownChoice {
                kind: "indicator",
                value: other.to_string(),
            }),
        }
    }
}

/// Which returns transform to draw in the returns panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnsChoice {
    None,
    #[serde(rename = "Daily Returns")]
    DailyReturns,
    #[serde(rename = "Cumulative Returns")]
    CumulativeReturns,
}

#[cfg(test)]
impl ReturnsChoice {
    pub const ALL: [ReturnsChoice; 3] = [
        Self::None,
        Self::DailyReturns,
        Self::CumulativeReturns,
    ];
}

impl Default for ReturnsChoice {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for ReturnsChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::DailyReturns => write!(f, "Daily Returns"),
            Self::CumulativeReturns => write!(f, "Cumulative Returns"),
        }
    }
}

impl FromStr for ReturnsChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "None" => Ok(Self::None),
            "Daily Returns" => Ok(Self::DailyReturns),
            "Cumulative Returns" => Ok(Self::CumulativeReturns),
            other => Err(UnknownChoice {
                kind: "returns",
                value: other.to_string(),
            }),
        }
    }
}

/// A selection string that matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} selection '{value}'")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}
