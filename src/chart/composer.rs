// =============================================================================
// Chart Composer — panel selection and layout
// =============================================================================
//
// Maps (enriched series, indicator choice, returns choice) to an ordered list
// of panels:
//
//   Price (candlestick) | Volume (bar) | Indicator (line[s]) | Returns (line)
//
// Price and Volume are always present.  The Indicator and Returns panels
// exist only when their choice is not `None`; they are omitted, never drawn
// empty.  All panels share one date axis.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::enrichment::EnrichedSeries;
use crate::indicators::Series;
use crate::market_data::OhlcvRecord;
use crate::types::{IndicatorChoice, ReturnsChoice};

// =============================================================================
// Chart specification types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelKind {
    Price,
    Volume,
    Indicator,
    Returns,
}

impl PanelKind {
    /// Relative row height.  Price dominates; auxiliary rows are thin.
    pub fn weight(self) -> f64 {
        match self {
            Self::Price => 0.3,
            Self::Volume | Self::Indicator | Self::Returns => 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderHint {
    Candlestick,
    Bar,
    Line,
}

/// Y-side payload of a trace, shaped by its render hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TraceData {
    Candlestick {
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
    Bar {
        y: Vec<f64>,
        opacity: f64,
    },
    /// Undefined positions serialise as `null` and render as gaps.
    Line {
        y: Series,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: &'static str,
    pub render: RenderHint,
    pub x: Vec<NaiveDate>,
    #[serde(flatten)]
    pub data: TraceData,
    pub show_legend: bool,
}

impl Trace {
    fn candlestick(name: &'static str, x: &[NaiveDate], records: &[OhlcvRecord]) -> Self {
        Self {
            name,
            render: RenderHint::Candlestick,
            x: x.to_vec(),
            data: TraceData::Candlestick {
                open: records.iter().map(|r| r.open).collect(),
                high: records.iter().map(|r| r.high).collect(),
                low: records.iter().map(|r| r.low).collect(),
                close: records.iter().map(|r| r.close).collect(),
            },
            show_legend: false,
        }
    }

    fn bar(name: &'static str, x: &[NaiveDate], y: Vec<f64>, opacity: f64) -> Self {
        Self {
            name,
            render: RenderHint::Bar,
            x: x.to_vec(),
            data: TraceData::Bar { y, opacity },
            show_legend: false,
        }
    }

    fn line(name: &'static str, x: &[NaiveDate], y: &Series) -> Self {
        Self {
            name,
            render: RenderHint::Line,
            x: x.to_vec(),
            data: TraceData::Line { y: y.clone() },
            show_legend: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub weight: f64,
    pub traces: Vec<Trace>,
}

impl Panel {
    fn new(kind: PanelKind, traces: Vec<Trace>) -> Self {
        Self {
            kind,
            weight: kind.weight(),
            traces,
        }
    }
}

/// Figure-level presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub shared_x_axis: bool,
    pub vertical_spacing: f64,
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub margin: u32,
    pub show_x_grid: bool,
    pub range_slider: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            shared_x_axis: true,
            vertical_spacing: 0.035,
            width: 1000,
            height: 600,
            background: "#F3F6FA",
            margin: 0,
            show_x_grid: false,
            range_slider: false,
        }
    }
}

/// Everything the renderer needs; owns its data outright.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub panels: Vec<Panel>,
    pub layout: Layout,
}

#[cfg(test)]
impl ChartSpec {
    pub fn kinds(&self) -> Vec<PanelKind> {
        self.panels.iter().map(|p| p.kind).collect()
    }

    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Build the chart for one request.  Pure: same inputs, same output.
pub fn compose_chart(
    enriched: &EnrichedSeries,
    indicator: IndicatorChoice,
    returns: ReturnsChoice,
) -> ChartSpec {
    let dates = enriched.series.dates();
    let records = enriched.series.records();

    let mut panels = Vec::with_capacity(4);

    panels.push(Panel::new(
        PanelKind::Price,
        vec![Trace::candlestick("Price", &dates, records)],
    ));

    let volume = records.iter().map(|r| r.volume).collect();
    panels.push(Panel::new(
        PanelKind::Volume,
        vec![Trace::bar("Volume", &dates, volume, 0.5)],
    ));

    if let Some(traces) = indicator_traces(enriched, &dates, indicator) {
        panels.push(Panel::new(PanelKind::Indicator, traces));
    }

    if let Some(traces) = returns_traces(enriched, &dates, returns) {
        panels.push(Panel::new(PanelKind::Returns, traces));
    }

    ChartSpec {
        panels,
        layout: Layout::default(),
    }
}

fn indicator_traces(
    e: &EnrichedSeries,
    dates: &[NaiveDate],
    choice: IndicatorChoice,
) -> Option<Vec<Trace>> {
    let traces = match choice {
        IndicatorChoice::None => return None,
        IndicatorChoice::Rsi => vec![Trace::line("RSI", dates, &e.rsi)],
        IndicatorChoice::Sma => vec![Trace::line("SMA", dates, &e.sma)],
        IndicatorChoice::Ema => vec![Trace::line("EMA", dates, &e.ema)],
        IndicatorChoice::Macd => vec![
            Trace::line("MACD", dates, &e.macd),
            Trace::line("Signal_Line", dates, &e.signal_line),
        ],
    };
    Some(traces)
}

fn returns_traces(
    e: &EnrichedSeries,
    dates: &[NaiveDate],
    choice: ReturnsChoice,
) -> Option<Vec<Trace>> {
    let traces = match choice {
        ReturnsChoice::None => return None,
        ReturnsChoice::DailyReturns => vec![Trace::line("Daily Return", dates, &e.daily_return)],
        ReturnsChoice::CumulativeReturns => vec![Trace::line(
            "Cumulative Returns",
            dates,
            &e.cumulative_return,
        )],
    };
    Some(traces)
}
