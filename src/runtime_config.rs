// =============================================================================
// Runtime Configuration — dashboard settings with atomic save
// =============================================================================
//
// Server address, history window, indicator periods and the instrument
// catalogue.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enrichment::IndicatorParams;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:8050".to_string()
}

fn default_lookback() -> usize {
    600
}

fn default_history_range() -> String {
    "max".to_string()
}

fn default_tickers() -> Vec<TickerOption> {
    [
        ("HDFC Bank Limited", "HDFCBANK.NS"),
        ("ICICI Bank Limited", "ICICIBANK.NS"),
        ("RBL Bank Limited", "RBLBANK.NS"),
        ("Equitas Small Finance Bank Limited", "EQUITASBNK.NS"),
        ("DCB Bank Limited", "DCBBANK.NS"),
        ("Maruti Suzuki India Limited", "MARUTI.NS"),
        ("Tata Motors Limited", "TATAMOTORS.NS"),
        ("Escorts Limited", "ESCORTS.NS"),
        ("Atul Auto Limited", "ATULAUTO.NS"),
        ("Tata Chemicals Limited", "TATACHEM.NS"),
        ("Pidilite Industries Limited", "PIDILITIND.NS"),
        ("Deepak Nitrite Limited", "DEEPAKNTR.NS"),
        ("Navin Fluorine International Limited", "NAVINFLUOR.NS"),
        ("Valiant Organics Limited", "VALIANTORG.NS"),
        ("Avenue Supermarts Limited", "DMART.NS"),
        ("Trent Limited", "TRENT.NS"),
        ("V-Mart Retail Limited", "VMART.NS"),
        ("Future Retail Limited", "FRETAIL.NS"),
        ("Shoppers Stop Limited", "SHOPERSTOP.NS"),
        ("Zomato Limited", "ZOMATO.NS"),
        ("G R Infraprojects Limited", "GRINFRA.NS"),
        ("Dodla Dairy Limited", "DODLA.NS"),
        ("India Pesticides Limited", "IPL.NS"),
        ("Times Green Energy (India) Lim", "TIMESGREEN.BO"),
        ("DLF Limited", "DLF.NS"),
        ("Godrej Properties Limited", "GODREJPROP.NS"),
        ("Oberoi Realty Limited", "OBEROIRLTY.NS"),
        ("Sunteck Realty Limited", "SUNTECK.NS"),
        ("Nirlon Limited", "NIRLON.BO"),
    ]
    .into_iter()
    .map(|(label, value)| TickerOption {
        label: label.to_string(),
        value: value.to_string(),
    })
    .collect()
}

// =============================================================================
// TickerOption
// =============================================================================

/// One entry of the instrument picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerOption {
    pub label: String,
    pub value: String,
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level configuration for the dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the HTTP API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Number of newest records kept for computation and display.
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// Range token passed to the history provider ("max", "5y", ...).
    #[serde(default = "default_history_range")]
    pub history_range: String,

    /// Indicator look-back periods.
    #[serde(default)]
    pub indicator_params: IndicatorParams,

    /// Instruments offered by the picker.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<TickerOption>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            lookback: default_lookback(),
            history_range: default_history_range(),
            indicator_params: IndicatorParams::default(),
            tickers: default_tickers(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            lookback = config.lookback,
            tickers = config.tickers.len(),
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }

    /// Apply `DASHBOARD_BIND_ADDR` / `DASHBOARD_LOOKBACK` from the environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(addr) = std::env::var("DASHBOARD_BIND_ADDR") {
            let addr = addr.trim();
            if !addr.is_empty() {
                self.bind_addr = addr.to_string();
            }
        }
        if let Ok(raw) = std::env::var("DASHBOARD_LOOKBACK") {
            self.lookback = raw
                .trim()
                .parse()
                .with_context(|| format!("DASHBOARD_LOOKBACK '{raw}' is not a record count"))?;
        }
        Ok(())
    }
}
