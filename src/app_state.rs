// =============================================================================
// Application State — shared by every request handler
// =============================================================================
//
// Holds configuration and the history collaborator only.  Computed series
// and charts are never stored here; each request builds its own.
//
// Thread safety:
//   - parking_lot::RwLock around the configuration.
//   - The history source is `Send + Sync` and shared through `Arc`.
// =============================================================================

use std::sync::Arc;

use parking_lot::RwLock;

use crate::market_data::HistorySource;
use crate::runtime_config::RuntimeConfig;

pub struct AppState {
    pub runtime_config: RwLock<RuntimeConfig>,
    pub history: Arc<dyn HistorySource>,
    /// Instant when the server was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: RuntimeConfig, history: Arc<dyn HistorySource>) -> Self {
        Self {
            runtime_config: RwLock::new(config),
            history,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
