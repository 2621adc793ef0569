use std::sync::Arc;

use crate::domain::OddsTable;

/// Shared read-only state for the odds API. The table is loaded once at
/// startup; repricing publishes a new artifact and the server is
/// restarted to pick it up.
#[derive(Clone)]
pub struct AppState {
    pub odds: Arc<OddsTable>,
}

impl AppState {
    pub fn new(odds: OddsTable) -> Self {
        Self {
            odds: Arc::new(odds),
        }
    }
}
