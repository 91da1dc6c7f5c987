//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::StationConfig;
use crate::render::LayoutConfig;

/// Shared application state.
///
/// Read-only after startup; every request builds its board from scratch.
pub struct AppState<F> {
    /// Where departures come from
    pub feed: Arc<F>,

    /// Station and filtering rules
    pub station: Arc<StationConfig>,

    /// Image layout
    pub layout: Arc<LayoutConfig>,

    /// Reload interval of the HTML wrapper page, in seconds
    pub refresh_secs: u64,
}

impl<F> AppState<F> {
    /// Create a new app state.
    pub fn new(feed: F, station: StationConfig, layout: LayoutConfig, refresh_secs: u64) -> Self {
        Self {
            feed: Arc::new(feed),
            station: Arc::new(station),
            layout: Arc::new(layout),
            refresh_secs,
        }
    }
}

// Manual impl: `F` itself need not be `Clone`.
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            feed: Arc::clone(&self.feed),
            station: Arc::clone(&self.station),
            layout: Arc::clone(&self.layout),
            refresh_secs: self.refresh_secs,
        }
    }
}
