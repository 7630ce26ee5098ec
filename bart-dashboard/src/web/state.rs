//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::TransitData;
use crate::density::DensityPoint;
use crate::metrics::RecentMetrics;
use crate::poll::LiveBoard;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached BART data
    pub data: Arc<TransitData>,

    /// Live snapshots kept fresh by the pollers
    pub board: Arc<LiveBoard>,

    /// Recent call timings for the debug overlay
    pub metrics: Arc<RecentMetrics>,

    /// Heat map points for the whole day, generated at startup
    pub density: Arc<Vec<DensityPoint>>,
}

impl AppState {
    pub fn new(
        data: Arc<TransitData>,
        board: Arc<LiveBoard>,
        metrics: Arc<RecentMetrics>,
        density: Vec<DensityPoint>,
    ) -> Self {
        Self {
            data,
            board,
            metrics,
            density: Arc::new(density),
        }
    }
}
