//! Call timing for the data layer.
//!
//! Every data-layer call is timed and handed to a [`MetricsSink`]. The
//! server keeps the most recent calls in [`RecentMetrics`] for the debug
//! overlay.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How many calls [`RecentMetrics`] keeps.
pub const RECENT_CAPACITY: usize = 50;

/// One timed data-layer call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallMetric {
    pub name: String,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    pub success: bool,
    pub recorded_at: DateTime<Utc>,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Receives call timings.
pub trait MetricsSink: Send + Sync {
    fn record(&self, metric: CallMetric);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn record(&self, _metric: CallMetric) {}
}

/// Keeps the last [`RECENT_CAPACITY`] calls, newest last.
///
/// Recording can be paused, e.g. while the overlay is hidden.
#[derive(Debug)]
pub struct RecentMetrics {
    entries: Mutex<VecDeque<CallMetric>>,
    recording: AtomicBool,
    capacity: usize,
}

impl Default for RecentMetrics {
    fn default() -> Self {
        Self::with_capacity(RECENT_CAPACITY)
    }
}

impl RecentMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            recording: AtomicBool::new(true),
            capacity,
        }
    }

    pub fn snapshot(&self) -> Vec<CallMetric> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().cloned().collect()
    }

    pub fn set_recording(&self, on: bool) {
        self.recording.store(on, Ordering::Relaxed);
    }

    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl MetricsSink for RecentMetrics {
    fn record(&self, metric: CallMetric) {
        if !self.is_recording() || self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(metric);
    }
}
