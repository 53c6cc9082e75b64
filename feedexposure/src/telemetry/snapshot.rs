//! Point-in-time copy of the tracker counters.

use std::fmt;

use serde::Serialize;

/// Immutable copy of [`super::TrackerMetrics`] at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Sampling passes run.
    pub passes: u64,
    /// Items measured across all passes.
    pub items_sampled: u64,
    /// Items skipped (no id, or duplicate id within a pass).
    pub items_skipped: u64,
    /// Events handed to the logger.
    pub events_emitted: u64,
    pub enter_events: u64,
    pub half_events: u64,
    pub full_events: u64,
    pub exit_events: u64,
    /// EXIT events caused by an item leaving the attached set.
    pub disappearance_exits: u64,
    /// Listener callbacks that panicked and were isolated.
    pub listener_panics: u64,
    /// Stage observer calls that panicked and were isolated.
    pub observer_panics: u64,
    /// History lines dropped by the retention cap.
    pub history_evictions: u64,
}

impl MetricsSnapshot {
    /// Average number of events per sampling pass.
    pub fn events_per_pass(&self) -> f64 {
        if self.passes == 0 {
            return 0.0;
        }
        self.events_emitted as f64 / self.passes as f64
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "passes={} sampled={} skipped={} events={} (enter={} half={} full={} exit={}, disappeared={}) listener_panics={} observer_panics={} evicted={}",
            self.passes,
            self.items_sampled,
            self.items_skipped,
            self.events_emitted,
            self.enter_events,
            self.half_events,
            self.full_events,
            self.exit_events,
            self.disappearance_exits,
            self.listener_panics,
            self.observer_panics,
            self.history_evictions
        )
    }
}
