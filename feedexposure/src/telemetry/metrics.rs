//! Atomic counters for the exposure engine.

use std::sync::atomic::{AtomicU64, Ordering};

use super::snapshot::MetricsSnapshot;
use crate::exposure::ExposureStage;

/// Counters shared between the tracker and the logger.
///
/// All updates use `Relaxed` ordering: the counters are independent and
/// only ever read as an approximate snapshot.
#[derive(Debug, Default)]
pub struct TrackerMetrics {
    passes: AtomicU64,
    items_sampled: AtomicU64,
    items_skipped: AtomicU64,
    events_emitted: AtomicU64,
    enter_events: AtomicU64,
    half_events: AtomicU64,
    full_events: AtomicU64,
    exit_events: AtomicU64,
    disappearance_exits: AtomicU64,
    listener_panics: AtomicU64,
    observer_panics: AtomicU64,
    history_evictions: AtomicU64,
}

impl TrackerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished sampling pass.
    pub fn pass_completed(&self, sampled: usize, skipped: usize) {
        self.passes.fetch_add(1, Ordering::Relaxed);
        self.items_sampled
            .fetch_add(sampled as u64, Ordering::Relaxed);
        self.items_skipped
            .fetch_add(skipped as u64, Ordering::Relaxed);
    }

    /// Record one emitted event.
    pub fn event_emitted(&self, stage: ExposureStage, disappearance: bool) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
        let counter = match stage {
            ExposureStage::Enter => &self.enter_events,
            ExposureStage::Half => &self.half_events,
            ExposureStage::Full => &self.full_events,
            ExposureStage::Exit => &self.exit_events,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        if disappearance {
            self.disappearance_exits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a listener that panicked during notification.
    pub fn listener_panicked(&self) {
        self.listener_panics.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stage observer call that panicked.
    pub fn observer_panicked(&self) {
        self.observer_panics.fetch_add(1, Ordering::Relaxed);
    }

    /// Record history lines dropped by the retention cap.
    pub fn history_evicted(&self, count: usize) {
        if count > 0 {
            self.history_evictions
                .fetch_add(count as u64, Ordering::Relaxed);
        }
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            passes: self.passes.load(Ordering::Relaxed),
            items_sampled: self.items_sampled.load(Ordering::Relaxed),
            items_skipped: self.items_skipped.load(Ordering::Relaxed),
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
            enter_events: self.enter_events.load(Ordering::Relaxed),
            half_events: self.half_events.load(Ordering::Relaxed),
            full_events: self.full_events.load(Ordering::Relaxed),
            exit_events: self.exit_events.load(Ordering::Relaxed),
            disappearance_exits: self.disappearance_exits.load(Ordering::Relaxed),
            listener_panics: self.listener_panics.load(Ordering::Relaxed),
            observer_panics: self.observer_panics.load(Ordering::Relaxed),
            history_evictions: self.history_evictions.load(Ordering::Relaxed),
        }
    }
}
