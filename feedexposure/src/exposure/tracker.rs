//! The sampling entry point driven by the render surface.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{trace, warn};

use super::clock::{Clock, ManualClock, SystemClock};
use super::detector::{Transition, TransitionDetector};
use super::model::{ExposureEvent, ExposureItem, ExposureStage};
use crate::config::{ClockSource, EngineConfig};
use crate::geometry::{sample_visibility, Rect};
use crate::logger::ExposureLogger;
use crate::telemetry::MetricsSnapshot;

/// Synchronous per-item hook for attached-item transitions.
///
/// Runs on the sampling thread before the event is logged. Intended for
/// render-surface reactions such as starting or pausing autoplay when a
/// card becomes fully visible. Not called for disappearance EXITs, since
/// the item is no longer attached.
///
/// A panicking observer is isolated like a panicking listener: the panic
/// is logged and counted in `observer_panics`, the event is still logged
/// and the rest of the pass proceeds normally.
pub trait StageObserver {
    fn on_item_stage(&mut self, card_id: &str, position: i32, stage: ExposureStage);
}

impl<F> StageObserver for F
where
    F: FnMut(&str, i32, ExposureStage),
{
    fn on_item_stage(&mut self, card_id: &str, position: i32, stage: ExposureStage) {
        self(card_id, position, stage)
    }
}

/// Tracks item exposure across sampling passes.
///
/// Owns the per-item stage table and publishes transitions through a
/// shared [`ExposureLogger`]. `sample_and_emit` takes `&mut self`, so the
/// stage table only ever has one writer; the logger itself is safe to
/// share with consumers on other threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use feedexposure::geometry::Rect;
/// use feedexposure::logger::ExposureLogger;
/// use feedexposure::{ExposureTracker, TrackedItem};
///
/// let logger = Arc::new(ExposureLogger::with_defaults());
/// let mut tracker = ExposureTracker::new(Arc::clone(&logger));
///
/// let viewport = Rect::from_size(400.0, 800.0);
/// let cards = vec![TrackedItem::new("card-1", 0, Rect::new(0.0, 0.0, 400.0, 300.0))];
///
/// tracker.sample_and_emit(&viewport, &cards);
/// assert_eq!(logger.history_len(), 1);
/// ```
pub struct ExposureTracker {
    detector: TransitionDetector,
    logger: Arc<ExposureLogger>,
    clock: Arc<dyn Clock>,
    manual_clock: Option<Arc<ManualClock>>,
    observer: Option<Box<dyn StageObserver + Send>>,
}

impl ExposureTracker {
    /// Create a tracker stamping events with the system clock.
    pub fn new(logger: Arc<ExposureLogger>) -> Self {
        Self::with_clock(logger, Arc::new(SystemClock))
    }

    /// Create a tracker with an explicit timestamp source.
    pub fn with_clock(logger: Arc<ExposureLogger>, clock: Arc<dyn Clock>) -> Self {
        Self {
            detector: TransitionDetector::new(),
            logger,
            clock,
            manual_clock: None,
            observer: None,
        }
    }

    /// Create a tracker whose clock follows `config.clock`.
    ///
    /// A manual clock starts at 0 and is driven through
    /// [`manual_clock`](Self::manual_clock).
    pub fn from_config(logger: Arc<ExposureLogger>, config: &EngineConfig) -> Self {
        match config.clock {
            ClockSource::System => Self::new(logger),
            ClockSource::Manual => {
                let manual = Arc::new(ManualClock::new(0));
                let mut tracker = Self::with_clock(logger, Arc::clone(&manual) as Arc<dyn Clock>);
                tracker.manual_clock = Some(manual);
                tracker
            }
        }
    }

    /// Handle to the manual clock, when built with `ClockSource::Manual`.
    pub fn manual_clock(&self) -> Option<Arc<ManualClock>> {
        self.manual_clock.clone()
    }

    /// Install the per-item stage hook, replacing any previous one.
    pub fn set_stage_observer<O>(&mut self, observer: O)
    where
        O: StageObserver + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the per-item stage hook.
    pub fn clear_stage_observer(&mut self) {
        self.observer = None;
    }

    /// Run one sampling pass and emit an event for every transition.
    ///
    /// Call on every scroll, attach and detach. All events from one pass
    /// share a single timestamp. Returns the number of events emitted.
    pub fn sample_and_emit<I: ExposureItem>(&mut self, viewport: &Rect, attached: &[I]) -> usize {
        let sample = sample_visibility(viewport, attached);
        let transitions = self.detector.detect(&sample);

        self.logger.metrics().pass_completed(
            sample.len(),
            sample.skipped_without_id() + sample.skipped_duplicates(),
        );

        if transitions.is_empty() {
            trace!(attached = attached.len(), "Exposure pass, no transitions");
            return 0;
        }

        let now = self.clock.now_millis();
        let emitted = transitions.len();
        trace!(
            attached = attached.len(),
            transitions = emitted,
            "Exposure pass"
        );

        for transition in transitions {
            let event = match transition {
                Transition::Attached { item, id, stage } => {
                    if let Some(observer) = self.observer.as_mut() {
                        let position = item.position();
                        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                            observer.on_item_stage(id, position, stage);
                        }));
                        if outcome.is_err() {
                            self.logger.metrics().observer_panicked();
                            warn!(
                                card_id = id,
                                stage = stage.name(),
                                "Stage observer panicked, event still logged"
                            );
                        }
                    }
                    ExposureEvent::new(
                        id,
                        item.position(),
                        stage,
                        now,
                        item.title().map(str::to_string),
                        item.category(),
                    )
                }
                Transition::Disappeared { id } => ExposureEvent::disappeared(id, now),
            };
            self.logger.log(event);
        }

        emitted
    }

    /// Last reported stage for `id`.
    pub fn stage_of(&self, id: &str) -> Option<ExposureStage> {
        self.detector.stage_of(id)
    }

    /// Number of ids with stored stage state.
    pub fn tracked_len(&self) -> usize {
        self.detector.len()
    }

    /// Ids currently at a visible stage, sorted.
    pub fn visible_ids(&self) -> Vec<&str> {
        self.detector.visible_ids()
    }

    /// Forget all stored stages, e.g. after the item list was refreshed.
    ///
    /// No EXIT events are emitted for items that were visible.
    pub fn reset(&mut self) {
        self.detector.clear();
    }

    /// Logger events are published to.
    pub fn logger(&self) -> &Arc<ExposureLogger> {
        &self.logger
    }

    /// Snapshot of the engine counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.logger.metrics().snapshot()
    }
}

impl std::fmt::Debug for ExposureTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExposureTracker")
            .field("detector", &self.detector)
            .field("logger", &self.logger)
            .field("manual_clock", &self.manual_clock.is_some())
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
