//! The exposure logger: history plus subscriber fan-out.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::format::LineFormatter;
use super::history::HistoryBuffer;
use super::listener::{ExposureListener, FnListener};
use crate::config::EngineConfig;
use crate::exposure::ExposureEvent;
use crate::telemetry::TrackerMetrics;

/// State guarded by the logger's single lock.
///
/// History appends, snapshots, subscribes and unsubscribes all serialise on
/// the same mutex.
struct LoggerState {
    history: HistoryBuffer,
    listeners: Vec<Arc<dyn ExposureListener>>,
}

/// Records exposure events and fans them out to subscribers.
///
/// Created once and shared as `Arc<ExposureLogger>` between the tracker
/// (producer) and any number of consumers on other threads.
///
/// Listeners are notified outside the lock, from a snapshot of the
/// subscriber list taken while recording the event. A listener may
/// therefore subscribe, unsubscribe or read history from inside its own
/// callback. A panicking listener is isolated: the panic is logged and
/// counted, and the remaining listeners are still notified.
pub struct ExposureLogger {
    state: Mutex<LoggerState>,
    formatter: LineFormatter,
    metrics: Arc<TrackerMetrics>,
}

impl ExposureLogger {
    /// Create a logger from engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_metrics(config, Arc::new(TrackerMetrics::new()))
    }

    /// Create a logger with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(&EngineConfig::default())
    }

    /// Create a logger that reports into an existing metrics instance.
    pub fn with_metrics(config: &EngineConfig, metrics: Arc<TrackerMetrics>) -> Self {
        if config.history_capacity == 0 {
            warn!("History capacity 0 is not usable, keeping 1 line");
        }
        info!(
            capacity = config.history_capacity.max(1),
            timezone = config.timezone.as_config_str(),
            "Exposure logger created"
        );

        Self {
            state: Mutex::new(LoggerState {
                history: HistoryBuffer::new(config.history_capacity),
                listeners: Vec::new(),
            }),
            formatter: LineFormatter::new(config.timezone),
            metrics,
        }
    }

    /// Record an event and notify every subscriber.
    ///
    /// Returns the formatted line that was stored.
    pub fn log(&self, event: ExposureEvent) -> String {
        let line = self.formatter.format(&event);

        let listeners = {
            let mut state = self.state.lock();
            let evicted = state.history.push_front(line.clone());
            self.metrics.history_evicted(evicted);
            state.listeners.clone()
        };

        self.metrics
            .event_emitted(event.stage(), event.is_disappearance());
        debug!(
            card_id = event.card_id(),
            stage = event.stage().name(),
            position = event.position(),
            listeners = listeners.len(),
            "Exposure event"
        );

        for listener in &listeners {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                listener.on_event(&event, &line);
            }));
            if outcome.is_err() {
                self.metrics.listener_panicked();
                warn!(
                    card_id = event.card_id(),
                    stage = event.stage().name(),
                    "Exposure listener panicked, continuing with remaining listeners"
                );
            }
        }

        line
    }

    /// Register a listener. Registering the same `Arc` twice is a no-op.
    ///
    /// Returns `true` if the listener was newly added.
    pub fn subscribe(&self, listener: Arc<dyn ExposureListener>) -> bool {
        let mut state = self.state.lock();
        if state.listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        state.listeners.push(listener);
        debug!(listeners = state.listeners.len(), "Exposure listener subscribed");
        true
    }

    /// Register a closure as a listener.
    ///
    /// Returns the registered handle, needed later to unsubscribe.
    pub fn subscribe_fn<F>(&self, f: F) -> Arc<dyn ExposureListener>
    where
        F: Fn(&ExposureEvent, &str) + Send + Sync + 'static,
    {
        let listener: Arc<dyn ExposureListener> = Arc::new(FnListener(f));
        self.subscribe(Arc::clone(&listener));
        listener
    }

    /// Remove a listener. Removing a non-member is a no-op.
    ///
    /// Returns `true` if the listener was registered.
    pub fn unsubscribe(&self, listener: &Arc<dyn ExposureListener>) -> bool {
        let mut state = self.state.lock();
        let before = state.listeners.len();
        state.listeners.retain(|l| !same_listener(l, listener));
        let removed = state.listeners.len() != before;
        if removed {
            debug!(listeners = state.listeners.len(), "Exposure listener unsubscribed");
        }
        removed
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }

    /// Independent copy of the history, newest first.
    pub fn history_snapshot(&self) -> Vec<String> {
        self.state.lock().history.snapshot()
    }

    /// Number of lines currently retained.
    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Retention cap of the history.
    pub fn history_capacity(&self) -> usize {
        self.state.lock().history.capacity()
    }

    /// Drop every retained line. Subscribers are unaffected.
    pub fn clear_history(&self) {
        self.state.lock().history.clear();
    }

    /// Formatter used for history lines.
    pub fn formatter(&self) -> &LineFormatter {
        &self.formatter
    }

    /// Shared metrics this logger reports into.
    pub fn metrics(&self) -> &Arc<TrackerMetrics> {
        &self.metrics
    }
}

impl std::fmt::Debug for ExposureLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ExposureLogger")
            .field("history_len", &state.history.len())
            .field("history_capacity", &state.history.capacity())
            .field("listeners", &state.listeners.len())
            .field("formatter", &self.formatter)
            .finish()
    }
}

/// Identity comparison on the data pointer, ignoring vtable metadata.
fn same_listener(a: &Arc<dyn ExposureListener>, b: &Arc<dyn ExposureListener>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
