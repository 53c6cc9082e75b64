//! Tracker telemetry for observability.
//!
//! Lock-free atomic counters updated on the sampling path, with a
//! point-in-time snapshot for display.
//!
//! # Architecture
//!
//! ```text
//! ExposureTracker ─┐
//!                  ├──► TrackerMetrics ─────► MetricsSnapshot ─────► Views
//! ExposureLogger ──┘    (atomic counters)     (point-in-time copy)   (CLI, etc.)
//! ```
//!
//! # Example
//!
//! ```
//! use feedexposure::telemetry::TrackerMetrics;
//! use feedexposure::ExposureStage;
//!
//! let metrics = TrackerMetrics::new();
//! metrics.pass_completed(12, 0);
//! metrics.event_emitted(ExposureStage::Enter, false);
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.passes, 1);
//! assert_eq!(snapshot.events_emitted, 1);
//! ```

mod metrics;
mod snapshot;

pub use metrics::TrackerMetrics;
pub use snapshot::MetricsSnapshot;
