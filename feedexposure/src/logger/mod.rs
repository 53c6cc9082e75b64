//! Exposure event logging and subscriber fan-out.
//!
//! The logger turns each [`ExposureEvent`](crate::ExposureEvent) into a
//! human-readable line, keeps a bounded newest-first history of those
//! lines, and pushes every event to the registered listeners.
//!
//! # Architecture
//!
//! ```text
//! ExposureTracker ──► ExposureLogger::log ──┬──► HistoryBuffer (newest first, capped)
//!   (render thread)     │                   │
//!                       │   lock released   └──► subscriber snapshot
//!                       ▼
//!                  listener.on_event(event, line)   (each isolated)
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use feedexposure::logger::ExposureLogger;
//! use feedexposure::{ExposureEvent, ExposureStage};
//!
//! let logger = Arc::new(ExposureLogger::with_defaults());
//! let overlay = logger.subscribe_fn(|event, line| {
//!     println!("{} -> {}", event.card_id(), line);
//! });
//!
//! logger.log(ExposureEvent::new("card-1", 0, ExposureStage::Enter, 0, None, 0));
//! assert_eq!(logger.history_len(), 1);
//!
//! logger.unsubscribe(&overlay);
//! ```

mod emitter;
mod format;
mod history;
mod listener;

pub use emitter::ExposureLogger;
pub use format::{LineFormatter, TimeZoneMode};
pub use history::{HistoryBuffer, DEFAULT_HISTORY_CAPACITY};
pub use listener::{ExposureListener, FnListener};
