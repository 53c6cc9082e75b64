//! FeedExposure - exposure tracking for scrolling feeds
//!
//! This library measures how much of each card in a scrolling list is
//! visible, classifies it into an exposure stage (ENTER, HALF, FULL, EXIT)
//! and reports every stage change exactly once to a bounded log history
//! and to any number of subscribers.
//!
//! # Modules
//!
//! - [`geometry`] - viewport/item rectangles and visibility ratios
//! - [`exposure`] - stage classification, transition detection, the tracker
//! - [`logger`] - line formatting, history and subscriber fan-out
//! - [`telemetry`] - counters for passes, events and listener failures
//! - [`config`] - engine configuration and INI persistence
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use feedexposure::geometry::Rect;
//! use feedexposure::{EngineConfig, ExposureLogger, ExposureTracker, TrackedItem};
//!
//! let logger = Arc::new(ExposureLogger::new(&EngineConfig::default()));
//! let mut tracker = ExposureTracker::new(Arc::clone(&logger));
//!
//! let viewport = Rect::from_size(400.0, 800.0);
//! let card = TrackedItem::new("card-1", 0, Rect::new(0.0, 0.0, 400.0, 200.0));
//! tracker.sample_and_emit(&viewport, &[card]);
//!
//! assert!(logger.history_snapshot()[0].ends_with("stage=FULL"));
//! ```

pub mod config;
pub mod exposure;
pub mod geometry;
pub mod logger;
pub mod telemetry;

pub use config::{ConfigError, EngineConfig};
pub use exposure::{
    CardCategory, ExposureEvent, ExposureItem, ExposureStage, ExposureTracker, StageObserver,
    TrackedItem,
};
pub use geometry::Rect;
pub use logger::{ExposureListener, ExposureLogger};
