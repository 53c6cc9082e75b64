//! Exposure stage tracking.
//!
//! Turns per-pass visibility ratios into discrete exposure stages and
//! reports each change exactly once.
//!
//! # Architecture
//!
//! ```text
//! render surface
//!      │ sample_and_emit(viewport, attached)
//!      ▼
//! ExposureTracker ──► geometry::sample_visibility ──► classify ──► TransitionDetector
//!      │                                                               │
//!      │◄──────────────────────── transitions ─────────────────────────┘
//!      ├──► StageObserver (attached items, same thread)
//!      └──► ExposureLogger::log
//! ```
//!
//! # Stages
//!
//! | Ratio            | Stage |
//! |------------------|-------|
//! | `r <= 0`         | EXIT  |
//! | `0 < r < 0.5`    | ENTER |
//! | `0.5 <= r < 1.0` | HALF  |
//! | `r >= 1.0`       | FULL  |

mod classifier;
mod clock;
mod detector;
mod model;
mod tracker;

pub use classifier::{classify, FULL_THRESHOLD, HALF_THRESHOLD};
pub use clock::{Clock, ManualClock, SystemClock};
pub use detector::{Transition, TransitionDetector};
pub use model::{
    CardCategory, ExposureEvent, ExposureItem, ExposureStage, TrackedItem, UNKNOWN_CATEGORY,
    UNKNOWN_POSITION,
};
pub use tracker::{ExposureTracker, StageObserver};
