//! Ratio → stage classification.
//!
//! ```text
//!   ratio ≤ 0          EXIT
//!   0 < ratio < 0.5    ENTER
//!   0.5 ≤ ratio < 1.0  HALF
//!   ratio ≥ 1.0        FULL
//! ```
//!
//! The boundaries are exact: 0.5 is HALF, 1.0 is FULL, 0 is EXIT.

use super::model::ExposureStage;

/// Lower bound (inclusive) of the HALF stage.
pub const HALF_THRESHOLD: f32 = 0.5;

/// Lower bound (inclusive) of the FULL stage.
pub const FULL_THRESHOLD: f32 = 1.0;

/// Classify a visible fraction into an exposure stage.
///
/// NaN is treated as "nothing visible". Ratios marginally above 1.0 from
/// float rounding still classify as FULL.
pub fn classify(ratio: f32) -> ExposureStage {
    if ratio.is_nan() || ratio <= 0.0 {
        ExposureStage::Exit
    } else if ratio >= FULL_THRESHOLD {
        ExposureStage::Full
    } else if ratio >= HALF_THRESHOLD {
        ExposureStage::Half
    } else {
        ExposureStage::Enter
    }
}
