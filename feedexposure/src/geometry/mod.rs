//! Geometry sampling for the exposure engine.
//!
//! Given the viewport's visible rectangle and the items the render surface
//! currently has attached, this module computes how much of each item is
//! on screen. It is pure: no state survives a sampling pass.
//!
//! # Example
//!
//! ```
//! use feedexposure::geometry::{visibility_ratio, Rect};
//!
//! let viewport = Rect::from_size(400.0, 800.0);
//! let card = Rect::new(0.0, 750.0, 400.0, 850.0);
//!
//! assert_eq!(visibility_ratio(&viewport, &card, 100.0), 0.5);
//! ```

mod rect;
mod sampler;

pub use rect::Rect;
pub use sampler::{sample_visibility, visibility_ratio, Measurable, SampledItem, VisibilitySample};
