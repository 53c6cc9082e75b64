//! Recorded scroll traces.
//!
//! A trace is a JSON document describing a sequence of sampling passes:
//!
//! ```json
//! {
//!   "viewport": { "left": 0, "top": 0, "right": 400, "bottom": 800 },
//!   "passes": [
//!     {
//!       "at_millis": 1709296496789,
//!       "items": [
//!         {
//!           "id": "card-1",
//!           "position": 0,
//!           "title": "Hello",
//!           "category": 1,
//!           "bounds": { "left": 0, "top": 700, "right": 400, "bottom": 900 },
//!           "height": 200
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A pass may override the viewport; otherwise the trace-level viewport
//! applies.

use std::path::Path;

use feedexposure::{Rect, TrackedItem};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// A recorded sequence of sampling passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Default viewport for every pass.
    pub viewport: Rect,
    #[serde(default)]
    pub passes: Vec<TracePass>,
}

/// One sampling pass: the attached items at a moment in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracePass {
    /// Wall-clock time of the pass, if recorded.
    #[serde(default)]
    pub at_millis: Option<i64>,
    /// Viewport override for this pass.
    #[serde(default)]
    pub viewport: Option<Rect>,
    #[serde(default)]
    pub items: Vec<TrackedItem>,
}

impl Trace {
    /// Parse a trace from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a trace from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| CliError::Trace {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether any pass carries a recorded timestamp.
    pub fn has_timestamps(&self) -> bool {
        self.passes.iter().any(|pass| pass.at_millis.is_some())
    }

    /// First recorded timestamp, if any.
    pub fn first_timestamp(&self) -> Option<i64> {
        self.passes.iter().find_map(|pass| pass.at_millis)
    }
}

impl TracePass {
    /// Viewport in effect for this pass.
    pub fn viewport_or<'a>(&'a self, default: &'a Rect) -> &'a Rect {
        self.viewport.as_ref().unwrap_or(default)
    }
}
