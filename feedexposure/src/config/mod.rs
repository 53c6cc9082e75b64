//! Engine configuration.
//!
//! `EngineConfig` is a plain struct with defaults and builder-style setters.
//! It can also be loaded from an INI file:
//!
//! ```ini
//! [history]
//! capacity = 500
//!
//! [format]
//! timezone = local
//!
//! [clock]
//! source = system
//! ```
//!
//! Missing sections and keys fall back to their defaults.

mod error;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use file::config_file_path;

use crate::logger::{TimeZoneMode, DEFAULT_HISTORY_CAPACITY};

/// Where event timestamps come from.
///
/// Honored by [`ExposureTracker::from_config`](crate::ExposureTracker::from_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockSource {
    /// The system wall clock.
    #[default]
    System,
    /// An externally driven clock (trace replays, tests).
    Manual,
}

impl ClockSource {
    /// Parse from a config string (`system` / `manual`, case-insensitive).
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "system" => Some(ClockSource::System),
            "manual" => Some(ClockSource::Manual),
            _ => None,
        }
    }

    pub fn as_config_str(&self) -> &'static str {
        match self {
            ClockSource::System => "system",
            ClockSource::Manual => "manual",
        }
    }
}

/// Configuration for the exposure tracker and logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of formatted lines kept in history.
    pub history_capacity: usize,

    /// Time zone used when rendering timestamps in log lines.
    pub timezone: TimeZoneMode,

    /// Timestamp source for events.
    pub clock: ClockSource,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            timezone: TimeZoneMode::default(),
            clock: ClockSource::default(),
        }
    }
}

impl EngineConfig {
    /// Set the history retention cap.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the time zone for rendered timestamps.
    pub fn with_timezone(mut self, timezone: TimeZoneMode) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the timestamp source.
    pub fn with_clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }
}
