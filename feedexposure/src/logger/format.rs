//! Human-readable log lines for exposure events.
//!
//! Format: `[HH:MM:SS.mmm] pos=<position> type=<LABEL> title=<title> stage=<STAGE>`

use chrono::{DateTime, Local};

use crate::exposure::{CardCategory, ExposureEvent};

/// Rendered in place of the time when a timestamp is out of chrono's range.
const INVALID_TIME: &str = "--:--:--.---";

/// Time zone used to render event timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneMode {
    /// The host's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl TimeZoneMode {
    /// Parse from a config string (`local` / `utc`, case-insensitive).
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Some(TimeZoneMode::Local),
            "utc" => Some(TimeZoneMode::Utc),
            _ => None,
        }
    }

    /// Config string for this mode.
    pub fn as_config_str(&self) -> &'static str {
        match self {
            TimeZoneMode::Local => "local",
            TimeZoneMode::Utc => "utc",
        }
    }
}

/// Formats exposure events into single log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormatter {
    timezone: TimeZoneMode,
}

impl LineFormatter {
    pub fn new(timezone: TimeZoneMode) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> TimeZoneMode {
        self.timezone
    }

    /// Render `HH:MM:SS.mmm` for a millisecond timestamp.
    pub fn format_time(&self, timestamp_millis: i64) -> String {
        let Some(utc) = DateTime::from_timestamp_millis(timestamp_millis) else {
            return INVALID_TIME.to_string();
        };

        match self.timezone {
            TimeZoneMode::Utc => utc.format("%H:%M:%S%.3f").to_string(),
            TimeZoneMode::Local => utc
                .with_timezone(&Local)
                .format("%H:%M:%S%.3f")
                .to_string(),
        }
    }

    /// Render the full log line for an event.
    pub fn format(&self, event: &ExposureEvent) -> String {
        format!(
            "[{}] pos={} type={} title={} stage={}",
            self.format_time(event.timestamp_millis()),
            event.position(),
            CardCategory::label_for_code(event.category()),
            event.title().unwrap_or(""),
            event.stage().name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::{ExposureStage, UNKNOWN_CATEGORY};

    /// 2024-03-01T12:34:56.789Z
    const NOON_MILLIS: i64 = 1_709_296_496_789;

    #[test]
    fn test_format_time_utc() {
        let formatter = LineFormatter::new(TimeZoneMode::Utc);
        assert_eq!(formatter.format_time(NOON_MILLIS), "12:34:56.789");
    }

    #[test]
    fn test_format_time_pads_millis() {
        let formatter = LineFormatter::new(TimeZoneMode::Utc);
        assert_eq!(formatter.format_time(5), "00:00:00.005");
    }

    #[test]
    fn test_format_time_local_shape() {
        let formatter = LineFormatter::new(TimeZoneMode::Local);
        let time = formatter.format_time(NOON_MILLIS);
        // Offset depends on the host; only the shape and millis are stable
        assert_eq!(time.len(), 12);
        assert!(time.ends_with(".789"));
    }

    #[test]
    fn test_format_time_out_of_range() {
        let formatter = LineFormatter::new(TimeZoneMode::Utc);
        assert_eq!(formatter.format_time(i64::MAX), INVALID_TIME);
    }

    #[test]
    fn test_format_attached_event() {
        let formatter = LineFormatter::new(TimeZoneMode::Utc);
        let event = ExposureEvent::new(
            "card-1",
            5,
            ExposureStage::Half,
            NOON_MILLIS,
            Some("Morning news".to_string()),
            1,
        );

        assert_eq!(
            formatter.format(&event),
            "[12:34:56.789] pos=5 type=IMAGE title=Morning news stage=HALF"
        );
    }

    #[test]
    fn test_format_disappearance() {
        let formatter = LineFormatter::new(TimeZoneMode::Utc);
        let event = ExposureEvent::disappeared("card-1", NOON_MILLIS);

        assert_eq!(
            formatter.format(&event),
            "[12:34:56.789] pos=-1 type=UNKNOWN title= stage=EXIT"
        );
    }

    #[test]
    fn test_unknown_category_code() {
        let formatter = LineFormatter::new(TimeZoneMode::Utc);
        let event = ExposureEvent::new("x", 0, ExposureStage::Enter, 0, None, 42);
        assert!(formatter.format(&event).contains("type=UNKNOWN"));

        let event = ExposureEvent::new("x", 0, ExposureStage::Enter, 0, None, UNKNOWN_CATEGORY);
        assert!(formatter.format(&event).contains("type=UNKNOWN"));
    }

    #[test]
    fn test_timezone_from_config_str() {
        assert_eq!(TimeZoneMode::from_config_str("UTC"), Some(TimeZoneMode::Utc));
        assert_eq!(TimeZoneMode::from_config_str(" local "), Some(TimeZoneMode::Local));
        assert_eq!(TimeZoneMode::from_config_str("mars"), None);
    }
}
