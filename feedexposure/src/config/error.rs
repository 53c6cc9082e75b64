//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or saving engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("Failed to access config file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The file is not valid INI.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A key holds a value the engine cannot use.
    #[error("Invalid value '{value}' for [{section}] {key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::invalid("history", "capacity", "lots", "expected an integer");
        let text = err.to_string();
        assert!(text.contains("[history] capacity"));
        assert!(text.contains("lots"));
        assert!(text.contains("expected an integer"));
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/nope/config.ini"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nope/config.ini"));
    }
}
