//! CLI error types.

use std::path::PathBuf;

use feedexposure::ConfigError;
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid trace {}: {source}", path.display())]
    Trace {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = CliError::InvalidArgument("--history must be at least 1".to_string());
        assert_eq!(err.to_string(), "Invalid argument: --history must be at least 1");
    }

    #[test]
    fn test_config_error_converts() {
        let err: CliError = ConfigError::Parse("bad section".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));
    }
}
