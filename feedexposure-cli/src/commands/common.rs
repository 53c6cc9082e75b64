//! Common utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use feedexposure::config::config_file_path;
use feedexposure::EngineConfig;
use tracing::debug;

use crate::error::CliError;

/// Resolve the config file to use: an explicit path, or the default
/// location if the platform has one.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(config_file_path)
}

/// Load the engine configuration.
///
/// An explicit path must exist; the default location falls back to
/// defaults when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig, CliError> {
    let config = match explicit {
        Some(path) => EngineConfig::load(path)?,
        None => match config_file_path() {
            Some(path) => EngineConfig::load_or_default(&path)?,
            None => {
                debug!("No platform config directory, using defaults");
                EngineConfig::default()
            }
        },
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/tmp/custom.ini");
        assert_eq!(resolve_config_path(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.ini"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[history]\ncapacity = 9\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.history_capacity, 9);
    }
}
