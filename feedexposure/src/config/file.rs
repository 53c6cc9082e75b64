//! INI persistence for [`EngineConfig`].

use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::{debug, warn};

use super::error::{ConfigError, ConfigResult};
use super::{ClockSource, EngineConfig};
use crate::logger::TimeZoneMode;

const SECTION_HISTORY: &str = "history";
const SECTION_FORMAT: &str = "format";
const SECTION_CLOCK: &str = "clock";

const KEY_CAPACITY: &str = "capacity";
const KEY_TIMEZONE: &str = "timezone";
const KEY_SOURCE: &str = "source";

/// Default location of the config file: `<config dir>/feedexposure/config.ini`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("feedexposure").join("config.ini"))
}

impl EngineConfig {
    /// Parse configuration from INI text.
    pub fn from_ini_str(text: &str) -> ConfigResult<Self> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_ini(&ini)
    }

    /// Load configuration from an INI file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded exposure config");
        Self::from_ini_str(&text)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Render the configuration as INI text.
    pub fn to_ini_string(&self) -> String {
        let mut ini = Ini::new();
        ini.with_section(Some(SECTION_HISTORY))
            .set(KEY_CAPACITY, self.history_capacity.to_string());
        ini.with_section(Some(SECTION_FORMAT))
            .set(KEY_TIMEZONE, self.timezone.as_config_str());
        ini.with_section(Some(SECTION_CLOCK))
            .set(KEY_SOURCE, self.clock.as_config_str());

        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = ini.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_ini_string()).map_err(io_err)
    }

    fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(value) = get(ini, SECTION_HISTORY, KEY_CAPACITY) {
            let capacity: usize = value.parse().map_err(|_| {
                ConfigError::invalid(SECTION_HISTORY, KEY_CAPACITY, value, "expected a non-negative integer")
            })?;
            if capacity == 0 {
                warn!("History capacity 0 is not usable, keeping 1 line");
                config.history_capacity = 1;
            } else {
                config.history_capacity = capacity;
            }
        }

        if let Some(value) = get(ini, SECTION_FORMAT, KEY_TIMEZONE) {
            config.timezone = TimeZoneMode::from_config_str(value).ok_or_else(|| {
                ConfigError::invalid(SECTION_FORMAT, KEY_TIMEZONE, value, "expected 'local' or 'utc'")
            })?;
        }

        if let Some(value) = get(ini, SECTION_CLOCK, KEY_SOURCE) {
            config.clock = ClockSource::from_config_str(value).ok_or_else(|| {
                ConfigError::invalid(SECTION_CLOCK, KEY_SOURCE, value, "expected 'system' or 'manual'")
            })?;
        }

        Ok(config)
    }
}

fn get<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.section(Some(section))
        .and_then(|props| props.get(key))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_gives_defaults() {
        let config = EngineConfig::from_ini_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let text = "[history]\ncapacity = 42\n\n[format]\ntimezone = UTC\n\n[clock]\nsource = manual\n";
        let config = EngineConfig::from_ini_str(text).unwrap();

        assert_eq!(config.history_capacity, 42);
        assert_eq!(config.timezone, TimeZoneMode::Utc);
        assert_eq!(config.clock, ClockSource::Manual);
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let config = EngineConfig::from_ini_str("[history]\ncapacity =\n").unwrap();
        assert_eq!(config.history_capacity, 500);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let config = EngineConfig::from_ini_str("[history]\ncapacity = 0\n").unwrap();
        assert_eq!(config.history_capacity, 1);
    }

    #[test]
    fn test_invalid_capacity() {
        let err = EngineConfig::from_ini_str("[history]\ncapacity = many\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "capacity"));
    }

    #[test]
    fn test_invalid_timezone() {
        let err = EngineConfig::from_ini_str("[format]\ntimezone = mars\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref section, .. } if section == "format"));
    }

    #[test]
    fn test_ini_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let config = EngineConfig::default()
            .with_history_capacity(7)
            .with_timezone(TimeZoneMode::Utc);
        config.save(&path).unwrap();

        assert_eq!(EngineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(&dir.path().join("absent.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_or_default(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_file_path_name() {
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("feedexposure/config.ini"));
        }
    }
}
