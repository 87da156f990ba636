//! Configuration file support.
//!
//! Preferences live in a small versioned JSON file under the platform config
//! directory. A missing or unreadable file falls back to defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    APP_DIR_NAME, AUTO_SAVE_DEBOUNCE, DEFAULT_GRADIENT_STEPS, UNDO_HISTORY_LIMIT,
};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

/// User preferences section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Maximum number of undo steps
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Stops used for the hue gradient
    #[serde(default = "default_gradient_steps")]
    pub gradient_steps: usize,

    /// Save the color automatically after edits
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,

    /// Seconds to wait after the last edit before auto-saving
    #[serde(default = "default_auto_save_debounce_secs")]
    pub auto_save_debounce_secs: u64,

    /// Where to keep the last-used color; platform default when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_undo_limit() -> usize {
    UNDO_HISTORY_LIMIT
}

fn default_gradient_steps() -> usize {
    DEFAULT_GRADIENT_STEPS
}

fn default_auto_save() -> bool {
    true
}

fn default_auto_save_debounce_secs() -> u64 {
    AUTO_SAVE_DEBOUNCE.as_secs()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            undo_limit: default_undo_limit(),
            gradient_steps: default_gradient_steps(),
            auto_save: default_auto_save(),
            auto_save_debounce_secs: default_auto_save_debounce_secs(),
            store_path: None,
        }
    }
}

impl UserPreferences {
    /// Auto-save debounce as a duration.
    pub fn auto_save_debounce(&self) -> Duration {
        Duration::from_secs(self.auto_save_debounce_secs)
    }
}

/// Directory holding this application's files under the platform config
/// directory. Returns None when no home or config directory is known.
#[cfg(not(target_arch = "wasm32"))]
pub fn app_dir() -> Option<PathBuf> {
    // Try to use XDG config directory, fall back to home directory
    if let Some(config_dir) = dirs::config_dir() {
        Some(config_dir.join(APP_DIR_NAME))
    } else {
        dirs::home_dir().map(|home_dir| home_dir.join(".config").join(APP_DIR_NAME))
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "reactive-color-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        app_dir().map(|dir| dir.join(Self::default_filename()))
    }

    /// Try to load configuration from a path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Try to load configuration from the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Save configuration to a path, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.undo_limit, UNDO_HISTORY_LIMIT);
        assert_eq!(config.preferences.gradient_steps, DEFAULT_GRADIENT_STEPS);
        assert!(config.preferences.auto_save);
        assert_eq!(config.preferences.auto_save_debounce(), AUTO_SAVE_DEBOUNCE);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config =
            AppConfig::from_json(r#"{ "version": 1, "preferences": { "log_level": "debug" } }"#)
                .unwrap();
        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert_eq!(config.preferences.undo_limit, UNDO_HISTORY_LIMIT);
        assert!(config.preferences.store_path.is_none());
    }

    #[test]
    fn test_version_too_new() {
        let result = AppConfig::from_json(r#"{ "version": 2 }"#);
        assert!(matches!(result, Err(ConfigError::VersionTooNew { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(AppConfig::default_filename());

        let mut config = AppConfig::new();
        config.preferences.undo_limit = 7;
        config.preferences.log_level = LogLevel::Trace;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.preferences.undo_limit, 7);
        assert_eq!(loaded.preferences.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_unparseable_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        assert!(AppConfig::load_from(&path).is_none());
    }
}
