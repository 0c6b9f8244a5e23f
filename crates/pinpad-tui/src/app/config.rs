//! TUI configuration persistence
//!
//! Saves and loads the pad options and display preferences.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pinpad_core::PinPadConfig;
use serde::{Deserialize, Serialize};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Log file name
const LOG_FILE_NAME: &str = "pinpad.log";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "pinpad";

/// TUI configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Widget options
    #[serde(default)]
    pub pad: PinPadConfig,

    /// Use the high-contrast palette
    #[serde(default)]
    pub high_contrast: bool,

    /// Show entered digits in the activity log instead of masking them
    #[serde(default)]
    pub reveal_pin: bool,

    /// Ring the terminal bell on feedback pulses
    #[serde(default = "default_bell")]
    pub bell: bool,

    /// UI tick interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_bell() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    50
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            pad: PinPadConfig::default(),
            high_contrast: false,
            reveal_pin: false,
            bell: default_bell(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl TuiConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Get the log file path
    pub fn log_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(LOG_FILE_NAME))
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let config: Self = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}", e);
                    return Self::default();
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                return Self::default();
            }
        };

        if let Err(e) = config.pad.validate() {
            tracing::warn!("Ignoring invalid pad config: {}", e);
            return Self {
                pad: PinPadConfig::default(),
                ..config
            };
        }

        config
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_file = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&config_file)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure config directory exists
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Tick interval as a duration
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert_eq!(config.pad, PinPadConfig::default());
        assert!(!config.high_contrast);
        assert!(!config.reveal_pin);
        assert!(config.bell);
        assert_eq!(config.tick_rate(), Duration::from_millis(50));
    }

    #[test]
    fn test_config_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = TuiConfig {
            pad: PinPadConfig::default()
                .with_pin_length(6)
                .with_randomize_digits(false)
                .with_prompt_text("Card PIN"),
            high_contrast: true,
            reveal_pin: true,
            bell: false,
            tick_rate_ms: 100,
        };
        config.save_to(&path).unwrap();

        assert_eq!(TuiConfig::load_from(&path), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "pad": { "auto_submit": false } }"#).unwrap();

        let config = TuiConfig::load_from(&path);
        assert!(!config.pad.auto_submit);
        assert_eq!(config.pad.pin_length, 4);
        assert!(config.bell);
    }

    #[test]
    fn test_corrupt_config_falls_back() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        fs::write(&path, "not json").unwrap();
        assert_eq!(TuiConfig::load_from(&path), TuiConfig::default());

        fs::write(&path, r#"{ "pad": { "pin_length": 500 }, "high_contrast": true }"#).unwrap();
        let config = TuiConfig::load_from(&path);
        assert_eq!(config.pad, PinPadConfig::default());
        assert!(config.high_contrast);
    }
}
