//! Widget configuration
//!
//! All fields have defaults, so a config file only needs to name the
//! options it changes.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PinPadError, Result};
use crate::surface::HapticPulse;

/// Default number of digits in a pin
pub const DEFAULT_PIN_LENGTH: usize = 4;

/// Longest pin the widget accepts
pub const MAX_PIN_LENGTH: usize = 64;

/// Default feedback pulse duration in milliseconds
pub const DEFAULT_HAPTIC_DURATION_MS: u64 = 300;

/// PinPad options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinPadConfig {
    /// Number of digits to collect
    pub pin_length: usize,

    /// Shuffle digits across the keypad slots
    pub randomize_digits: bool,

    /// Report completion as soon as the last digit is entered
    pub auto_submit: bool,

    /// Pulse when submit is pressed on an incomplete pin
    pub vibrate_on_incomplete_submit: bool,

    /// Feedback pulse length
    pub haptic_duration_ms: u64,

    /// Prompt shown above the indicators; hidden when absent or empty
    pub prompt_text: Option<String>,
}

impl Default for PinPadConfig {
    fn default() -> Self {
        Self {
            pin_length: DEFAULT_PIN_LENGTH,
            randomize_digits: true,
            auto_submit: true,
            vibrate_on_incomplete_submit: true,
            haptic_duration_ms: DEFAULT_HAPTIC_DURATION_MS,
            prompt_text: None,
        }
    }
}

impl PinPadConfig {
    /// Load from a `.json` or `.toml` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents)?,
            Some("toml") => Self::from_toml_str(&contents)?,
            other => {
                return Err(PinPadError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        tracing::debug!("Loaded pinpad config from {:?}", path);
        Ok(config)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option ranges
    pub fn validate(&self) -> Result<()> {
        if self.pin_length > MAX_PIN_LENGTH {
            return Err(PinPadError::InvalidConfig(format!(
                "pin_length {} exceeds maximum of {}",
                self.pin_length, MAX_PIN_LENGTH
            )));
        }

        if self.haptic_duration_ms == 0 {
            return Err(PinPadError::InvalidConfig(
                "haptic_duration_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Feedback pulse described by this config
    pub fn haptic_pulse(&self) -> HapticPulse {
        HapticPulse {
            duration: Duration::from_millis(self.haptic_duration_ms),
        }
    }

    pub fn with_pin_length(mut self, pin_length: usize) -> Self {
        self.pin_length = pin_length;
        self
    }

    pub fn with_randomize_digits(mut self, randomize: bool) -> Self {
        self.randomize_digits = randomize;
        self
    }

    pub fn with_auto_submit(mut self, auto_submit: bool) -> Self {
        self.auto_submit = auto_submit;
        self
    }

    pub fn with_vibrate_on_incomplete_submit(mut self, vibrate: bool) -> Self {
        self.vibrate_on_incomplete_submit = vibrate;
        self
    }

    pub fn with_prompt_text(mut self, prompt: impl Into<String>) -> Self {
        self.prompt_text = Some(prompt.into());
        self
    }
}
