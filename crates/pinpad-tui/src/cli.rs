//! Command-line options

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pinpad_core::PinPadConfig;

use crate::app::TuiConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "pinpad")]
#[command(about = "Terminal PIN pad with a randomized keypad", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of digits in a complete PIN
    #[arg(short = 'n', long)]
    pub pin_length: Option<usize>,

    /// Show digits in the usual order instead of shuffling them
    #[arg(long)]
    pub ordered: bool,

    /// Wait for an explicit submit when the last digit is entered
    #[arg(long)]
    pub no_auto_submit: bool,

    /// Do not pulse when an incomplete PIN is submitted
    #[arg(long)]
    pub no_vibrate: bool,

    /// Prompt shown above the indicators
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Pad options file (.json or .toml), replacing the saved pad options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use the high-contrast palette
    #[arg(long)]
    pub high_contrast: bool,

    /// Show entered digits in the activity log
    #[arg(long)]
    pub reveal: bool,

    /// Persist the resulting options as the new defaults
    #[arg(long)]
    pub save: bool,
}

impl Cli {
    /// Layer the command-line options over a loaded configuration
    pub fn apply(&self, config: &mut TuiConfig) -> Result<()> {
        if let Some(path) = &self.config {
            config.pad = PinPadConfig::from_path(path)
                .with_context(|| format!("Failed to load pad options from {}", path.display()))?;
        }
        if let Some(length) = self.pin_length {
            config.pad.pin_length = length;
        }
        if self.ordered {
            config.pad.randomize_digits = false;
        }
        if self.no_auto_submit {
            config.pad.auto_submit = false;
        }
        if self.no_vibrate {
            config.pad.vibrate_on_incomplete_submit = false;
        }
        if let Some(prompt) = &self.prompt {
            config.pad.prompt_text = Some(prompt.clone());
        }
        if self.high_contrast {
            config.high_contrast = true;
        }
        if self.reveal {
            config.reveal_pin = true;
        }

        config.pad.validate().context("Invalid pad options")?;
        Ok(())
    }
}
