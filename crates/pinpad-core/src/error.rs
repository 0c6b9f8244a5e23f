//! Error types for the PinPad library
//!
//! The entry state machine itself never fails. Errors only arise while
//! loading or validating configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PinPadError>;

#[derive(Error, Debug)]
pub enum PinPadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
