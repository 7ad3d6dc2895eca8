//! Error types for the nutri-core library.
//!
//! Parsing itself never fails: malformed OCR text degrades to the default
//! facts. Errors only come from configuration and I/O boundaries.

use thiserror::Error;

/// Main error type for the nutri library.
#[derive(Error, Debug)]
pub enum NutriError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to parser configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// A configuration value is out of range.
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },

    /// Unknown nutrient key name.
    #[error("unknown nutrient key: {0}")]
    UnknownKey(String),
}

/// Result type for the nutri library.
pub type Result<T> = std::result::Result<T, NutriError>;
