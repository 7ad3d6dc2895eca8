//! Configuration structures for the label parser.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::models::nutrition::UNRESOLVED_DEFAULT;

/// Main configuration for the nutri pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutriConfig {
    /// Parser configuration.
    pub parser: ParserConfig,

    /// Output formatting configuration.
    pub output: OutputConfig,
}

/// Proximity parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Value reported for nutrients that could not be resolved.
    pub unresolved_default: f64,

    /// Value reported for "<1g" / "less than 1g".
    pub less_than_one_gram: f64,

    /// Try to correct common OCR errors in numbers (trailing 0 / trailing 9).
    pub auto_correct: bool,

    /// Treat "not a significant source" phrases as zero.
    pub detect_insignificant_source: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            unresolved_default: UNRESOLVED_DEFAULT,
            less_than_one_gram: 0.5,
            auto_correct: true,
            detect_insignificant_source: true,
        }
    }
}

impl ParserConfig {
    /// Check that every value keeps the output non-negative and finite.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_non_negative("parser.unresolved_default", self.unresolved_default)?;
        check_non_negative("parser.less_than_one_gram", self.less_than_one_gram)?;
        Ok(())
    }

    /// Replace values that would fail [`validate`](Self::validate) with defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            unresolved_default: non_negative_or(self.unresolved_default, defaults.unresolved_default),
            less_than_one_gram: non_negative_or(self.less_than_one_gram, defaults.less_than_one_gram),
            ..self
        }
    }
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

fn check_non_negative(field: &str, value: f64) -> std::result::Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: format!("expected a finite non-negative number, got {}", value),
        });
    }
    Ok(())
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Decimal places in plain text output.
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: false,
            precision: 1,
        }
    }
}

impl NutriConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NutriConfig = serde_json::from_str(&content)?;
        config.parser.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = NutriConfig::default();
        assert_eq!(config.parser.unresolved_default, 1.0);
        assert_eq!(config.parser.less_than_one_gram, 0.5);
        assert!(config.parser.auto_correct);
        assert!(config.parser.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NutriConfig =
            serde_json::from_str(r#"{"parser": {"auto_correct": false}}"#).unwrap();
        assert!(!config.parser.auto_correct);
        assert_eq!(config.parser.unresolved_default, 1.0);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let config = ParserConfig {
            less_than_one_gram: -0.5,
            ..ParserConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref field, .. }) if field == "parser.less_than_one_gram"
        ));
    }

    #[test]
    fn test_sanitized_replaces_invalid_values() {
        let config = ParserConfig {
            unresolved_default: -1.0,
            less_than_one_gram: f64::NAN,
            auto_correct: false,
            ..ParserConfig::default()
        }
        .sanitized();
        assert_eq!(config.unresolved_default, 1.0);
        assert_eq!(config.less_than_one_gram, 0.5);
        assert!(!config.auto_correct);
        assert!(config.validate().is_ok());

        let valid = ParserConfig {
            unresolved_default: 0.0,
            ..ParserConfig::default()
        };
        assert_eq!(valid.clone().sanitized(), valid);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = NutriConfig::default();
        config.output.pretty_json = true;
        config.save(&path).unwrap();

        let loaded = NutriConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"parser": {"unresolved_default": -1.0}}"#).unwrap();

        assert!(NutriConfig::from_file(&path).is_err());
    }
}
