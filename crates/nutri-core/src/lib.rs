//! Core library for nutrition label OCR text.
//!
//! This crate provides:
//! - Numeric value extraction tolerant of OCR noise (`o` read for `0`, "<1g")
//! - Keyword proximity parsing of protein, fats, carbohydrates, fiber,
//!   sugars and servings from English and Spanish labels
//! - Nutrition facts data models and parser configuration

pub mod error;
pub mod label;
pub mod models;

pub use error::{ConfigError, NutriError, Result};
pub use label::rules::NumberExtractor;
pub use label::{parse_nutrition_text, LabelParser, ProximityParser};
pub use models::config::{NutriConfig, OutputConfig, ParserConfig};
pub use models::nutrition::{NutrientKey, NutritionFacts, ParseReport, Resolution, UNRESOLVED_DEFAULT};
