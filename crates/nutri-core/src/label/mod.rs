//! Nutrition label field extraction module.

mod parser;
pub mod rules;

pub use parser::{parse_nutrition_text, ProximityParser};

use crate::models::nutrition::NutritionFacts;

/// Trait for nutrition label parsers.
///
/// Parsing is total: any text, including empty text, yields a complete set of
/// facts, with unresolved nutrients at their default value.
pub trait LabelParser {
    /// Parse nutrition facts from OCR text.
    fn parse(&self, text: &str) -> NutritionFacts;
}
