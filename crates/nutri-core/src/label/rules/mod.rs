//! Rule-based extractors for nutrition label text.

pub mod corrections;
pub mod keywords;
pub mod number;
pub mod patterns;
pub mod zero;

pub use corrections::{apply_corrections, decimal_shift, trailing_nine, Correction};
pub use keywords::{keyword_search, locate, KeywordHit, KeywordSearch};
pub use number::{NumberExtractor, NumberRule};
pub use zero::{has_explicit_zero, has_insignificant_source};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value read from text, together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Which rule produced the value.
    pub rule: NumberRule,
    /// Position of the matched token in the source text.
    pub position: Option<(usize, usize)>,
    /// Trimmed text segment the value was read from.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: NumberRule, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
