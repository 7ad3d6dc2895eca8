//! Common regex patterns for nutrition label extraction.
//!
//! The `regex` crate has no look-around, so "number not followed by g / %"
//! is expressed as a `NUMBER` token plus a suffix probe on the text after it.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Maximal numeric token: integer, decimal, or bare fraction (".5")
    pub static ref NUMBER: Regex = Regex::new(
        r"\d+(?:\.\d+)?|\.\d+"
    ).unwrap();

    // Number directly followed by a gram unit
    pub static ref GRAM_NUMBER: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?|\.\d+)\s*g(?:rams|ram)?"
    ).unwrap();

    // "<1g", "< 1 g", "less than 1g"
    pub static ref LESS_THAN_ONE_GRAM: Regex = Regex::new(
        r"(?i)(?:<|less\s+than)\s*1\s*g"
    ).unwrap();

    // Suffix probes, applied to the text right after a NUMBER token
    pub static ref GRAM_SUFFIX: Regex = Regex::new(
        r"(?i)^\s*g"
    ).unwrap();

    pub static ref PERCENT_SUFFIX: Regex = Regex::new(
        r"^\s*%"
    ).unwrap();

    // Literal "0 g" forms, in priority order: digit zero, OCR letter o, the word
    pub static ref ZERO_GRAM: [Regex; 3] = [
        Regex::new(r"(?i)\b0\s*g\b").unwrap(),
        Regex::new(r"(?i)\bo\s*g\b").unwrap(),
        Regex::new(r"(?i)\bzero\s*g\b").unwrap(),
    ];
}

/// Phrases stating a nutrient is present in negligible amounts.
pub const INSIGNIFICANT_SOURCE_PHRASES: [&str; 2] =
    ["not a significant source", "insignificant source"];
