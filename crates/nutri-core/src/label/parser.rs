//! Keyword proximity parser for nutrition label OCR text.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::config::ParserConfig;
use crate::models::nutrition::{NutrientKey, NutritionFacts, ParseReport, Resolution};

use super::rules::{
    apply_corrections, has_explicit_zero, has_insignificant_source, keyword_search, locate,
    Correction, NumberExtractor,
};
use super::LabelParser;

/// Parser locating each nutrient's keyword and reading the value next to it.
///
/// Lines are the unit of proximity: a value is read from the rest of the
/// keyword's line, or from the following line when the keyword ended its
/// line. Each nutrient is resolved independently.
#[derive(Debug, Clone)]
pub struct ProximityParser {
    config: ParserConfig,
    numbers: NumberExtractor,
}

impl ProximityParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with the given settings.
    ///
    /// Negative or non-finite values are replaced with their defaults so the
    /// output stays non-negative; call [`ParserConfig::validate`] first to
    /// reject them instead.
    pub fn with_config(config: ParserConfig) -> Self {
        if let Err(e) = config.validate() {
            warn!("{}, using the default", e);
        }
        let config = config.sanitized();
        let numbers = NumberExtractor::new().with_less_than_one_gram(config.less_than_one_gram);
        Self { config, numbers }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse with per-nutrient outcomes and notes.
    pub fn parse_report(&self, text: &str) -> ParseReport {
        let start = Instant::now();
        let lowered = text.to_lowercase();
        let lines = split_lines(&lowered);

        let mut report = ParseReport::unresolved(self.config.unresolved_default);

        for key in NutrientKey::ALL {
            let resolution = self.resolve(&lines, key, &mut report.notes);
            report
                .facts
                .set(key, resolution.value(self.config.unresolved_default));
            report.resolutions.insert(key, resolution);
        }

        info!(
            "Parsed {} lines, resolved {}/{} nutrients in {:?}",
            lines.len(),
            report.resolutions.values().filter(|r| r.is_known()).count(),
            NutrientKey::ALL.len(),
            start.elapsed()
        );

        report
    }

    /// Resolve one nutrient from lowercased, trimmed, non-empty lines.
    pub fn resolve(&self, lines: &[&str], key: NutrientKey, notes: &mut Vec<String>) -> Resolution {
        let Some(hit) = locate(lines, &keyword_search(key)) else {
            debug!("{}: no keyword found", key);
            return Resolution::Unknown;
        };

        let line = lines[hit.line];
        let next_line = lines.get(hit.line + 1).copied().unwrap_or("");
        debug!("{}: keyword '{}' on line {}", key, hit.term, hit.line);

        // Servings are bare counts anywhere on the line, never split from
        // their keyword, so only gram values get a segment and next-line retry.
        let (segment, found) = if key.is_gram_denominated() {
            let segment = hit.segment_after(line);
            let found = self.numbers.extract_match(segment, true).or_else(|| {
                if next_line.is_empty() {
                    return None;
                }
                let from_next = self.numbers.extract_match(next_line, true);
                if from_next.is_some() {
                    notes.push(format!("{}: value read from the next line", key));
                }
                from_next
            });
            (segment, found)
        } else {
            ("", self.numbers.extract_match(line, false))
        };

        if let Some(found) = found {
            let value = if self.config.auto_correct {
                let (value, applied) = apply_corrections(key, found.value, &found.source);
                for correction in applied {
                    notes.push(describe_correction(key, correction));
                }
                value
            } else {
                found.value
            };
            debug!("{}: {} ({:?} from '{}')", key, value, found.rule, found.source);
            return Resolution::Resolved(value);
        }

        if has_explicit_zero(segment, line, next_line) {
            debug!("{}: explicit zero", key);
            notes.push(format!("{}: explicit zero", key));
            return Resolution::ConfirmedZero;
        }

        if self.config.detect_insignificant_source && has_insignificant_source(line, next_line) {
            debug!("{}: not a significant source", key);
            notes.push(format!("{}: not a significant source", key));
            return Resolution::ConfirmedZero;
        }

        debug!("{}: keyword without a value", key);
        Resolution::Unknown
    }
}

impl Default for ProximityParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelParser for ProximityParser {
    fn parse(&self, text: &str) -> NutritionFacts {
        self.parse_report(text).facts
    }
}

/// Split into trimmed, non-empty lines.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn describe_correction(key: NutrientKey, correction: Correction) -> String {
    match correction {
        Correction::DecimalShift { from, to } => {
            format!("{}: trailing zero dropped, {} -> {}", key, from, to)
        }
        Correction::TrailingNine { from, to } => {
            format!("{}: trailing nine dropped, {} -> {}", key, from, to)
        }
    }
}

/// Parse label text with the default configuration.
pub fn parse_nutrition_text(text: &str) -> NutritionFacts {
    ProximityParser::new().parse(text)
}
