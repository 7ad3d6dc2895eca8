//! Numeric value extraction from short label segments.

use regex::{Match, Regex};
use tracing::trace;

use super::patterns::{GRAM_NUMBER, GRAM_SUFFIX, LESS_THAN_ONE_GRAM, NUMBER, PERCENT_SUFFIX};
use super::{ExtractionMatch, FieldExtractor};

/// Rule that produced a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberRule {
    /// "<1g" / "less than 1g" sentinel.
    LessThanOneGram,
    /// Number with a gram unit.
    GramSuffixed,
    /// Bare count with no unit and no percent sign.
    BareCount,
    /// Any number that is not a percentage.
    General,
}

/// Picks the single best-guess number from a text segment.
///
/// Rules are tried in order and the first one that yields a value wins:
/// 1. `<1g` / `less than 1g` returns the configured sentinel (0.5 by default).
/// 2. With `prioritize_grams`, the first number followed by `g`/`gram(s)`.
/// 3. Without it, the first non-zero number carrying neither `g` nor `%`.
/// 4. Otherwise the first number not followed by `%`, skipping one that also
///    appears elsewhere in the segment as a percentage.
///
/// Letters `o`/`O` are read as `0` before any matching.
#[derive(Debug, Clone)]
pub struct NumberExtractor {
    less_than_one_gram: f64,
}

impl NumberExtractor {
    pub fn new() -> Self {
        Self {
            less_than_one_gram: 0.5,
        }
    }

    /// Set the value reported for "<1g".
    pub fn with_less_than_one_gram(mut self, value: f64) -> Self {
        self.less_than_one_gram = value;
        self
    }

    /// Extract the best-guess number from `segment`.
    pub fn extract(&self, segment: &str, prioritize_grams: bool) -> Option<f64> {
        self.extract_match(segment, prioritize_grams).map(|m| m.value)
    }

    /// Like [`extract`](Self::extract), keeping the rule, token span and
    /// trimmed source segment alongside the value.
    pub fn extract_match(&self, segment: &str, prioritize_grams: bool) -> Option<ExtractionMatch<f64>> {
        let normalized = normalize_zero_noise(segment);
        let source = segment.trim();

        if let Some(m) = LESS_THAN_ONE_GRAM.find(&normalized) {
            trace!("'<1g' form in '{}'", source);
            return Some(
                ExtractionMatch::new(self.less_than_one_gram, NumberRule::LessThanOneGram, source)
                    .with_position(m.start(), m.end()),
            );
        }

        if prioritize_grams {
            if let Some(token) = GRAM_NUMBER.captures(&normalized).and_then(|caps| caps.get(1)) {
                if let Some(value) = parse_token(token.as_str()) {
                    return Some(
                        ExtractionMatch::new(value, NumberRule::GramSuffixed, source)
                            .with_position(token.start(), token.end()),
                    );
                }
            }
        } else if let Some(found) = bare_count(&normalized, source) {
            return Some(found);
        }

        general(&normalized, source)
    }
}

impl Default for NumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NumberExtractor {
    type Output = ExtractionMatch<f64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_match(text, true)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let normalized = normalize_zero_noise(text);

        NUMBER
            .find_iter(&normalized)
            .filter(|m| !followed_by(&normalized, m, &PERCENT_SUFFIX))
            .filter_map(|m| {
                let rule = if followed_by(&normalized, &m, &GRAM_SUFFIX) {
                    NumberRule::GramSuffixed
                } else {
                    NumberRule::General
                };
                parse_token(m.as_str()).map(|value| {
                    ExtractionMatch::new(value, rule, text.trim()).with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Replace letters commonly misread for zero. Byte offsets are preserved.
fn normalize_zero_noise(segment: &str) -> String {
    segment.replace(['o', 'O'], "0")
}

fn parse_token(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn followed_by(text: &str, m: &Match<'_>, suffix: &Regex) -> bool {
    suffix.is_match(&text[m.end()..])
}

/// Whether `token` occurs in `text` as a whole number token directly followed
/// by `%`. Digits inside a longer token ("5" in "15%") do not count.
fn appears_as_percent(text: &str, token: &str) -> bool {
    NUMBER
        .find_iter(text)
        .any(|m| m.as_str() == token && followed_by(text, &m, &PERCENT_SUFFIX))
}

fn bare_count(normalized: &str, source: &str) -> Option<ExtractionMatch<f64>> {
    let candidates: Vec<Match<'_>> = NUMBER
        .find_iter(normalized)
        .filter(|m| {
            !followed_by(normalized, m, &GRAM_SUFFIX) && !followed_by(normalized, m, &PERCENT_SUFFIX)
        })
        .collect();

    // A leading "0" among several counts is almost always OCR noise
    let chosen = if candidates.len() > 1 {
        candidates
            .iter()
            .find(|m| parse_token(m.as_str()).is_some_and(|v| v != 0.0))
            .or(candidates.first())
    } else {
        candidates.first()
    }?;

    let value = parse_token(chosen.as_str())?;
    Some(ExtractionMatch::new(value, NumberRule::BareCount, source).with_position(chosen.start(), chosen.end()))
}

fn general(normalized: &str, source: &str) -> Option<ExtractionMatch<f64>> {
    let candidates: Vec<Match<'_>> = NUMBER
        .find_iter(normalized)
        .filter(|m| !followed_by(normalized, m, &PERCENT_SUFFIX))
        .take(2)
        .collect();

    let first = candidates.first()?;
    let chosen = if appears_as_percent(normalized, first.as_str()) {
        let second = candidates.get(1)?;
        if appears_as_percent(normalized, second.as_str()) {
            trace!("only percentages in '{}'", source);
            return None;
        }
        second
    } else {
        first
    };

    let value = parse_token(chosen.as_str())?;
    Some(ExtractionMatch::new(value, NumberRule::General, source).with_position(chosen.start(), chosen.end()))
}
