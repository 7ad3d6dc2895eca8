//! Explicit-zero detection for nutrients with no readable number.

use super::patterns::{INSIGNIFICANT_SOURCE_PHRASES, ZERO_GRAM};

fn has_zero_gram(text: &str) -> bool {
    ZERO_GRAM.iter().any(|re| re.is_match(text))
}

/// Look for a literal "0 g" near the keyword.
///
/// Checked in order: the segment after the keyword, the keyword's line, and,
/// only when the keyword ended its line, the following line.
pub fn has_explicit_zero(segment: &str, line: &str, next_line: &str) -> bool {
    if !segment.is_empty() && has_zero_gram(segment) {
        return true;
    }

    if has_zero_gram(line) {
        return true;
    }

    segment.trim().is_empty() && !next_line.is_empty() && has_zero_gram(next_line)
}

/// Whether the keyword's line or the next one says "not a significant source".
pub fn has_insignificant_source(line: &str, next_line: &str) -> bool {
    let line = line.to_lowercase();
    let next_line = next_line.to_lowercase();

    INSIGNIFICANT_SOURCE_PHRASES
        .iter()
        .any(|phrase| line.contains(phrase) || next_line.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_in_segment() {
        assert!(has_explicit_zero(" og", "proteinog", ""));
        assert!(has_explicit_zero(" 0 g", "total fat 0 g", ""));
    }

    #[test]
    fn test_zero_on_line() {
        assert!(has_explicit_zero(" -", "trans fat 0g total fat -", ""));
        assert!(has_explicit_zero(" zero g", "fiber zero g", "protein 3g"));
    }

    #[test]
    fn test_next_line_only_when_keyword_ends_line() {
        assert!(has_explicit_zero("", "dietary fiber", "0g"));
        assert!(has_explicit_zero("   ", "dietary fiber", "o g"));
        assert!(!has_explicit_zero(" n/a", "dietary fiber n/a", "0g"));
    }

    #[test]
    fn test_no_zero() {
        assert!(!has_explicit_zero(" 10g", "protein 10g", ""));
        assert!(!has_explicit_zero("", "protein", ""));
    }

    #[test]
    fn test_insignificant_source() {
        assert!(has_insignificant_source(
            "dietary fiber",
            "Not a significant source of dietary fiber"
        ));
        assert!(has_insignificant_source("sugars - insignificant source", ""));
        assert!(!has_insignificant_source("sugars", "protein 2g"));
    }
}
