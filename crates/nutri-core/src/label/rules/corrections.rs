//! Corrections for OCR digit errors in gram values.
//!
//! Both corrections only fire when the whole trimmed segment that produced the
//! value is exactly the integer rendering of the value, i.e. the unit letter
//! was lost or misread and nothing else was printed next to the number.

use crate::models::nutrition::NutrientKey;

/// A correction applied to a parsed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// Spurious trailing zero removed ("3g" read as "30").
    DecimalShift { from: f64, to: f64 },
    /// Trailing "9" dropped ("5g" read as "59").
    TrailingNine { from: f64, to: f64 },
}

fn integer_rendering(value: f64) -> String {
    format!("{}", value.trunc())
}

/// Divide by ten when a carbohydrate-family value of at least 10 was read
/// from a bare number ending in `0`.
pub fn decimal_shift(key: NutrientKey, value: f64, source: &str) -> Option<f64> {
    let applies = matches!(
        key,
        NutrientKey::TotalCarbohydrate | NutrientKey::DietaryFiber | NutrientKey::TotalSugars
    );
    if !applies || value < 10.0 {
        return None;
    }

    let rendered = integer_rendering(value);
    (source == rendered && rendered.ends_with('0')).then(|| value / 10.0)
}

/// Drop a trailing `9` read from a bare multi-digit gram value.
///
/// No magnitude guard: "19" becomes 1 and "99" becomes 9. A lone "9" is kept.
pub fn trailing_nine(key: NutrientKey, value: f64, source: &str) -> Option<f64> {
    if !key.is_gram_denominated() {
        return None;
    }

    let rendered = integer_rendering(value);
    if source != rendered || source.len() < 2 || !source.ends_with('9') {
        return None;
    }

    source[..source.len() - 1].parse::<f64>().ok()
}

/// Apply both corrections in order; returns the final value and what fired.
pub fn apply_corrections(key: NutrientKey, value: f64, source: &str) -> (f64, Vec<Correction>) {
    let mut value = value;
    let mut applied = Vec::new();

    if let Some(to) = decimal_shift(key, value, source) {
        applied.push(Correction::DecimalShift { from: value, to });
        value = to;
    }

    if let Some(to) = trailing_nine(key, value, source) {
        applied.push(Correction::TrailingNine { from: value, to });
        value = to;
    }

    (value, applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_shift() {
        assert_eq!(decimal_shift(NutrientKey::TotalCarbohydrate, 30.0, "30"), Some(3.0));
        assert_eq!(decimal_shift(NutrientKey::DietaryFiber, 100.0, "100"), Some(10.0));
    }

    #[test]
    fn test_decimal_shift_guards() {
        // Unit printed, so the value is genuine
        assert_eq!(decimal_shift(NutrientKey::TotalCarbohydrate, 30.0, "30g"), None);
        // Does not end in zero
        assert_eq!(decimal_shift(NutrientKey::TotalSugars, 32.0, "32"), None);
        // Below the magnitude guard
        assert_eq!(decimal_shift(NutrientKey::TotalSugars, 0.0, "0"), None);
        // Not a carbohydrate-family key
        assert_eq!(decimal_shift(NutrientKey::Protein, 30.0, "30"), None);
        assert_eq!(decimal_shift(NutrientKey::TotalFat, 20.0, "20"), None);
    }

    #[test]
    fn test_trailing_nine() {
        assert_eq!(trailing_nine(NutrientKey::Protein, 59.0, "59"), Some(5.0));
        assert_eq!(trailing_nine(NutrientKey::TotalFat, 129.0, "129"), Some(12.0));
        assert_eq!(trailing_nine(NutrientKey::TotalSugars, 99.0, "99"), Some(9.0));
    }

    #[test]
    fn test_trailing_nine_boundaries() {
        // A lone nine has nothing left once the 9 is dropped
        assert_eq!(trailing_nine(NutrientKey::Protein, 9.0, "9"), None);
        assert_eq!(trailing_nine(NutrientKey::Protein, 59.0, "59g"), None);
        assert_eq!(trailing_nine(NutrientKey::Protein, 5.9, "5.9"), None);
        assert_eq!(trailing_nine(NutrientKey::Servings, 19.0, "19"), None);
    }

    #[test]
    fn test_apply_corrections_in_order() {
        let (value, applied) = apply_corrections(NutrientKey::TotalCarbohydrate, 90.0, "90");
        assert_eq!(value, 9.0);
        assert_eq!(applied, vec![Correction::DecimalShift { from: 90.0, to: 9.0 }]);

        let (value, applied) = apply_corrections(NutrientKey::Protein, 5.0, "5g");
        assert_eq!(value, 5.0);
        assert!(applied.is_empty());
    }
}
