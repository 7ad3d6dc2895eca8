//! Keyword table and keyword location.
//!
//! Terms are lowercase English and Spanish label wording plus OCR misreadings
//! seen in practice. Input lines must be lowercased before [`locate`].

use crate::models::nutrition::NutrientKey;

const PROTEIN: &[&str] = &["protein", "proteínas", "proteína"];

const TOTAL_FAT: &[&str] = &["total fat", "total fal", "fat", "grasa total", "grasa"];

const TOTAL_CARBOHYDRATE: &[&str] = &[
    "total carbohydrate",
    "carbohydrate",
    "carbohidrato total",
    "carbohidrato",
];

const DIETARY_FIBER: &[&str] = &[
    "dietary fiber",
    "fiber",
    "fibra dietética",
    "fibra",
    "diary tiber",
    "deary her",
];

const TOTAL_SUGARS_PRIMARY: &[&str] = &["total sugars", "azúcares totales"];

const TOTAL_SUGARS: &[&str] = &["total sugars", "azúcares totales", "sugars", "azúcares"];

const SERVINGS: &[&str] = &["servings per container", "raciones por envase"];

/// How to look up a nutrient's keyword in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordSearch {
    /// First line containing any of the terms.
    Simple(&'static [&'static str]),
    /// Search `primary` over all lines first, then `fallback`. Used when a
    /// short term (e.g. "sugars") would otherwise shadow a more specific one
    /// appearing later in the text.
    PrimaryThenFallback {
        primary: &'static [&'static str],
        fallback: &'static [&'static str],
    },
}

/// Search strategy for a nutrient.
pub fn keyword_search(key: NutrientKey) -> KeywordSearch {
    match key {
        NutrientKey::Protein => KeywordSearch::Simple(PROTEIN),
        NutrientKey::TotalFat => KeywordSearch::Simple(TOTAL_FAT),
        NutrientKey::TotalCarbohydrate => KeywordSearch::Simple(TOTAL_CARBOHYDRATE),
        NutrientKey::DietaryFiber => KeywordSearch::Simple(DIETARY_FIBER),
        NutrientKey::TotalSugars => KeywordSearch::PrimaryThenFallback {
            primary: TOTAL_SUGARS_PRIMARY,
            fallback: TOTAL_SUGARS,
        },
        NutrientKey::Servings => KeywordSearch::Simple(SERVINGS),
    }
}

/// Where a keyword was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHit {
    /// Index into the line list.
    pub line: usize,
    /// The term that matched.
    pub term: &'static str,
}

impl KeywordHit {
    /// Text of `line` following the first occurrence of the matched term.
    pub fn segment_after<'a>(&self, line: &'a str) -> &'a str {
        line.find(self.term)
            .map(|start| &line[start + self.term.len()..])
            .unwrap_or("")
    }
}

/// Find the first line containing a keyword; within a line, earlier terms win.
pub fn locate(lines: &[&str], search: &KeywordSearch) -> Option<KeywordHit> {
    match search {
        KeywordSearch::Simple(terms) => scan(lines, terms),
        KeywordSearch::PrimaryThenFallback { primary, fallback } => {
            scan(lines, primary).or_else(|| scan(lines, fallback))
        }
    }
}

fn scan(lines: &[&str], terms: &[&'static str]) -> Option<KeywordHit> {
    lines.iter().enumerate().find_map(|(line, text)| {
        terms
            .iter()
            .find(|term| text.contains(**term))
            .map(|term| KeywordHit { line, term: *term })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_wins() {
        let lines = ["saturated fat 1g", "total fat 3g"];
        let hit = locate(&lines, &keyword_search(NutrientKey::TotalFat)).unwrap();
        assert_eq!(hit, KeywordHit { line: 0, term: "fat" });
    }

    #[test]
    fn test_list_order_within_line() {
        let lines = ["total fat 3g"];
        let hit = locate(&lines, &keyword_search(NutrientKey::TotalFat)).unwrap();
        assert_eq!(hit.term, "total fat");
    }

    #[test]
    fn test_total_sugars_primary_terms_first() {
        let lines = ["includes sugars 2g", "total sugars 5g"];
        let hit = locate(&lines, &keyword_search(NutrientKey::TotalSugars)).unwrap();
        assert_eq!(hit, KeywordHit { line: 1, term: "total sugars" });
    }

    #[test]
    fn test_total_sugars_fallback() {
        let lines = ["protein 1g", "azúcares 4g"];
        let hit = locate(&lines, &keyword_search(NutrientKey::TotalSugars)).unwrap();
        assert_eq!(hit, KeywordHit { line: 1, term: "azúcares" });
    }

    #[test]
    fn test_spanish_and_misread_terms() {
        let lines = ["proteínas 7g", "diary tiber 2g"];
        assert_eq!(
            locate(&lines, &keyword_search(NutrientKey::Protein)).map(|h| h.term),
            Some("proteínas")
        );
        assert_eq!(
            locate(&lines, &keyword_search(NutrientKey::DietaryFiber)).map(|h| h.line),
            Some(1)
        );
    }

    #[test]
    fn test_not_found() {
        let lines = ["calories 120"];
        assert_eq!(locate(&lines, &keyword_search(NutrientKey::Servings)), None);
        assert_eq!(locate(&[], &keyword_search(NutrientKey::Protein)), None);
    }

    #[test]
    fn test_segment_after() {
        let hit = KeywordHit { line: 0, term: "protein" };
        assert_eq!(hit.segment_after("protein 5g"), " 5g");
        assert_eq!(hit.segment_after("protein"), "");
        assert_eq!(hit.segment_after("fat 1g"), "");
    }
}
