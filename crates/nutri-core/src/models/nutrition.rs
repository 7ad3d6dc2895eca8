//! Nutrition facts data models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Value reported for a nutrient that could not be resolved.
///
/// Deliberately not zero: "not found" and "confirmed zero" must stay
/// distinguishable in the flat output.
pub const UNRESOLVED_DEFAULT: f64 = 1.0;

/// A nutrient field read from a nutrition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    Protein,
    TotalFat,
    TotalCarbohydrate,
    DietaryFiber,
    TotalSugars,
    Servings,
}

impl NutrientKey {
    /// All keys in output order.
    pub const ALL: [NutrientKey; 6] = [
        NutrientKey::Protein,
        NutrientKey::TotalFat,
        NutrientKey::TotalCarbohydrate,
        NutrientKey::DietaryFiber,
        NutrientKey::TotalSugars,
        NutrientKey::Servings,
    ];

    /// Snake-case name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::Protein => "protein",
            NutrientKey::TotalFat => "total_fat",
            NutrientKey::TotalCarbohydrate => "total_carbohydrate",
            NutrientKey::DietaryFiber => "dietary_fiber",
            NutrientKey::TotalSugars => "total_sugars",
            NutrientKey::Servings => "servings",
        }
    }

    /// Whether the value is printed on the label in grams.
    pub fn is_gram_denominated(&self) -> bool {
        !matches!(self, NutrientKey::Servings)
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NutrientKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NutrientKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Outcome of resolving one nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// A number was read for the nutrient.
    Resolved(f64),
    /// The label states the nutrient is zero or insignificant.
    ConfirmedZero,
    /// Nothing usable was found.
    Unknown,
}

impl Resolution {
    /// Collapse to a flat value, using `default` for [`Resolution::Unknown`].
    pub fn value(&self, default: f64) -> f64 {
        match self {
            Resolution::Resolved(v) => *v,
            Resolution::ConfirmedZero => 0.0,
            Resolution::Unknown => default,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Resolution::Unknown)
    }
}

/// Extracted nutrition facts, one value per [`NutrientKey`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub protein: f64,
    pub total_fat: f64,
    pub total_carbohydrate: f64,
    pub dietary_fiber: f64,
    pub total_sugars: f64,
    pub servings: f64,
}

impl Default for NutritionFacts {
    fn default() -> Self {
        Self::filled(UNRESOLVED_DEFAULT)
    }
}

impl NutritionFacts {
    /// Facts with every field set to `value`.
    pub fn filled(value: f64) -> Self {
        Self {
            protein: value,
            total_fat: value,
            total_carbohydrate: value,
            dietary_fiber: value,
            total_sugars: value,
            servings: value,
        }
    }

    pub fn get(&self, key: NutrientKey) -> f64 {
        match key {
            NutrientKey::Protein => self.protein,
            NutrientKey::TotalFat => self.total_fat,
            NutrientKey::TotalCarbohydrate => self.total_carbohydrate,
            NutrientKey::DietaryFiber => self.dietary_fiber,
            NutrientKey::TotalSugars => self.total_sugars,
            NutrientKey::Servings => self.servings,
        }
    }

    pub fn set(&mut self, key: NutrientKey, value: f64) {
        let slot = match key {
            NutrientKey::Protein => &mut self.protein,
            NutrientKey::TotalFat => &mut self.total_fat,
            NutrientKey::TotalCarbohydrate => &mut self.total_carbohydrate,
            NutrientKey::DietaryFiber => &mut self.dietary_fiber,
            NutrientKey::TotalSugars => &mut self.total_sugars,
            NutrientKey::Servings => &mut self.servings,
        };
        *slot = value;
    }

    /// Iterate `(key, value)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        NutrientKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// String-keyed map of all six values.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect()
    }
}

/// Detailed parse outcome, used for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Flat facts as returned by the parser.
    pub facts: NutritionFacts,
    /// Per-key outcome before collapsing to floats.
    pub resolutions: BTreeMap<NutrientKey, Resolution>,
    /// Notes on keyword hits, fallbacks and corrections.
    pub notes: Vec<String>,
}

impl ParseReport {
    /// Report for text with nothing to parse.
    pub fn unresolved(default: f64) -> Self {
        Self {
            facts: NutritionFacts::filled(default),
            resolutions: NutrientKey::ALL
                .into_iter()
                .map(|key| (key, Resolution::Unknown))
                .collect(),
            notes: Vec::new(),
        }
    }

    pub fn resolution(&self, key: NutrientKey) -> Resolution {
        self.resolutions
            .get(&key)
            .copied()
            .unwrap_or(Resolution::Unknown)
    }
}
