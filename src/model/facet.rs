use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The recipe attribute a facet value is drawn from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum FacetCategory {
    Ingredient,
    Appliance,
    Utensil,
}

impl FacetCategory {
    pub const ALL: [FacetCategory; 3] = [
        FacetCategory::Ingredient,
        FacetCategory::Appliance,
        FacetCategory::Utensil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetCategory::Ingredient => "ingredient",
            FacetCategory::Appliance => "appliance",
            FacetCategory::Utensil => "utensil",
        }
    }
}

impl fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown facet category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for FacetCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingredient" | "ingredients" => Ok(FacetCategory::Ingredient),
            "appliance" | "appliances" => Ok(FacetCategory::Appliance),
            "utensil" | "utensils" | "ustensil" | "ustensils" => Ok(FacetCategory::Utensil),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// How raw facet strings are folded before comparison.
///
/// Every mode trims and lower-cases. `Singular` additionally drops one trailing
/// `s` so "Tomates" and "tomate" collapse to a single value. The mode is chosen
/// once per engine and applies to facet values, tag values and the recipe
/// fields they are matched against alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    #[default]
    Exact,
    Singular,
}

impl Normalization {
    pub fn apply(self, raw: &str) -> String {
        let normalized = normalize_text(raw);
        match self {
            Normalization::Exact => normalized,
            Normalization::Singular => strip_plural(normalized),
        }
    }
}

/// Trim and lower-case, independent of locale.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn strip_plural(mut value: String) -> String {
    // "ss" endings (cress, glass) are not plurals
    if value.len() > 1 && value.ends_with('s') && !value.ends_with("ss") {
        value.pop();
    }
    value
}

/// A normalized value within one facet category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetValue(String);

impl FacetValue {
    pub fn new(raw: &str, normalization: Normalization) -> Self {
        FacetValue(normalization.apply(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dropdown text: the value with its first character upper-cased.
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FacetValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FacetValue {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A selected facet chip.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub category: FacetCategory,
    pub value: FacetValue,
}

impl Tag {
    pub fn new(category: FacetCategory, value: &str, normalization: Normalization) -> Self {
        Tag {
            category,
            value: FacetValue::new(value, normalization),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_normalization() {
        assert_eq!(Normalization::Exact.apply("  Crème Fraîche "), "crème fraîche");
        assert_eq!(Normalization::Exact.apply("Tomates"), "tomates");
    }

    #[test]
    fn test_singular_normalization() {
        assert_eq!(Normalization::Singular.apply("Tomates "), "tomate");
        assert_eq!(Normalization::Singular.apply("Cress"), "cress");
        assert_eq!(Normalization::Singular.apply("s"), "s");
        assert_eq!(Normalization::Singular.apply("Ail"), "ail");
    }

    #[test]
    fn test_label_capitalizes_first_char() {
        let value = FacetValue::new("éplucheur", Normalization::Exact);
        assert_eq!(value.label(), "Éplucheur");
        assert_eq!(FacetValue::new("  ", Normalization::Exact).label(), "");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Ingredients".parse::<FacetCategory>().unwrap(),
            FacetCategory::Ingredient
        );
        assert_eq!(
            "ustensils".parse::<FacetCategory>().unwrap(),
            FacetCategory::Utensil
        );
        assert_eq!(
            "oven".parse::<FacetCategory>(),
            Err(UnknownCategory("oven".to_string()))
        );
    }

    #[test]
    fn test_tag_display() {
        let tag = Tag::new(FacetCategory::Appliance, "Oven", Normalization::Exact);
        assert_eq!(tag.to_string(), "appliance:oven");
    }
}
