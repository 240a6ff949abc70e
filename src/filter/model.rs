use crate::facets::Facets;
use crate::model::{FacetCategory, FacetValue, Recipe, Tag};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// What the user has selected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub(crate) active_tags: BTreeSet<Tag>,
    /// Normalized query, empty when below the minimum length
    pub(crate) free_text: String,
}

impl SelectionState {
    pub fn active_tags(&self) -> &BTreeSet<Tag> {
        &self.active_tags
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn is_active(&self, category: FacetCategory, value: &FacetValue) -> bool {
        self.active_tags
            .iter()
            .any(|tag| tag.category == category && &tag.value == value)
    }

    pub fn is_empty(&self) -> bool {
        self.active_tags.is_empty() && self.free_text.is_empty()
    }
}

/// The recipes left after filtering, together with the dropdown contents they
/// support.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterResult {
    pub visible_recipes: Vec<Arc<Recipe>>,
    pub facets: Facets,
}

impl FilterResult {
    pub fn count(&self) -> usize {
        self.visible_recipes.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.visible_recipes
            .iter()
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Result of picking a value from a dropdown's search box.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutcome {
    /// The value that was added, if any offered value matched
    pub selected: Option<FacetValue>,
    pub result: FilterResult,
}
