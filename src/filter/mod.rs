//! The filter engine.
//!
//! A [`FilterEngine`] owns one user's [`SelectionState`] over a shared,
//! read-only [`Corpus`]. Every mutation recomputes the visible recipes from
//! scratch and re-derives the facet dropdowns from them, so the dropdowns
//! never offer a value that would empty the result on its own.
//!
//! Tags and free text compose with AND. A single tag may be satisfied by any
//! of the recipe's ingredients, appliance, utensils, name or description. Free
//! text only ever looks at the recipe name.

use crate::config::EngineOptions;
use crate::facets::extract_facets;
use crate::model::{
    normalize_text, Corpus, FacetCategory, FacetValue, Normalization, Recipe, Tag,
};
use tracing::debug;

mod model;

pub use model::{FilterResult, SelectionOutcome, SelectionState};

#[derive(Debug, Clone)]
pub struct FilterEngine {
    corpus: Corpus,
    options: EngineOptions,
    state: SelectionState,
}

impl FilterEngine {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_options(corpus, EngineOptions::default())
    }

    pub fn with_options(corpus: Corpus, options: EngineOptions) -> Self {
        FilterEngine {
            corpus,
            options,
            state: SelectionState::default(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Select a facet value. Selecting an already active value changes nothing.
    ///
    /// Values that no recipe carries are accepted and simply match nothing;
    /// blank values are ignored.
    pub fn add_tag(&mut self, category: FacetCategory, value: &str) -> FilterResult {
        let tag = Tag::new(category, value, self.options.normalization);
        self.insert_tag(tag);
        self.result()
    }

    /// Deselect a facet value, if it was selected.
    pub fn remove_tag(&mut self, category: FacetCategory, value: &str) -> FilterResult {
        let tag = Tag::new(category, value, self.options.normalization);
        if self.state.active_tags.remove(&tag) {
            debug!("Removed tag {}", tag);
        }
        self.result()
    }

    /// Chip click: deselect the value when it is active, select it otherwise.
    pub fn toggle_tag(&mut self, category: FacetCategory, value: &str) -> FilterResult {
        let tag = Tag::new(category, value, self.options.normalization);
        if self.state.active_tags.contains(&tag) {
            self.remove_tag(category, value)
        } else {
            self.insert_tag(tag);
            self.result()
        }
    }

    /// Replace the free-text query.
    ///
    /// Queries shorter than `min_query_chars` after trimming are stored as empty
    /// and do not filter anything.
    pub fn set_free_text(&mut self, text: &str) -> FilterResult {
        let text = normalize_text(text);
        self.state.free_text = if text.chars().count() < self.options.min_query_chars {
            String::new()
        } else {
            text
        };
        debug!("Free text set to {:?}", self.state.free_text);
        self.result()
    }

    /// Drop every tag and the query.
    pub fn clear(&mut self) -> FilterResult {
        self.state = SelectionState::default();
        debug!("Selection cleared");
        self.result()
    }

    /// Dropdown search box: select the first offered value of `category` that
    /// contains `term` and is not already active.
    ///
    /// Terms shorter than `min_query_chars` as typed (before any plural
    /// stripping) select nothing.
    pub fn select_first_match(
        &mut self,
        category: FacetCategory,
        term: &str,
    ) -> SelectionOutcome {
        let selected = if normalize_text(term).chars().count() < self.options.min_query_chars {
            None
        } else {
            let current = self.result();
            let found = current
                .facets
                .matching(category, term, self.options.normalization)
                .find(|value| !self.state.is_active(category, value))
                .cloned();
            found
        };

        if let Some(value) = &selected {
            self.insert_tag(Tag {
                category,
                value: value.clone(),
            });
        }

        SelectionOutcome {
            selected,
            result: self.result(),
        }
    }

    /// Whether `recipe` passes the current selection.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        matches_free_text(recipe, &self.state.free_text)
            && self.state.active_tags.iter().all(|tag| {
                matches_tag(recipe, tag.category, &tag.value, self.options.normalization)
            })
    }

    /// Recompute the visible recipes and their facets for the current state.
    pub fn result(&self) -> FilterResult {
        let visible_recipes: Vec<_> = self
            .corpus
            .iter()
            .filter(|recipe| self.matches(recipe))
            .cloned()
            .collect();
        let facets = extract_facets(&visible_recipes, self.options.normalization);

        debug!(
            "{} of {} recipes visible ({} tags, query {:?})",
            visible_recipes.len(),
            self.corpus.len(),
            self.state.active_tags.len(),
            self.state.free_text
        );

        FilterResult {
            visible_recipes,
            facets,
        }
    }

    fn insert_tag(&mut self, tag: Tag) {
        if tag.value.is_empty() {
            return;
        }
        debug!("Adding tag {}", tag);
        self.state.active_tags.insert(tag);
    }
}

/// Whether a selected facet value is satisfied by `recipe`.
///
/// Ingredients and utensils match when a normalized entry contains `value`;
/// the appliance must be equal to it. Independently of the category, the
/// value also matches when it occurs in the recipe's name or description.
pub fn matches_tag(
    recipe: &Recipe,
    category: FacetCategory,
    value: &FacetValue,
    normalization: Normalization,
) -> bool {
    let value = value.as_str();
    let in_category = match category {
        FacetCategory::Ingredient => recipe
            .ingredient_names()
            .any(|name| normalization.apply(name).contains(value)),
        FacetCategory::Appliance => normalization.apply(&recipe.appliance) == value,
        FacetCategory::Utensil => recipe
            .utensils
            .iter()
            .any(|utensil| normalization.apply(utensil).contains(value)),
    };

    in_category
        || normalize_text(&recipe.name).contains(value)
        || normalize_text(&recipe.description).contains(value)
}

/// Whether `recipe`'s name contains the normalized query. An empty query
/// matches everything.
pub fn matches_free_text(recipe: &Recipe, text: &str) -> bool {
    text.is_empty() || normalize_text(&recipe.name).contains(text)
}
