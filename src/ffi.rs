//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! The filter engine is wrapped in an object whose calls are serialized by a
//! mutex; results are flattened into plain records.

use crate::config::{ConfigError, EngineOptions};
use crate::corpus::{load_corpus, CorpusError};
use crate::facets::{extract_facets, Facets};
use crate::filter::{FilterEngine, FilterResult, SelectionOutcome};
use crate::model::{Corpus, FacetCategory, FacetValue, Ingredient, Recipe};
use camino::Utf8Path;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecipeFacetsError {
    #[error("Corpus not found: {message}")]
    NotFound { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },
}

impl From<CorpusError> for RecipeFacetsError {
    fn from(e: CorpusError) -> Self {
        match e {
            CorpusError::InvalidPath(p) => RecipeFacetsError::NotFound {
                message: p.to_string(),
            },
            CorpusError::NotADirectory(p) => RecipeFacetsError::NotFound { message: p },
            CorpusError::JsonError(e) => RecipeFacetsError::ParseError {
                message: e.to_string(),
            },
            e @ (CorpusError::IoError(_)
            | CorpusError::GlobError(_)
            | CorpusError::PatternError(_)) => RecipeFacetsError::IoError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for RecipeFacetsError {
    fn from(e: ConfigError) -> Self {
        RecipeFacetsError::ConfigError {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of an ingredient line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredient {
    pub ingredient: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    /// Quantity and unit as displayed on the card
    pub quantity_label: String,
}

impl From<&Ingredient> for FfiIngredient {
    fn from(i: &Ingredient) -> Self {
        FfiIngredient {
            ingredient: i.ingredient.clone(),
            quantity: i.quantity,
            unit: i.unit.clone(),
            quantity_label: i.quantity_label(),
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: Option<u32>,
    pub name: String,
    pub description: String,
    pub appliance: String,
    pub utensils: Vec<String>,
    pub ingredients: Vec<FfiIngredient>,
    pub image: String,
    pub servings: Option<u32>,
    pub time: Option<u32>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id,
            name: r.name.clone(),
            description: r.description.clone(),
            appliance: r.appliance.clone(),
            utensils: r.utensils.clone(),
            ingredients: r.ingredients.iter().map(FfiIngredient::from).collect(),
            image: r.image.clone(),
            servings: r.servings,
            time: r.time,
        }
    }
}

/// A dropdown entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFacetValue {
    /// Normalized value to pass back to `add_tag`
    pub value: String,
    /// Text to display
    pub label: String,
}

/// FFI-safe representation of the facet dropdowns, each sorted ascending.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFacets {
    pub ingredients: Vec<FfiFacetValue>,
    pub appliances: Vec<FfiFacetValue>,
    pub utensils: Vec<FfiFacetValue>,
}

fn facet_values(values: &BTreeSet<FacetValue>) -> Vec<FfiFacetValue> {
    values
        .iter()
        .map(|v| FfiFacetValue {
            value: v.to_string(),
            label: v.label(),
        })
        .collect()
}

impl From<&Facets> for FfiFacets {
    fn from(f: &Facets) -> Self {
        FfiFacets {
            ingredients: facet_values(&f.ingredients),
            appliances: facet_values(&f.appliances),
            utensils: facet_values(&f.utensils),
        }
    }
}

/// FFI-safe representation of a filter result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilterResult {
    pub visible_recipes: Vec<FfiRecipe>,
    pub facets: FfiFacets,
    /// Number of visible recipes
    pub count: u32,
}

impl From<FilterResult> for FfiFilterResult {
    fn from(r: FilterResult) -> Self {
        FfiFilterResult {
            visible_recipes: r
                .visible_recipes
                .iter()
                .map(|recipe| FfiRecipe::from(recipe.as_ref()))
                .collect(),
            facets: FfiFacets::from(&r.facets),
            count: u32::try_from(r.count()).unwrap_or(u32::MAX),
        }
    }
}

/// FFI-safe representation of a dropdown search selection.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSelectionOutcome {
    pub selected: Option<String>,
    pub result: FfiFilterResult,
}

impl From<SelectionOutcome> for FfiSelectionOutcome {
    fn from(o: SelectionOutcome) -> Self {
        FfiSelectionOutcome {
            selected: o.selected.map(FacetValue::into_string),
            result: o.result.into(),
        }
    }
}

/// An active facet chip.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTag {
    pub category: FacetCategory,
    pub value: String,
}

/// FFI-safe filter engine.
///
/// One instance holds one user's selection; create one engine per browsing
/// session.
#[derive(uniffi::Object)]
pub struct FfiFilterEngine {
    inner: Mutex<FilterEngine>,
}

#[uniffi::export]
impl FfiFilterEngine {
    /// Selects a facet value and returns the narrowed result.
    pub fn add_tag(&self, category: FacetCategory, value: String) -> FfiFilterResult {
        self.engine().add_tag(category, &value).into()
    }

    /// Deselects a facet value and returns the widened result.
    pub fn remove_tag(&self, category: FacetCategory, value: String) -> FfiFilterResult {
        self.engine().remove_tag(category, &value).into()
    }

    /// Selects the value, or deselects it when already active.
    pub fn toggle_tag(&self, category: FacetCategory, value: String) -> FfiFilterResult {
        self.engine().toggle_tag(category, &value).into()
    }

    /// Replaces the free-text query.
    pub fn set_free_text(&self, text: String) -> FfiFilterResult {
        self.engine().set_free_text(&text).into()
    }

    /// Selects the first offered value of `category` containing `term`.
    pub fn select_first_match(
        &self,
        category: FacetCategory,
        term: String,
    ) -> FfiSelectionOutcome {
        self.engine().select_first_match(category, &term).into()
    }

    /// Drops all tags and the query.
    pub fn clear(&self) -> FfiFilterResult {
        self.engine().clear().into()
    }

    /// Returns the result for the current selection.
    pub fn result(&self) -> FfiFilterResult {
        self.engine().result().into()
    }

    /// Returns the active chips in display order.
    pub fn active_tags(&self) -> Vec<FfiTag> {
        self.engine()
            .state()
            .active_tags()
            .iter()
            .map(|tag| FfiTag {
                category: tag.category,
                value: tag.value.to_string(),
            })
            .collect()
    }

    /// Returns the effective free-text query; empty when below the minimum length.
    pub fn free_text(&self) -> String {
        self.engine().state().free_text().to_string()
    }
}

impl FfiFilterEngine {
    fn new(engine: FilterEngine) -> Self {
        FfiFilterEngine {
            inner: Mutex::new(engine),
        }
    }

    fn engine(&self) -> MutexGuard<'_, FilterEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn options_from_yaml(options_yaml: Option<String>) -> Result<EngineOptions, RecipeFacetsError> {
    match options_yaml {
        Some(yaml) => Ok(EngineOptions::from_yaml_str(&yaml)?),
        None => Ok(EngineOptions::default()),
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Creates a filter engine over a corpus document.
///
/// # Arguments
/// * `json` - A `{"recipe": [...]}` document
/// * `options_yaml` - Optional engine options as YAML
#[uniffi::export]
pub fn engine_from_json(
    json: String,
    options_yaml: Option<String>,
) -> Result<Arc<FfiFilterEngine>, RecipeFacetsError> {
    let corpus = Corpus::from_json_str(&json)?;
    let options = options_from_yaml(options_yaml)?;
    Ok(Arc::new(FfiFilterEngine::new(FilterEngine::with_options(
        corpus, options,
    ))))
}

/// Creates a filter engine over the corpus document at `path`.
#[uniffi::export]
pub fn engine_from_path(
    path: String,
    options_yaml: Option<String>,
) -> Result<Arc<FfiFilterEngine>, RecipeFacetsError> {
    let corpus = load_corpus(Utf8Path::new(&path))?;
    let options = options_from_yaml(options_yaml)?;
    Ok(Arc::new(FfiFilterEngine::new(FilterEngine::with_options(
        corpus, options,
    ))))
}

/// Extracts the full dropdown contents of a corpus document.
#[uniffi::export]
pub fn facets_from_json(json: String) -> Result<FfiFacets, RecipeFacetsError> {
    let corpus = Corpus::from_json_str(&json)?;
    let facets = extract_facets(corpus.recipes(), EngineOptions::default().normalization);
    Ok(FfiFacets::from(&facets))
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    const CORPUS: &str = indoc! {r#"
        {
            "recipe": [
                {
                    "name": "Tarte aux pommes",
                    "appliance": "Oven",
                    "ingredients": [{"ingredient": "Apple", "quantity": 3}],
                    "ustensils": ["Knife"]
                },
                {
                    "name": "Soup",
                    "appliance": "Blender",
                    "ingredients": [{"ingredient": "Carrot", "quantity": 0.5, "unit": "kg"}],
                    "ustensils": ["Ladle"]
                }
            ]
        }"#};

    #[test]
    fn test_engine_from_json() {
        let engine = engine_from_json(CORPUS.to_string(), None).unwrap();
        let result = engine.add_tag(FacetCategory::Appliance, "Oven".to_string());

        assert_eq!(result.count, 1);
        assert_eq!(result.visible_recipes[0].name, "Tarte aux pommes");
        assert_eq!(result.visible_recipes[0].ingredients[0].quantity_label, "3");
        assert_eq!(result.facets.utensils[0].value, "knife");
        assert_eq!(result.facets.utensils[0].label, "Knife");

        let tags = engine.active_tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].category, FacetCategory::Appliance);
        assert_eq!(tags[0].value, "oven");

        assert_eq!(engine.clear().count, 2);
    }

    #[test]
    fn test_engine_free_text_and_selection() {
        let engine = engine_from_json(CORPUS.to_string(), None).unwrap();
        assert_eq!(engine.set_free_text("so".to_string()).count, 2);
        assert_eq!(engine.free_text(), "");
        assert_eq!(engine.set_free_text("Sou".to_string()).count, 1);

        engine.clear();
        let outcome = engine.select_first_match(FacetCategory::Ingredient, "carr".to_string());
        assert_eq!(outcome.selected, Some("carrot".to_string()));
        assert_eq!(outcome.result.visible_recipes[0].name, "Soup");
    }

    #[test]
    fn test_engine_with_options() {
        let engine = engine_from_json(
            CORPUS.to_string(),
            Some("min_query_chars: 2".to_string()),
        )
        .unwrap();
        assert_eq!(engine.set_free_text("so".to_string()).count, 1);

        let result = engine_from_json(
            CORPUS.to_string(),
            Some("min_query_chars: 0".to_string()),
        );
        assert!(matches!(result, Err(RecipeFacetsError::ConfigError { .. })));
    }

    #[test]
    fn test_engine_from_json_invalid() {
        let result = engine_from_json("[1, 2".to_string(), None);
        assert!(matches!(result, Err(RecipeFacetsError::ParseError { .. })));
    }

    #[test]
    fn test_engine_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recipes.json");
        fs::write(&path, CORPUS).unwrap();

        let engine = engine_from_path(path.to_str().unwrap().to_string(), None).unwrap();
        assert_eq!(engine.result().count, 2);

        let missing = engine_from_path("/nonexistent/recipes.json".to_string(), None);
        assert!(matches!(missing, Err(RecipeFacetsError::NotFound { .. })));
    }

    #[test]
    fn test_facets_from_json() {
        let facets = facets_from_json(CORPUS.to_string()).unwrap();
        let appliances: Vec<String> = facets.appliances.into_iter().map(|v| v.value).collect();
        assert_eq!(appliances, vec!["blender", "oven"]);
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
