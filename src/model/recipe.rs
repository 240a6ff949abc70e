use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

/// A single ingredient line of a recipe card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient: String,
    #[serde(default, alias = "quantite", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, alias = "unite", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(ingredient: impl Into<String>) -> Self {
        Ingredient {
            ingredient: ingredient.into(),
            quantity: None,
            unit: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64, unit: Option<&str>) -> Self {
        self.quantity = Some(quantity);
        self.unit = unit.map(String::from);
        self
    }

    /// Returns the `"<quantity> <unit>"` text shown next to the ingredient.
    ///
    /// Missing parts are left out and whole quantities print without a fraction,
    /// so `2.0` grams reads `"2 grammes"` and an ingredient with neither part
    /// reads `""`.
    pub fn quantity_label(&self) -> String {
        let mut label = String::new();
        if let Some(quantity) = self.quantity {
            // f64's Display never prints a trailing ".0" or an exponent
            let _ = write!(label, "{}", quantity);
        }
        if let Some(unit) = self.unit.as_deref() {
            label.push(' ');
            label.push_str(unit);
        }
        label.trim().to_string()
    }
}

/// A recipe as it appears in the static corpus document.
///
/// Only `name` is required; every other field falls back to an empty value so a
/// partially filled dataset still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub appliance: String,
    #[serde(default, alias = "ustensils")]
    pub utensils: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    /// Preparation time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Recipe {
            id: None,
            name: name.into(),
            description: String::new(),
            appliance: String::new(),
            utensils: Vec::new(),
            ingredients: Vec::new(),
            image: String::new(),
            servings: None,
            time: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_appliance(mut self, appliance: impl Into<String>) -> Self {
        self.appliance = appliance.into();
        self
    }

    pub fn with_utensil(mut self, utensil: impl Into<String>) -> Self {
        self.utensils.push(utensil.into());
        self
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Raw ingredient names in card order.
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.ingredient.as_str())
    }
}

#[derive(Deserialize)]
struct CorpusDocument {
    #[serde(default)]
    recipe: Vec<Recipe>,
}

impl From<CorpusDocument> for Corpus {
    fn from(document: CorpusDocument) -> Self {
        Corpus::new(document.recipe)
    }
}

/// The full, read-only recipe collection.
///
/// Cloning a corpus is cheap: every clone shares the same recipes, which is how
/// several engines can browse one dataset at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "CorpusDocument")]
pub struct Corpus {
    recipes: Arc<[Arc<Recipe>]>,
}

impl Corpus {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Corpus {
            recipes: recipes.into_iter().map(Arc::new).collect(),
        }
    }

    pub(crate) fn from_shared(recipes: Vec<Arc<Recipe>>) -> Self {
        Corpus {
            recipes: recipes.into(),
        }
    }

    pub fn recipes(&self) -> &[Arc<Recipe>] {
        &self.recipes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Recipe>> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl From<Vec<Recipe>> for Corpus {
    fn from(recipes: Vec<Recipe>) -> Self {
        Corpus::new(recipes)
    }
}

impl FromIterator<Recipe> for Corpus {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        Corpus::new(iter.into_iter().collect())
    }
}
