mod facet;
mod recipe;

pub use facet::{
    normalize_text, FacetCategory, FacetValue, Normalization, Tag, UnknownCategory,
};
pub use recipe::{Corpus, Ingredient, Recipe};
