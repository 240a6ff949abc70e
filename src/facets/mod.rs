//! Facet extraction.
//!
//! Derives the set of values each dropdown offers from a slice of recipes. The
//! filter engine calls this on the visible recipes after every change so the
//! dropdowns only ever offer values that still lead to a result.

use crate::model::{FacetCategory, FacetValue, Normalization, Recipe};
use std::ops::Deref;

mod model;

pub use model::Facets;

/// Collect the distinct, normalized values of every facet category.
///
/// Blank values are skipped, as are recipes without ingredients or utensils.
/// An empty input yields empty sets.
pub fn extract_facets<R>(recipes: &[R], normalization: Normalization) -> Facets
where
    R: Deref<Target = Recipe>,
{
    let mut facets = Facets::default();

    for recipe in recipes {
        for name in recipe.ingredient_names() {
            insert(&mut facets, FacetCategory::Ingredient, name, normalization);
        }
        insert(
            &mut facets,
            FacetCategory::Appliance,
            &recipe.appliance,
            normalization,
        );
        for utensil in &recipe.utensils {
            insert(&mut facets, FacetCategory::Utensil, utensil, normalization);
        }
    }

    facets
}

fn insert(facets: &mut Facets, category: FacetCategory, raw: &str, normalization: Normalization) {
    let value = FacetValue::new(raw, normalization);
    if !value.is_empty() {
        facets.get_mut(category).insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;
    use std::sync::Arc;

    fn values(facets: &Facets, category: FacetCategory) -> Vec<&str> {
        facets.get(category).iter().map(|v| v.as_str()).collect()
    }

    fn sample_recipes() -> Vec<Arc<Recipe>> {
        vec![
            Arc::new(
                Recipe::new("Tarte aux pommes")
                    .with_appliance("Four")
                    .with_ingredient(Ingredient::new("Pommes"))
                    .with_ingredient(Ingredient::new("Sucre"))
                    .with_utensil("Rouleau à pâtisserie")
                    .with_utensil("couteau"),
            ),
            Arc::new(
                Recipe::new("Compote")
                    .with_appliance(" Casserole ")
                    .with_ingredient(Ingredient::new("pomme"))
                    .with_ingredient(Ingredient::new("sucre "))
                    .with_utensil("Couteau"),
            ),
        ]
    }

    #[test]
    fn test_extract_deduplicates_and_sorts() {
        let facets = extract_facets(&sample_recipes(), Normalization::Exact);

        assert_eq!(
            values(&facets, FacetCategory::Ingredient),
            vec!["pomme", "pommes", "sucre"]
        );
        assert_eq!(
            values(&facets, FacetCategory::Appliance),
            vec!["casserole", "four"]
        );
        assert_eq!(
            values(&facets, FacetCategory::Utensil),
            vec!["couteau", "rouleau à pâtisserie"]
        );
    }

    #[test]
    fn test_extract_singular_merges_plurals() {
        let facets = extract_facets(&sample_recipes(), Normalization::Singular);
        assert_eq!(
            values(&facets, FacetCategory::Ingredient),
            vec!["pomme", "sucre"]
        );
    }

    #[test]
    fn test_extract_empty_corpus() {
        let facets = extract_facets::<Arc<Recipe>>(&[], Normalization::Exact);
        assert!(facets.is_empty());
    }

    #[test]
    fn test_extract_skips_empty_fields() {
        let recipes = vec![Arc::new(Recipe::new("Water"))];
        let facets = extract_facets(&recipes, Normalization::Exact);
        assert!(facets.is_empty());
    }

    #[test]
    fn test_sort_is_code_point_order() {
        let recipes = vec![Arc::new(
            Recipe::new("Mix")
                .with_ingredient(Ingredient::new("Épinards"))
                .with_ingredient(Ingredient::new("zeste"))
                .with_ingredient(Ingredient::new("ail")),
        )];
        let facets = extract_facets(&recipes, Normalization::Exact);
        assert_eq!(
            values(&facets, FacetCategory::Ingredient),
            vec!["ail", "zeste", "épinards"]
        );
    }

    #[test]
    fn test_matching_narrows_dropdown() {
        let facets = extract_facets(&sample_recipes(), Normalization::Exact);
        let matched: Vec<&str> = facets
            .matching(FacetCategory::Ingredient, "POM", Normalization::Exact)
            .map(|v| v.as_str())
            .collect();
        assert_eq!(matched, vec!["pomme", "pommes"]);
        assert_eq!(
            facets
                .matching(FacetCategory::Utensil, "", Normalization::Exact)
                .count(),
            2
        );
    }

    #[test]
    fn test_matching_folds_term_like_values() {
        let recipes = vec![Arc::new(
            Recipe::new("Salade")
                .with_ingredient(Ingredient::new("Tomates"))
                .with_ingredient(Ingredient::new("Concombre")),
        )];
        let facets = extract_facets(&recipes, Normalization::Singular);
        let matched: Vec<&str> = facets
            .matching(FacetCategory::Ingredient, "Tomates", Normalization::Singular)
            .map(|v| v.as_str())
            .collect();
        assert_eq!(matched, vec!["tomate"]);
    }
}
