use crate::model::{FacetCategory, FacetValue, Normalization};
use serde::Serialize;
use std::collections::BTreeSet;

/// The distinct values offered in each facet dropdown, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub ingredients: BTreeSet<FacetValue>,
    pub appliances: BTreeSet<FacetValue>,
    pub utensils: BTreeSet<FacetValue>,
}

impl Facets {
    pub fn get(&self, category: FacetCategory) -> &BTreeSet<FacetValue> {
        match category {
            FacetCategory::Ingredient => &self.ingredients,
            FacetCategory::Appliance => &self.appliances,
            FacetCategory::Utensil => &self.utensils,
        }
    }

    pub(crate) fn get_mut(&mut self, category: FacetCategory) -> &mut BTreeSet<FacetValue> {
        match category {
            FacetCategory::Ingredient => &mut self.ingredients,
            FacetCategory::Appliance => &mut self.appliances,
            FacetCategory::Utensil => &mut self.utensils,
        }
    }

    pub fn is_empty(&self) -> bool {
        FacetCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// Values of `category` containing `term`, in dropdown order.
    ///
    /// This is the list shown while the user types in a dropdown's search box.
    /// `term` is folded with the same `normalization` as the values; a blank
    /// term matches every value.
    pub fn matching<'a>(
        &'a self,
        category: FacetCategory,
        term: &str,
        normalization: Normalization,
    ) -> impl Iterator<Item = &'a FacetValue> + 'a {
        let term = normalization.apply(term);
        self.get(category)
            .iter()
            .filter(move |value| value.as_str().contains(term.as_str()))
    }
}
