//! Catalog filtering

use super::food::{Food, FoodType};

/// Which food types to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoodTypeFilter {
    #[default]
    All,
    Only(FoodType),
}

impl FoodTypeFilter {
    pub fn matches(&self, food: &Food) -> bool {
        match self {
            FoodTypeFilter::All => true,
            FoodTypeFilter::Only(kind) => food.food_type() == *kind,
        }
    }

    /// Badge shown while a filter is active.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            FoodTypeFilter::All => None,
            FoodTypeFilter::Only(kind) => Some(kind.label()),
        }
    }
}

/// Type filter plus case-insensitive name search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub food_type: FoodTypeFilter,
    pub search: String,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_food_type(mut self, food_type: FoodTypeFilter) -> Self {
        self.food_type = food_type;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn matches(&self, food: &Food) -> bool {
        if !self.food_type.matches(food) {
            return false;
        }
        let needle = self.search.trim();
        if needle.is_empty() {
            return true;
        }
        food.name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    /// Foods matching the query, in catalog order.
    pub fn apply<'a>(&self, foods: &'a [Food]) -> Vec<&'a Food> {
        foods.iter().filter(|food| self.matches(food)).collect()
    }
}
