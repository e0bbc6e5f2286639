//! CultureBite - culturally-aware healthy recipe recommendations
//!
//! This library provides the recommendation core used by the CultureBite app.
//! Recipes are screened against a user's health, dietary and religious
//! constraints, ranked by a weighted rule scorer and boosted when they match
//! the cultures of the user's neighborhood.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Recommendation, RecommendError, Recommender};
pub use models::{Neighborhood, Recipe, RecipeFilters, ScoringWeights, UserProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.base, 5.0);
        assert!(RecipeFilters::default().is_empty());
    }
}
