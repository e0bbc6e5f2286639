use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MealCategory, RawMeal};

/// Errors that can occur when talking to an external recipe source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Recipe source unavailable: {0}")]
    Unavailable(String),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Recipe not found: {0}")]
    NotFound(String),
}

/// External recipe catalog
///
/// Implementations report every failure as a single error; there is no
/// partial-success signaling.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Summaries of recipes tagged with a category (e.g. "Vegetarian")
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<RawMeal>, SourceError>;

    /// Summaries of recipes from a culinary area (e.g. "Mexican")
    async fn fetch_by_area(&self, area: &str) -> Result<Vec<RawMeal>, SourceError>;

    /// Full record for one recipe
    async fn fetch_by_id(&self, id: &str) -> Result<RawMeal, SourceError>;

    /// Summaries of recipes using a main ingredient (e.g. "chicken_breast")
    async fn fetch_by_ingredient(&self, ingredient: &str) -> Result<Vec<RawMeal>, SourceError>;

    /// Full records whose name contains `query`
    async fn search_by_name(&self, query: &str) -> Result<Vec<RawMeal>, SourceError>;

    /// Full records whose name starts with `letter`
    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<RawMeal>, SourceError>;

    /// Every recipe category the source knows
    async fn list_categories(&self) -> Result<Vec<MealCategory>, SourceError>;

    /// Every culinary area name
    async fn list_areas(&self) -> Result<Vec<String>, SourceError>;

    /// Every ingredient name
    async fn list_ingredients(&self) -> Result<Vec<String>, SourceError>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}
