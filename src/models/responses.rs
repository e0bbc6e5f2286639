use serde::{Deserialize, Serialize};

use crate::models::domain::{Neighborhood, Recipe};
use crate::models::external::RawMeal;
use crate::models::requests::RecommendationSource;
use crate::services::CacheStats;

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub recipes: Vec<Recipe>,
    pub neighborhood: Option<Neighborhood>,
    pub total_candidates: usize,
    pub source: RecommendationSource,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Listing entry for endpoints that only return recipe summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

impl From<RawMeal> for MealSummary {
    fn from(meal: RawMeal) -> Self {
        Self {
            id: meal.id,
            name: meal.name,
            image_url: meal.thumbnail.unwrap_or_default(),
        }
    }
}
