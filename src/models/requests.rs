use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{RecipeFilters, UserProfile};

/// Where recommendation candidates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// The curated in-memory catalog
    #[default]
    Catalog,
    /// Profile-driven retrieval from the external recipe source
    External,
}

/// Request to compute recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub filters: RecipeFilters,
    #[serde(default)]
    pub source: RecommendationSource,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}
