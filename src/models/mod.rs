// Model exports
pub mod domain;
pub mod external;
pub mod requests;
pub mod responses;

pub use domain::{
    CompatibilityFilter, FoodAccess, Gender, HealthStats, Neighborhood, NutritionalInfo,
    Provenance, Recipe, RecipeFilters, ScoringWeights, SuitableFor, UserProfile,
};
pub use external::{
    AreaEntry, CategoriesResponse, IngredientEntry, MealCategory, MealDbResponse, RawMeal,
};
pub use requests::{RecommendRequest, RecommendationSource};
pub use responses::{ErrorResponse, HealthResponse, MealSummary, RecommendResponse};
