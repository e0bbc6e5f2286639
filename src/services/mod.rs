// Service exports
pub mod cache;
pub mod catalog;
pub mod mealdb;
pub mod source;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats, NoopCache, RecipeCache};
pub use catalog::{Catalog, CatalogError};
pub use mealdb::MealDbClient;
pub use source::{RecipeSource, SourceError};
