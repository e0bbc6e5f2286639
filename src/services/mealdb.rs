use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{
    AreaEntry, CategoriesResponse, IngredientEntry, MealCategory, MealDbResponse, RawMeal,
};
use crate::services::cache::{CacheKey, RecipeCache};
use crate::services::source::{RecipeSource, SourceError};

/// TheMealDB API client
///
/// Handles all communication with TheMealDB including:
/// - Listing recipes by category, area and main ingredient
/// - Searching recipes by name and by first letter
/// - Looking up full recipe records by id
/// - Reading the category, area and ingredient reference lists
///
/// Every successful response is written through the injected cache.
pub struct MealDbClient {
    base_url: String,
    client: Client,
    cache: Arc<dyn RecipeCache>,
    cache_ttl: Duration,
}

impl MealDbClient {
    /// Create a new TheMealDB client
    pub fn new(
        base_url: String,
        timeout: Duration,
        cache: Arc<dyn RecipeCache>,
        cache_ttl: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            cache,
            cache_ttl,
        })
    }

    /// Fetch `url`, serving the extracted value from cache when present
    async fn cached<T, B, F>(&self, key: String, url: String, extract: F) -> Result<T, SourceError>
    where
        T: Serialize + DeserializeOwned + Send,
        B: DeserializeOwned + Send,
        F: FnOnce(B) -> T + Send,
    {
        if let Some(json) = self.cache.get(&key).await {
            match serde_json::from_str::<T>(&json) {
                Ok(value) => {
                    tracing::debug!("Serving {} from cache", key);
                    return Ok(value);
                }
                Err(e) => tracing::warn!("Ignoring unreadable cache entry {}: {}", key, e),
            }
        }

        let value = extract(self.get_json::<B>(&url).await?);

        match serde_json::to_string(&value) {
            Ok(json) => self.cache.set(&key, json, self.cache_ttl).await,
            Err(e) => tracing::warn!("Failed to serialize {} for cache: {}", key, e),
        }

        Ok(value)
    }

    async fn cached_meals(&self, key: String, url: String) -> Result<Vec<RawMeal>, SourceError> {
        self.cached(key, url, |body: MealDbResponse| body.meals.unwrap_or_default())
            .await
    }

    async fn get_json<B: DeserializeOwned>(&self, url: &str) -> Result<B, SourceError> {
        tracing::debug!("Fetching from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("TheMealDB request to {} failed: {}", url, e);
            SourceError::Unavailable(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("TheMealDB returned {} for {}: {}", status, url, body);
            return Err(SourceError::ApiError(format!(
                "TheMealDB returned status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(format!("Failed to parse {}: {}", url, e)))
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<RawMeal>, SourceError> {
        let url = format!("{}/filter.php?c={}", self.base_url, urlencoding::encode(category));
        self.cached_meals(CacheKey::category(category), url).await
    }

    async fn fetch_by_area(&self, area: &str) -> Result<Vec<RawMeal>, SourceError> {
        let url = format!("{}/filter.php?a={}", self.base_url, urlencoding::encode(area));
        self.cached_meals(CacheKey::area(area), url).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RawMeal, SourceError> {
        let url = format!("{}/lookup.php?i={}", self.base_url, urlencoding::encode(id));
        self.cached_meals(CacheKey::lookup(id), url)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }

    async fn fetch_by_ingredient(&self, ingredient: &str) -> Result<Vec<RawMeal>, SourceError> {
        let url = format!("{}/filter.php?i={}", self.base_url, urlencoding::encode(ingredient));
        self.cached_meals(CacheKey::ingredient(ingredient), url).await
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<RawMeal>, SourceError> {
        let url = format!("{}/search.php?s={}", self.base_url, urlencoding::encode(query));
        self.cached_meals(CacheKey::search(query), url).await
    }

    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<RawMeal>, SourceError> {
        let letter = letter.to_string();
        let url = format!("{}/search.php?f={}", self.base_url, urlencoding::encode(&letter));
        self.cached_meals(CacheKey::first_letter(&letter), url).await
    }

    async fn list_categories(&self) -> Result<Vec<MealCategory>, SourceError> {
        let url = format!("{}/categories.php", self.base_url);
        self.cached(CacheKey::list("categories"), url, |body: CategoriesResponse| {
            body.categories.unwrap_or_default()
        })
        .await
    }

    async fn list_areas(&self) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/list.php?a=list", self.base_url);
        self.cached(CacheKey::list("areas"), url, |body: MealDbResponse<AreaEntry>| {
            body.meals.unwrap_or_default().into_iter().map(|a| a.name).collect()
        })
        .await
    }

    async fn list_ingredients(&self) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/list.php?i=list", self.base_url);
        self.cached(CacheKey::list("ingredients"), url, |body: MealDbResponse<IngredientEntry>| {
            body.meals.unwrap_or_default().into_iter().map(|i| i.name).collect()
        })
        .await
    }

    fn name(&self) -> &'static str {
        "themealdb"
    }
}
