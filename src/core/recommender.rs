use futures::future::try_join_all;
use std::sync::Arc;
use thiserror::Error;

use crate::core::{
    filters::{apply_filters, filter_compatible},
    normalize::{dedup_by_id, to_recipe},
    scoring::score_recipes,
};
use crate::models::{
    CompatibilityFilter, Neighborhood, RawMeal, Recipe, RecipeFilters, RecommendationSource,
    ScoringWeights, UserProfile,
};
use crate::services::{Catalog, RecipeSource, SourceError};

/// Errors that can occur while computing recommendations
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Failed to load recommendations: {0}")]
    Source(#[from] SourceError),
}

/// Result of one recommendation computation
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub recipes: Vec<Recipe>,
    pub neighborhood: Option<Neighborhood>,
    /// Candidates that reached the scorer, before UI filters and the limit
    pub total_candidates: usize,
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Candidate selection (curated catalog, or retrieval from the recipe source
///    followed by the compatibility filter)
/// 2. Scoring and ranking against the profile and neighborhood
/// 3. UI filters
/// 4. Limit
pub struct Recommender {
    catalog: Arc<Catalog>,
    source: Arc<dyn RecipeSource>,
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, source: Arc<dyn RecipeSource>, weights: ScoringWeights) -> Self {
        Self {
            catalog,
            source,
            weights,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// External source the recommender retrieves from
    pub fn source(&self) -> &dyn RecipeSource {
        self.source.as_ref()
    }

    /// Resolve the neighborhood for a profile's zip code
    pub fn neighborhood_for(&self, profile: Option<&UserProfile>) -> Option<Neighborhood> {
        profile
            .and_then(|p| self.catalog.neighborhood_by_zip(&p.zip_code))
            .cloned()
    }

    /// Compute recommendations for a profile
    ///
    /// # Arguments
    /// * `profile` - The user's profile; without one results are unscored
    /// * `filters` - UI filters applied to the ranked list
    /// * `source` - Where candidates come from
    /// * `limit` - Maximum number of recipes to return
    ///
    /// # Returns
    /// Ranked recipes, or a single error if any fetch failed
    pub async fn recommend(
        &self,
        profile: Option<&UserProfile>,
        filters: &RecipeFilters,
        source: RecommendationSource,
        limit: usize,
    ) -> Result<Recommendation, RecommendError> {
        let neighborhood = self.neighborhood_for(profile);

        let candidates = match (source, profile) {
            (RecommendationSource::Catalog, _) => self.catalog.recipes().to_vec(),
            (RecommendationSource::External, Some(profile)) => {
                self.assemble_candidates(profile, neighborhood.as_ref()).await?
            }
            (RecommendationSource::External, None) => {
                tracing::debug!("No profile given, external retrieval has nothing to query");
                Vec::new()
            }
        };

        Ok(self.rank(candidates, profile, neighborhood, filters, limit))
    }

    /// Score, filter and truncate a candidate set
    pub fn rank(
        &self,
        candidates: Vec<Recipe>,
        profile: Option<&UserProfile>,
        neighborhood: Option<Neighborhood>,
        filters: &RecipeFilters,
        limit: usize,
    ) -> Recommendation {
        let candidates = dedup_by_id(candidates, |r: &Recipe| r.id.as_str());
        let total_candidates = candidates.len();

        let ranked = score_recipes(candidates, profile, neighborhood.as_ref(), &self.weights);
        let mut recipes = apply_filters(ranked, filters);
        recipes.truncate(limit);

        tracing::debug!(
            "Ranked {} candidates, returning {} recipes",
            total_candidates,
            recipes.len()
        );

        Recommendation {
            recipes,
            neighborhood,
            total_candidates,
        }
    }

    /// Retrieve candidates for a profile from the recipe source
    ///
    /// Queries one category per dietary preference and one area per
    /// predominant neighborhood culture, then keeps the recipes compatible
    /// with the profile.
    pub async fn assemble_candidates(
        &self,
        profile: &UserProfile,
        neighborhood: Option<&Neighborhood>,
    ) -> Result<Vec<Recipe>, RecommendError> {
        let areas = neighborhood
            .map(|n| n.predominant_cultures.as_slice())
            .unwrap_or_default();

        self.assemble(
            &profile.dietary_preferences,
            areas,
            &CompatibilityFilter::from_profile(profile),
        )
        .await
    }

    /// Fetch, dedup, detail, map and screen candidates
    ///
    /// Batch fetches run one after another. Detail fetches run concurrently
    /// and the first failure aborts the whole assembly.
    pub async fn assemble(
        &self,
        categories: &[String],
        areas: &[String],
        constraints: &CompatibilityFilter,
    ) -> Result<Vec<Recipe>, RecommendError> {
        let mut summaries: Vec<RawMeal> = Vec::new();

        for category in categories {
            let batch = self.source.fetch_by_category(category).await?;
            tracing::debug!("Category {} returned {} meals", category, batch.len());
            summaries.extend(batch);
        }

        for area in areas {
            let batch = self.source.fetch_by_area(area).await?;
            tracing::debug!("Area {} returned {} meals", area, batch.len());
            summaries.extend(batch);
        }

        let fetched = summaries.len();
        let summaries = dedup_by_id(summaries, |m: &RawMeal| m.id.as_str());

        tracing::info!(
            "Fetching details for {} unique meals ({} before dedup) from {}",
            summaries.len(),
            fetched,
            self.source.name()
        );

        let details = try_join_all(
            summaries
                .iter()
                .map(|summary| self.source.fetch_by_id(&summary.id)),
        )
        .await
        .map_err(|e| {
            tracing::error!("Detail fetch failed, discarding batch: {}", e);
            e
        })?;

        let recipes: Vec<Recipe> = details.into_iter().map(to_recipe).collect();
        let compatible = filter_compatible(recipes, constraints);

        tracing::info!("{} compatible recipes assembled", compatible.len());

        Ok(compatible)
    }
}
