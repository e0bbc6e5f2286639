use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{Recommender, SessionStore, LOAD_FAILED_MESSAGE};
use crate::models::{ErrorResponse, HealthResponse, RecommendRequest, RecommendResponse};
use crate::services::CacheManager;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub cache: Arc<CacheManager>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>, cache: Arc<CacheManager>, sessions: SessionStore) -> Self {
        Self {
            recommender,
            cache,
            sessions,
        }
    }
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/recommendations/{profile_id}/latest", web::get().to(latest_recommendations))
        .route("/neighborhoods/{zip_code}", web::get().to(get_neighborhood))
        .route("/catalog/recipes", web::get().to(list_catalog_recipes));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.stats(),
    })
}

/// Compute recommendations
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "profile": { "id": "string", "healthConditions": [], "dietaryPreferences": [], "zipCode": "11216" },
///   "filters": { "cuisineTypes": [], "maxPrepTime": 30 },
///   "source": "catalog|external",
///   "limit": 20
/// }
/// ```
///
/// When a profile is given, the outcome is recorded in that profile's slot
/// unless a newer request for the same profile started in the meantime.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let profile_id = req.profile.as_ref().map(|p| p.id.clone());

    // The handle is kept for the whole request so completion lands in the
    // slot this request started, even if the store evicted it meanwhile
    let session = match &profile_id {
        Some(id) => {
            let slot = state.sessions.slot(id).await;
            let token = slot.lock().await.begin();
            Some((slot, token))
        }
        None => None,
    };

    tracing::info!(
        "Computing recommendations: profile={:?}, source={:?}, limit={}",
        profile_id,
        req.source,
        req.limit
    );

    let result = state
        .recommender
        .recommend(req.profile.as_ref(), &req.filters, req.source, req.limit as usize)
        .await;

    if let (Some(id), Some((slot, token))) = (&profile_id, session) {
        let outcome = result
            .as_ref()
            .map(|r| r.recipes.clone())
            .map_err(|e| e.to_string());
        let applied = slot.lock().await.complete(token, outcome);
        if !applied {
            tracing::debug!("Recommendation {} for {} superseded by a newer request", token, id);
        }
    }

    match result {
        Ok(recommendation) => {
            tracing::info!(
                "Returning {} recipes (from {} candidates)",
                recommendation.recipes.len(),
                recommendation.total_candidates
            );
            HttpResponse::Ok().json(RecommendResponse {
                recipes: recommendation.recipes,
                neighborhood: recommendation.neighborhood,
                total_candidates: recommendation.total_candidates,
                source: req.source,
            })
        }
        Err(e) => {
            tracing::error!("Failed to compute recommendations: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Recipe source unavailable".to_string(),
                message: LOAD_FAILED_MESSAGE.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Latest recommendation state for a profile
///
/// GET /api/v1/recommendations/{profileId}/latest
async fn latest_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let profile_id = path.into_inner();

    match state.sessions.get(&profile_id).await {
        Some(slot) => {
            let current = slot.lock().await;
            HttpResponse::Ok().json(serde_json::json!({
                "profileId": profile_id,
                "state": current.state(),
            }))
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "No recommendations".to_string(),
            message: format!("No recommendations computed for profile {}", profile_id),
            status_code: 404,
        }),
    }
}

/// Neighborhood lookup by zip code
///
/// GET /api/v1/neighborhoods/{zipCode}
async fn get_neighborhood(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let zip_code = path.into_inner();

    match state.recommender.catalog().neighborhood_by_zip(&zip_code) {
        Some(neighborhood) => HttpResponse::Ok().json(neighborhood),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Neighborhood not found".to_string(),
            message: format!("No neighborhood data for zip code {}", zip_code),
            status_code: 404,
        }),
    }
}

/// Curated catalog recipes
///
/// GET /api/v1/catalog/recipes
async fn list_catalog_recipes(state: web::Data<AppState>) -> impl Responder {
    let recipes = state.recommender.catalog().recipes();
    HttpResponse::Ok().json(serde_json::json!({
        "recipes": recipes,
        "count": recipes.len(),
    }))
}
