use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::core::to_recipe;
use crate::models::{ErrorResponse, MealSummary, Recipe};
use crate::routes::AppState;
use crate::services::SourceError;

/// Query for `GET /recipes/search`. Exactly one of the two is required.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub letter: Option<String>,
}

enum Search {
    Name(String),
    FirstLetter(char),
}

impl SearchQuery {
    fn parse(self) -> Result<Search, String> {
        match (self.q, self.letter) {
            (Some(q), None) if !q.trim().is_empty() => Ok(Search::Name(q.trim().to_string())),
            (None, Some(letter)) => {
                let mut chars = letter.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Ok(Search::FirstLetter(c)),
                    _ => Err(format!("letter must be a single letter, got {:?}", letter)),
                }
            }
            (Some(_), Some(_)) => Err("Use either q or letter, not both".to_string()),
            _ => Err("A non-empty q or letter is required".to_string()),
        }
    }
}

/// Configure the external recipe browsing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/mealdb/categories", web::get().to(list_categories))
        .route("/mealdb/areas", web::get().to(list_areas))
        .route("/mealdb/ingredients", web::get().to(list_ingredients))
        .route("/recipes/search", web::get().to(search_recipes))
        .route("/recipes/by-ingredient/{ingredient}", web::get().to(recipes_by_ingredient))
        .route("/recipes/{id}", web::get().to(get_recipe));
}

fn source_error_response(e: &SourceError) -> HttpResponse {
    match e {
        SourceError::NotFound(id) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Recipe not found".to_string(),
            message: format!("No recipe with id {}", id),
            status_code: 404,
        }),
        _ => {
            tracing::error!("Recipe source request failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Recipe source unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

fn recipe_list(recipes: Vec<Recipe>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "count": recipes.len(),
        "recipes": recipes,
    }))
}

/// GET /api/v1/mealdb/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    match state.recommender.source().list_categories().await {
        Ok(categories) => HttpResponse::Ok().json(serde_json::json!({ "categories": categories })),
        Err(e) => source_error_response(&e),
    }
}

/// GET /api/v1/mealdb/areas
async fn list_areas(state: web::Data<AppState>) -> impl Responder {
    match state.recommender.source().list_areas().await {
        Ok(areas) => HttpResponse::Ok().json(serde_json::json!({ "areas": areas })),
        Err(e) => source_error_response(&e),
    }
}

/// GET /api/v1/mealdb/ingredients
async fn list_ingredients(state: web::Data<AppState>) -> impl Responder {
    match state.recommender.source().list_ingredients().await {
        Ok(ingredients) => HttpResponse::Ok().json(serde_json::json!({ "ingredients": ingredients })),
        Err(e) => source_error_response(&e),
    }
}

/// Search recipes by name or by first letter
///
/// GET /api/v1/recipes/search?q=jerk
/// GET /api/v1/recipes/search?letter=j
///
/// Both endpoints return full records, so results are mapped like any
/// other external recipe, with inferred tags.
async fn search_recipes(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let search = match query.into_inner().parse() {
        Ok(search) => search,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid search".to_string(),
                message,
                status_code: 400,
            });
        }
    };

    let source = state.recommender.source();
    let result = match search {
        Search::Name(q) => source.search_by_name(&q).await,
        Search::FirstLetter(letter) => source.search_by_first_letter(letter).await,
    };

    match result {
        Ok(meals) => recipe_list(meals.into_iter().map(to_recipe).collect()),
        Err(e) => source_error_response(&e),
    }
}

/// Summaries of recipes using a main ingredient
///
/// GET /api/v1/recipes/by-ingredient/{ingredient}
async fn recipes_by_ingredient(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let ingredient = path.into_inner();

    match state.recommender.source().fetch_by_ingredient(&ingredient).await {
        Ok(meals) => {
            let meals: Vec<MealSummary> = meals.into_iter().map(MealSummary::from).collect();
            HttpResponse::Ok().json(serde_json::json!({
                "count": meals.len(),
                "meals": meals,
            }))
        }
        Err(e) => source_error_response(&e),
    }
}

/// Full external recipe by id
///
/// GET /api/v1/recipes/{id}
async fn get_recipe(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.recommender.source().fetch_by_id(&path.into_inner()).await {
        Ok(meal) => HttpResponse::Ok().json(to_recipe(meal)),
        Err(e) => source_error_response(&e),
    }
}
