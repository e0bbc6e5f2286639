// Integration tests for CultureBite

use culture_bite::core::{calculate_recommendation_score, RecommendError, Recommender};
use culture_bite::models::{RecipeFilters, RecommendationSource, ScoringWeights, UserProfile};
use culture_bite::services::{CacheManager, Catalog, MealDbClient, NoopCache, RecipeCache};
use mockito::{Matcher, Server, ServerGuard};
use std::sync::Arc;
use std::time::Duration;

fn create_test_profile(health: &[&str], diet: &[&str], zip: &str) -> UserProfile {
    let mut profile = UserProfile::new("user1");
    profile.health_conditions = health.iter().map(|s| s.to_string()).collect();
    profile.dietary_preferences = diet.iter().map(|s| s.to_string()).collect();
    profile.zip_code = zip.to_string();
    profile
}

fn create_recommender(server: &ServerGuard, cache: Arc<dyn RecipeCache>) -> Recommender {
    let client = MealDbClient::new(server.url(), Duration::from_secs(5), cache, Duration::from_secs(1800))
        .expect("client");
    Recommender::new(
        Arc::new(Catalog::embedded().expect("catalog")),
        Arc::new(client),
        ScoringWeights::default(),
    )
}

fn lookup_body(id: &str, name: &str, category: &str, area: &str, ingredients: &[&str]) -> String {
    let mut meal = serde_json::json!({
        "idMeal": id,
        "strMeal": name,
        "strCategory": category,
        "strArea": area,
        "strInstructions": "Prepare.\nCook.\nServe.",
        "strMealThumb": format!("https://img.test/{}.jpg", id),
    });
    for (i, ingredient) in ingredients.iter().enumerate() {
        meal[format!("strIngredient{}", i + 1)] = serde_json::json!(ingredient);
        meal[format!("strMeasure{}", i + 1)] = serde_json::json!("1 cup");
    }
    serde_json::json!({ "meals": [meal] }).to_string()
}

#[test]
fn test_cauliflower_bowl_scores_ten() {
    let catalog = Catalog::embedded().unwrap();
    let bowl = catalog.recipe_by_id("5").unwrap();
    let mut neighborhood = catalog.neighborhood_by_zip("10458").unwrap().clone();
    neighborhood.predominant_cultures = vec!["Mexican".to_string()];
    let profile = create_test_profile(&["diabetes"], &["low-carb"], "10458");

    let score = calculate_recommendation_score(bowl, &profile, Some(&neighborhood), &ScoringWeights::default());

    assert_eq!(score, 10.0);
}

#[tokio::test]
async fn test_external_pipeline_end_to_end() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "vegetarian".into()))
        .with_status(200)
        .with_body(r#"{"meals":[{"idMeal":"100","strMeal":"Dal"},{"idMeal":"200","strMeal":"Burger"}]}"#)
        .create_async()
        .await;
    for area in ["African American", "Latinx"] {
        server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("a".into(), area.into()))
            .with_status(200)
            .with_body(r#"{"meals":null}"#)
            .create_async()
            .await;
    }
    server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("a".into(), "Caribbean".into()))
        .with_status(200)
        .with_body(r#"{"meals":[{"idMeal":"100","strMeal":"Dal again"},{"idMeal":"300","strMeal":"Callaloo"}]}"#)
        .create_async()
        .await;

    let dal = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "100".into()))
        .with_status(200)
        .with_body(lookup_body("100", "Dal", "Vegetarian", "Indian", &["red lentils", "turmeric"]))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "200".into()))
        .with_status(200)
        .with_body(lookup_body("200", "Burger", "Beef", "American", &["beef mince", "bread buns"]))
        .create_async()
        .await;
    server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "300".into()))
        .with_status(200)
        .with_body(lookup_body("300", "Callaloo", "Vegetarian", "Caribbean", &["callaloo", "okra"]))
        .create_async()
        .await;

    let recommender = create_recommender(&server, Arc::new(NoopCache));
    // 11216 is Bedford-Stuyvesant: African American, Caribbean, Latinx
    let profile = create_test_profile(&[], &["vegetarian"], "11216");

    let result = recommender
        .recommend(Some(&profile), &RecipeFilters::default(), RecommendationSource::External, 10)
        .await
        .unwrap();

    dal.assert_async().await;
    let ids: Vec<&str> = result.recipes.iter().map(|r| r.id.as_str()).collect();
    // Burger is not vegetarian; Callaloo gets the culture bonus
    assert_eq!(ids, vec!["300", "100"]);
    assert_eq!(result.recipes[0].recommendation_score, Some(8.0));
    assert_eq!(result.recipes[1].recommendation_score, Some(6.5));
    assert_eq!(result.total_candidates, 2);
}

#[tokio::test]
async fn test_fetch_failure_yields_error_not_partial_result() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "vegan".into()))
        .with_status(200)
        .with_body(r#"{"meals":[{"idMeal":"1","strMeal":"Salad"}]}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "low-carb".into()))
        .with_status(500)
        .create_async()
        .await;

    let recommender = create_recommender(&server, Arc::new(NoopCache));
    let profile = create_test_profile(&[], &["vegan", "low-carb"], "");

    let result = recommender
        .recommend(Some(&profile), &RecipeFilters::default(), RecommendationSource::External, 10)
        .await;

    assert!(matches!(result, Err(RecommendError::Source(_))));
}

#[tokio::test]
async fn test_cached_results_match_uncached() {
    let mut server = Server::new_async().await;

    let listing = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "vegan".into()))
        .with_status(200)
        .with_body(r#"{"meals":[{"idMeal":"1","strMeal":"Salad"}]}"#)
        .expect(1)
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "1".into()))
        .with_status(200)
        .with_body(lookup_body("1", "Salad", "Vegan", "Greek", &["cucumber", "tomato"]))
        .expect(1)
        .create_async()
        .await;

    let recommender = create_recommender(&server, Arc::new(CacheManager::in_memory(100)));
    let profile = create_test_profile(&[], &["vegan"], "");

    let first = recommender
        .recommend(Some(&profile), &RecipeFilters::default(), RecommendationSource::External, 10)
        .await
        .unwrap();
    let second = recommender
        .recommend(Some(&profile), &RecipeFilters::default(), RecommendationSource::External, 10)
        .await
        .unwrap();

    listing.assert_async().await;
    detail.assert_async().await;
    assert_eq!(first.recipes, second.recipes);
    assert_eq!(first.recipes.len(), 1);
}

#[tokio::test]
async fn test_catalog_filters_after_ranking() {
    let server = Server::new_async().await;
    let recommender = create_recommender(&server, Arc::new(NoopCache));
    let profile = create_test_profile(&["high blood pressure"], &["low-sodium"], "11216");

    let filters = RecipeFilters {
        cuisine_types: vec!["Chinese".to_string(), "Soul Food".to_string()],
        ..Default::default()
    };

    let result = recommender
        .recommend(Some(&profile), &filters, RecommendationSource::Catalog, 10)
        .await
        .unwrap();

    let ids: Vec<&str> = result.recipes.iter().map(|r| r.id.as_str()).collect();
    // Collard greens: 5 + 2 + 1.5 culture = 8.5; stir-fry: 5 + 2 + 1.5 = 8.5; ties keep input order
    assert_eq!(ids, vec!["3", "4"]);
    assert_eq!(result.total_candidates, 5);
}
