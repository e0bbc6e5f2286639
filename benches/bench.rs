// Criterion benchmarks for CultureBite

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use culture_bite::core::{apply_filters, filter_compatible, score_recipes, to_recipe};
use culture_bite::models::{
    CompatibilityFilter, Neighborhood, Provenance, RawMeal, Recipe, RecipeFilters,
    ScoringWeights, SuitableFor, UserProfile,
};
use culture_bite::services::Catalog;

const HEALTH: &[&str] = &["diabetes", "heart disease", "obesity", "high blood pressure"];
const DIET: &[&str] = &["vegetarian", "vegan", "low-carb", "gluten-free", "low-sodium"];
const ORIGINS: &[&str] = &["Mexican", "Caribbean", "Chinese", "African American", "Italian"];

fn create_recipe(id: usize) -> Recipe {
    let pick = |tags: &[&str], n: usize| -> Vec<String> {
        tags.iter()
            .enumerate()
            .filter(|(i, _)| (id + i) % n == 0)
            .map(|(_, t)| t.to_string())
            .collect()
    };

    Recipe {
        id: id.to_string(),
        name: format!("Recipe {}", id),
        description: String::new(),
        cuisine_type: ORIGINS[id % ORIGINS.len()].to_string(),
        cultural_origin: ORIGINS[id % ORIGINS.len()].to_string(),
        ingredients: vec![],
        instructions: vec![],
        nutritional_info: Default::default(),
        suitable_for: SuitableFor {
            health_conditions: pick(HEALTH, 2),
            dietary_preferences: pick(DIET, 3),
            religious_restrictions: if id % 2 == 0 { vec!["halal".to_string()] } else { vec![] },
            provenance: Provenance::Curated,
        },
        prep_time_minutes: (id % 60) as u32,
        cook_time_minutes: 20,
        image_url: String::new(),
        rating: 4.0,
        recommendation_score: None,
    }
}

fn create_profile() -> UserProfile {
    let mut profile = UserProfile::new("bench_user");
    profile.health_conditions = vec!["diabetes".to_string(), "high blood pressure".to_string()];
    profile.dietary_preferences = vec!["low-carb".to_string(), "vegetarian".to_string()];
    profile.religious_restrictions = vec!["halal".to_string()];
    profile
}

fn create_neighborhood() -> Neighborhood {
    Catalog::embedded()
        .ok()
        .and_then(|c| c.neighborhood_by_zip("10458").cloned())
        .expect("embedded catalog has Belmont")
}

fn bench_scoring(c: &mut Criterion) {
    let profile = create_profile();
    let neighborhood = create_neighborhood();
    let weights = ScoringWeights::default();

    let mut group = c.benchmark_group("scoring");

    for count in [10, 100, 1000].iter() {
        let recipes: Vec<Recipe> = (0..*count).map(create_recipe).collect();

        group.bench_with_input(BenchmarkId::new("score_recipes", count), count, |b, _| {
            b.iter(|| {
                score_recipes(
                    black_box(recipes.clone()),
                    black_box(Some(&profile)),
                    black_box(Some(&neighborhood)),
                    &weights,
                )
            });
        });
    }

    group.finish();
}

fn bench_filtering(c: &mut Criterion) {
    let profile = create_profile();
    let recipes: Vec<Recipe> = (0..500).map(create_recipe).collect();
    let constraints = CompatibilityFilter::from_profile(&profile);
    let filters = RecipeFilters {
        cuisine_types: vec!["Mexican".to_string(), "Chinese".to_string()],
        max_prep_time: Some(30),
        ..Default::default()
    };

    c.bench_function("filter_compatible_500_recipes", |b| {
        b.iter(|| filter_compatible(black_box(recipes.clone()), &constraints));
    });

    c.bench_function("apply_filters_500_recipes", |b| {
        b.iter(|| apply_filters(black_box(recipes.clone()), &filters));
    });
}

fn bench_mapping(c: &mut Criterion) {
    let mut meal = serde_json::json!({
        "idMeal": "52772",
        "strMeal": "Teriyaki Chicken Casserole",
        "strCategory": "Chicken",
        "strArea": "Japanese",
        "strInstructions": "Preheat oven to 350.\r\nCombine soy sauce, sugar and garlic.\r\nBake 35 minutes.",
    });
    for i in 1..=20 {
        meal[format!("strIngredient{}", i)] = serde_json::json!(format!("ingredient {}", i));
        meal[format!("strMeasure{}", i)] = serde_json::json!("1 tbsp");
    }
    let meal: RawMeal = serde_json::from_value(meal).expect("valid meal");

    c.bench_function("to_recipe_full_record", |b| {
        b.iter(|| to_recipe(black_box(meal.clone())));
    });
}

criterion_group!(benches, bench_scoring, bench_filtering, bench_mapping);
criterion_main!(benches);
