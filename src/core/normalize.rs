use std::collections::HashSet;

use crate::models::{NutritionalInfo, Provenance, RawMeal, Recipe, SuitableFor};

const MEAT_KEYWORDS: &[&str] = &["beef", "chicken", "pork", "fish", "lamb"];
const ANIMAL_PRODUCT_KEYWORDS: &[&str] = &["egg", "milk", "cheese", "butter", "cream"];
const GLUTEN_KEYWORDS: &[&str] = &["flour", "bread", "pasta", "wheat"];
const SODIUM_KEYWORDS: &[&str] = &["salt", "soy sauce", "bouillon"];
const SUGAR_KEYWORDS: &[&str] = &["sugar", "honey", "syrup"];
const FAT_KEYWORDS: &[&str] = &["oil", "butter", "cream"];

const DESCRIPTION_CHARS: usize = 100;
const UNKNOWN: &str = "Unknown";

/// Keep the first record for each id, preserving input order
pub fn dedup_by_id<T, F>(items: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(id(item).to_string()))
        .collect()
}

/// Map a full TheMealDB record onto the canonical recipe shape
///
/// Never fails: missing fields fall back to empty or zero values. The
/// suitability tags are keyword guesses and are marked as inferred.
pub fn to_recipe(meal: RawMeal) -> Recipe {
    let ingredients: Vec<String> = meal
        .ingredients_and_measures()
        .into_iter()
        .map(|(ingredient, measure)| format!("{} {}", measure, ingredient).trim().to_string())
        .collect();

    let mut dietary_preferences = infer_dietary_preferences(&ingredients);
    if let Some(category) = non_blank(meal.category.as_deref()) {
        let tag = category.to_lowercase();
        if !dietary_preferences.contains(&tag) {
            dietary_preferences.push(tag);
        }
    }
    let health_conditions = infer_health_conditions(&ingredients);

    // Description is the raw instruction text cut at 100 characters, untrimmed
    let instructions_text = meal.instructions.unwrap_or_default();
    let description = if instructions_text.is_empty() {
        "No description available".to_string()
    } else {
        instructions_text.chars().take(DESCRIPTION_CHARS).collect()
    };
    let instructions = instructions_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Recipe {
        id: meal.id,
        name: meal.name,
        description,
        cuisine_type: non_blank(meal.category.as_deref()).unwrap_or(UNKNOWN).to_string(),
        cultural_origin: non_blank(meal.area.as_deref()).unwrap_or(UNKNOWN).to_string(),
        ingredients,
        instructions,
        nutritional_info: NutritionalInfo::default(),
        suitable_for: SuitableFor {
            health_conditions,
            dietary_preferences,
            religious_restrictions: Vec::new(),
            provenance: Provenance::Inferred,
        },
        prep_time_minutes: 0,
        cook_time_minutes: 0,
        image_url: meal.thumbnail.unwrap_or_default(),
        rating: 0.0,
        recommendation_score: None,
    }
}

/// Dietary tags implied by the absence of meat, animal product and gluten keywords
pub fn infer_dietary_preferences(ingredients: &[String]) -> Vec<String> {
    let has_meat = mentions_any(ingredients, MEAT_KEYWORDS);
    let has_animal_product = mentions_any(ingredients, ANIMAL_PRODUCT_KEYWORDS);
    let has_gluten = mentions_any(ingredients, GLUTEN_KEYWORDS);

    let mut tags = Vec::new();
    if !has_meat {
        tags.push("vegetarian".to_string());
    }
    if !has_meat && !has_animal_product {
        tags.push("vegan".to_string());
    }
    if !has_gluten {
        tags.push("gluten-free".to_string());
    }
    tags
}

/// Health tags implied by the absence of sodium, sugar and fat keywords
pub fn infer_health_conditions(ingredients: &[String]) -> Vec<String> {
    let mut tags = Vec::new();
    if !mentions_any(ingredients, SODIUM_KEYWORDS) {
        tags.push("low-sodium".to_string());
    }
    if !mentions_any(ingredients, SUGAR_KEYWORDS) {
        tags.push("low-sugar".to_string());
    }
    if !mentions_any(ingredients, FAT_KEYWORDS) {
        tags.push("low-fat".to_string());
    }
    tags
}

/// Case-insensitive substring match of any keyword in any ingredient line
#[inline]
fn mentions_any(ingredients: &[String], keywords: &[&str]) -> bool {
    ingredients.iter().any(|line| {
        let line = line.to_lowercase();
        keywords.iter().any(|keyword| line.contains(keyword))
    })
}

#[inline]
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ingredients(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_plant_based_ingredients() {
        let tags = infer_dietary_preferences(&ingredients(&["2 cups Rice", "1 Onion"]));
        assert_eq!(tags, vec!["vegetarian", "vegan", "gluten-free"]);
    }

    #[test]
    fn test_dairy_is_vegetarian_not_vegan() {
        let tags = infer_dietary_preferences(&ingredients(&["100g Cheddar Cheese", "2 Eggs"]));
        assert_eq!(tags, vec!["vegetarian", "gluten-free"]);
    }

    #[test]
    fn test_meat_keyword_is_case_insensitive() {
        let tags = infer_dietary_preferences(&ingredients(&["1 lb CHICKEN thighs", "Bread"]));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_health_tags() {
        let tags = infer_health_conditions(&ingredients(&["2 tbsp Soy Sauce", "1 tsp Honey"]));
        assert_eq!(tags, vec!["low-fat"]);

        let tags = infer_health_conditions(&ingredients(&["1 tbsp Olive Oil"]));
        assert_eq!(tags, vec!["low-sodium", "low-sugar"]);
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let items = vec![("1", "first"), ("2", "other"), ("1", "second")];
        let deduped = dedup_by_id(items, |item| item.0);
        assert_eq!(deduped, vec![("1", "first"), ("2", "other")]);
    }

    #[test]
    fn test_to_recipe_full_record() {
        let meal: RawMeal = serde_json::from_value(json!({
            "idMeal": "53000",
            "strMeal": "Lentil Soup",
            "strCategory": "Vegetarian",
            "strArea": "Turkish",
            "strInstructions": "Rinse the lentils.\r\n\r\nSimmer for 30 minutes.",
            "strMealThumb": "https://example.test/lentil.jpg",
            "strIngredient1": "Red Lentils",
            "strMeasure1": "1 cup",
            "strIngredient2": "Salt",
            "strMeasure2": "",
        }))
        .unwrap();

        let recipe = to_recipe(meal);

        assert_eq!(recipe.id, "53000");
        assert_eq!(recipe.cuisine_type, "Vegetarian");
        assert_eq!(recipe.cultural_origin, "Turkish");
        assert_eq!(recipe.ingredients, vec!["1 cup Red Lentils", "Salt"]);
        assert_eq!(recipe.instructions, vec!["Rinse the lentils.", "Simmer for 30 minutes."]);
        assert_eq!(
            recipe.suitable_for.dietary_preferences,
            vec!["vegetarian", "vegan", "gluten-free"]
        );
        assert_eq!(recipe.suitable_for.health_conditions, vec!["low-sugar", "low-fat"]);
        assert_eq!(recipe.suitable_for.provenance, Provenance::Inferred);
        assert_eq!(recipe.image_url, "https://example.test/lentil.jpg");
    }

    #[test]
    fn test_to_recipe_missing_fields() {
        let meal: RawMeal = serde_json::from_value(json!({ "idMeal": "1" })).unwrap();

        let recipe = to_recipe(meal);

        assert_eq!(recipe.description, "No description available");
        assert_eq!(recipe.cuisine_type, "Unknown");
        assert_eq!(recipe.cultural_origin, "Unknown");
        assert!(recipe.instructions.is_empty());
        assert_eq!(recipe.nutritional_info, NutritionalInfo::default());
        assert_eq!(recipe.recommendation_score, None);
    }

    #[test]
    fn test_description_truncated_to_100_chars() {
        let long = "a".repeat(250);
        let meal: RawMeal =
            serde_json::from_value(json!({ "idMeal": "1", "strInstructions": long })).unwrap();

        let recipe = to_recipe(meal);

        assert_eq!(recipe.description.chars().count(), 100);
    }

    #[test]
    fn test_description_is_raw_instruction_prefix() {
        let text = format!("  Heat the oil.\r\n{}", "b".repeat(200));
        let meal: RawMeal =
            serde_json::from_value(json!({ "idMeal": "1", "strInstructions": text.clone() })).unwrap();

        let recipe = to_recipe(meal);

        let expected: String = text.chars().take(100).collect();
        assert_eq!(recipe.description, expected);
        assert!(recipe.description.starts_with("  Heat the oil.\r\n"));
        assert_eq!(recipe.instructions[0], "Heat the oil.");
    }

    #[test]
    fn test_description_counts_characters_not_bytes() {
        let text = "é".repeat(150);
        let meal: RawMeal =
            serde_json::from_value(json!({ "idMeal": "1", "strInstructions": text })).unwrap();

        let recipe = to_recipe(meal);

        assert_eq!(recipe.description, "é".repeat(100));
    }

    #[test]
    fn test_empty_instructions_have_placeholder_description() {
        let meal: RawMeal =
            serde_json::from_value(json!({ "idMeal": "1", "strInstructions": "" })).unwrap();

        assert_eq!(to_recipe(meal).description, "No description available");
    }
}
