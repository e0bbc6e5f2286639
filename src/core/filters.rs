use crate::models::{CompatibilityFilter, Recipe, RecipeFilters};

/// Check a recipe against the UI filters
///
/// Every category is ANY-match and an empty category passes. Cuisine types
/// are compared by equality with the recipe's single cuisine type.
#[inline]
pub fn matches_filters(recipe: &Recipe, filters: &RecipeFilters) -> bool {
    // Cuisine type
    if !filters.cuisine_types.is_empty() && !filters.cuisine_types.contains(&recipe.cuisine_type) {
        return false;
    }

    // Dietary preferences
    if !any_match(&filters.dietary_preferences, &recipe.suitable_for.dietary_preferences) {
        return false;
    }

    // Health conditions
    if !any_match(&filters.health_conditions, &recipe.suitable_for.health_conditions) {
        return false;
    }

    // Prep time
    if let Some(max) = filters.max_prep_time {
        if recipe.prep_time_minutes > max {
            return false;
        }
    }

    true
}

/// Apply the UI filters to an already ranked list, preserving order
pub fn apply_filters(recipes: Vec<Recipe>, filters: &RecipeFilters) -> Vec<Recipe> {
    if filters.is_empty() {
        return recipes;
    }

    recipes
        .into_iter()
        .filter(|recipe| matches_filters(recipe, filters))
        .collect()
}

/// Check a retrieved recipe against hard compatibility constraints
///
/// Dietary preferences are ANY-match. Health conditions and religious
/// restrictions are ALL-match: the recipe must explicitly list every one.
#[inline]
pub fn is_compatible(recipe: &Recipe, constraints: &CompatibilityFilter) -> bool {
    let suitable = &recipe.suitable_for;

    if !any_match(&constraints.dietary_preferences, &suitable.dietary_preferences) {
        return false;
    }

    if !all_match(&constraints.health_conditions, &suitable.health_conditions) {
        return false;
    }

    if !all_match(&constraints.religious_restrictions, &suitable.religious_restrictions) {
        return false;
    }

    if !constraints.cuisine_types.is_empty()
        && !constraints.cuisine_types.contains(&recipe.cuisine_type)
    {
        return false;
    }

    if !constraints.cultural_origins.is_empty()
        && !constraints.cultural_origins.contains(&recipe.cultural_origin)
    {
        return false;
    }

    if let Some(max) = constraints.max_prep_time {
        if recipe.prep_time_minutes > max {
            return false;
        }
    }

    true
}

/// Keep only recipes compatible with the constraints, preserving order
pub fn filter_compatible(recipes: Vec<Recipe>, constraints: &CompatibilityFilter) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|recipe| is_compatible(recipe, constraints))
        .collect()
}

/// Set intersection is non-empty, or the wanted set is inactive
#[inline]
fn any_match(wanted: &[String], offered: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|tag| offered.contains(tag))
}

/// Offered is a superset of wanted
#[inline]
fn all_match(wanted: &[String], offered: &[String]) -> bool {
    wanted.iter().all(|tag| offered.contains(tag))
}
