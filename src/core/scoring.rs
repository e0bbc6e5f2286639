use crate::models::{Neighborhood, Recipe, ScoringWeights, UserProfile};

/// Calculate a recommendation score for a recipe against a user profile
///
/// Scoring formula:
/// score = base
///     + health_match * |user health ∩ recipe health|
///     + dietary_match * |user diet ∩ recipe diet|
///     + religious_match * |user religious ∩ recipe religious|
///     + culture_bonus (once, if any neighborhood culture appears in the origin)
///     - unaddressed_penalty * |user health \ recipe health|
pub fn calculate_recommendation_score(
    recipe: &Recipe,
    profile: &UserProfile,
    neighborhood: Option<&Neighborhood>,
    weights: &ScoringWeights,
) -> f64 {
    let suitable = &recipe.suitable_for;

    let health_matches = count_overlap(&profile.health_conditions, &suitable.health_conditions);
    let dietary_matches = count_overlap(&profile.dietary_preferences, &suitable.dietary_preferences);
    let religious_matches =
        count_overlap(&profile.religious_restrictions, &suitable.religious_restrictions);
    let unaddressed = profile.health_conditions.len() - health_matches;

    let culture_bonus = match neighborhood {
        Some(n) if matches_culture(&recipe.cultural_origin, &n.predominant_cultures) => {
            weights.culture_bonus
        }
        _ => 0.0,
    };

    weights.base
        + health_matches as f64 * weights.health_match
        + dietary_matches as f64 * weights.dietary_match
        + religious_matches as f64 * weights.religious_match
        + culture_bonus
        - unaddressed as f64 * weights.unaddressed_penalty
}

/// Score and rank recipes, highest first
///
/// Without a profile the input comes back untouched: unscored and in its
/// original order. Equal scores keep their input order.
pub fn score_recipes(
    recipes: Vec<Recipe>,
    profile: Option<&UserProfile>,
    neighborhood: Option<&Neighborhood>,
    weights: &ScoringWeights,
) -> Vec<Recipe> {
    let Some(profile) = profile else {
        return recipes;
    };

    let mut scored: Vec<Recipe> = recipes
        .into_iter()
        .map(|mut recipe| {
            let score = calculate_recommendation_score(&recipe, profile, neighborhood, weights);
            recipe.recommendation_score = Some(score);
            recipe
        })
        .collect();

    scored.sort_by(|a, b| {
        let a = a.recommendation_score.unwrap_or(f64::MIN);
        let b = b.recommendation_score.unwrap_or(f64::MIN);
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });

    scored
}

/// Number of user entries present in the recipe's tag set
#[inline]
fn count_overlap(user: &[String], recipe: &[String]) -> usize {
    user.iter().filter(|tag| recipe.contains(tag)).count()
}

/// Case-insensitive substring match of any culture against the origin
#[inline]
fn matches_culture(cultural_origin: &str, cultures: &[String]) -> bool {
    let origin = cultural_origin.to_lowercase();
    cultures
        .iter()
        .any(|culture| origin.contains(&culture.to_lowercase()))
}
