use serde::{Deserialize, Serialize};

/// Self-reported gender on a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    #[default]
    PreferNotToSay,
}

/// User profile with the constraint sets used for recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_age")]
    pub age: u8,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "healthConditions", default)]
    pub health_conditions: Vec<String>,
    #[serde(rename = "dietaryPreferences", default)]
    pub dietary_preferences: Vec<String>,
    #[serde(rename = "religiousRestrictions", default)]
    pub religious_restrictions: Vec<String>,
    #[serde(rename = "zipCode", default)]
    pub zip_code: String,
    #[serde(rename = "favoriteRecipes", default)]
    pub favorite_recipes: Vec<String>,
}

fn default_age() -> u8 { 30 }

impl UserProfile {
    /// Profile with the defaults applied on first edit
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            age: default_age(),
            gender: Gender::default(),
            health_conditions: Vec::new(),
            dietary_preferences: Vec::new(),
            religious_restrictions: Vec::new(),
            zip_code: String::new(),
            favorite_recipes: Vec::new(),
        }
    }
}

/// Where a recipe's suitability tags came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Hand-curated tags from the static catalog
    #[default]
    Curated,
    /// Derived from ingredient keywords; absence of a keyword is weak evidence
    Inferred,
}

/// Audiences a recipe is appropriate for (not what it contains)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuitableFor {
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub religious_restrictions: Vec<String>,
    #[serde(default)]
    pub provenance: Provenance,
}

/// Per-serving nutrition. Zero means unknown for externally sourced recipes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NutritionalInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// A single dish record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default)]
    pub cultural_origin: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub nutritional_info: NutritionalInfo,
    #[serde(default)]
    pub suitable_for: SuitableFor,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: f64,
    /// Only present after scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodAccess {
    pub grocery_stores: u32,
    pub farmers_markets: bool,
    pub health_food_stores: u32,
    pub food_desert: bool,
}

/// Neighborhood health statistics, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthStats {
    pub obesity_rate: f64,
    pub diabetes_rate: f64,
}

/// Zip-code keyed locality context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub zip_code: String,
    pub name: String,
    pub borough: String,
    pub food_access: FoodAccess,
    pub health_stats: HealthStats,
    pub predominant_cultures: Vec<String>,
}

/// UI filter query. Empty sets and an absent prep time are pass-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilters {
    #[serde(default)]
    pub cuisine_types: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub max_prep_time: Option<u32>,
}

impl RecipeFilters {
    pub fn is_empty(&self) -> bool {
        self.cuisine_types.is_empty()
            && self.dietary_preferences.is_empty()
            && self.health_conditions.is_empty()
            && self.max_prep_time.is_none()
    }
}

/// Hard compatibility constraints applied to externally retrieved recipes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompatibilityFilter {
    /// ANY-match
    pub dietary_preferences: Vec<String>,
    /// ALL-match
    pub health_conditions: Vec<String>,
    /// ALL-match
    pub religious_restrictions: Vec<String>,
    pub cuisine_types: Vec<String>,
    pub cultural_origins: Vec<String>,
    pub max_prep_time: Option<u32>,
}

impl CompatibilityFilter {
    /// Constraints implied by a user's profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            dietary_preferences: profile.dietary_preferences.clone(),
            health_conditions: profile.health_conditions.clone(),
            religious_restrictions: profile.religious_restrictions.clone(),
            ..Default::default()
        }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub base: f64,
    pub health_match: f64,
    pub dietary_match: f64,
    pub religious_match: f64,
    pub culture_bonus: f64,
    pub unaddressed_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 5.0,
            health_match: 2.0,
            dietary_match: 1.5,
            religious_match: 2.0,
            culture_bonus: 1.5,
            unaddressed_penalty: 0.5,
        }
    }
}
