use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Highest numbered ingredient/measure slot in a TheMealDB record
pub const INGREDIENT_SLOTS: usize = 20;

/// Raw meal record as returned by TheMealDB
///
/// Filter endpoints only fill `idMeal`, `strMeal` and `strMealThumb`; the
/// lookup endpoint fills the rest, including the numbered
/// `strIngredientN` / `strMeasureN` slots kept in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl RawMeal {
    /// Non-blank ingredients paired with their (possibly empty) measures
    pub fn ingredients_and_measures(&self) -> Vec<(String, String)> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let ingredient = self.slot(&format!("strIngredient{}", slot))?;
                let measure = self.slot(&format!("strMeasure{}", slot)).unwrap_or_default();
                Some((ingredient, measure))
            })
            .collect()
    }

    fn slot(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Envelope for TheMealDB endpoints that answer under `meals`, including the
/// `list.php` reference lists. `meals` is null when nothing matched.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct MealDbResponse<T = RawMeal> {
    #[serde(default)]
    pub meals: Option<Vec<T>>,
}

/// One entry of `categories.php`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealCategory {
    #[serde(rename = "idCategory", default)]
    pub id: Option<String>,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

/// Envelope of `categories.php`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Option<Vec<MealCategory>>,
}

/// One entry of `list.php?a=list`
#[derive(Debug, Clone, Deserialize)]
pub struct AreaEntry {
    #[serde(rename = "strArea")]
    pub name: String,
}

/// One entry of `list.php?i=list`
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientEntry {
    #[serde(rename = "strIngredient")]
    pub name: String,
}
