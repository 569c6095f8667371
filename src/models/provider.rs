//! Provider response DTOs
//!
//! Spoonacular-shaped payloads as they arrive over the wire. Deliberately
//! lenient: any field the provider omits falls back to a default so a
//! partial payload never fails the whole search.

use serde::Deserialize;

// == Search Result ==
/// One recipe from the find-by-ingredients endpoint
/// (with `addRecipeInformation` and `fillIngredients` enabled).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// Provider score on a 0-100 scale
    #[serde(default)]
    pub spoonacular_score: Option<f64>,
    /// HTML summary
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub used_ingredients: Vec<ProviderIngredientRef>,
    #[serde(default)]
    pub missed_ingredients: Vec<ProviderIngredientRef>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub nutrition: Option<ProviderNutrition>,
}

/// Ingredient reference inside used/missed lists.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderIngredientRef {
    pub name: String,
}

// == Recipe Information ==
/// Full payload from the recipe information endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecipeInformation {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Structured steps; preferred over the free-text field
    #[serde(default)]
    pub analyzed_instructions: Vec<ProviderInstructionBlock>,
    /// Free-text instructions fallback
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<ProviderExtendedIngredient>,
    #[serde(default)]
    pub nutrition: Option<ProviderNutrition>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// One block of analyzed instructions.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderInstructionBlock {
    #[serde(default)]
    pub steps: Vec<ProviderInstructionStep>,
}

/// One analyzed step.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderInstructionStep {
    #[serde(default)]
    pub number: u32,
    pub step: String,
}

/// One entry of the extended ingredient list.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderExtendedIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub original: String,
}

// == Nutrition ==
/// Nutrition block with per-nutrient rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderNutrition {
    #[serde(default)]
    pub nutrients: Vec<ProviderNutrient>,
}

/// One nutrient row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderNutrient {
    pub name: String,
    #[serde(default)]
    pub amount: f64,
}
