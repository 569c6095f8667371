//! Data models for the recipe client
//!
//! Splits the wire shapes (provider DTOs, lenient and provider-specific)
//! from the canonical records callers receive.

pub mod provider;
pub mod recipe;

// Re-export commonly used types
pub use recipe::{
    Diet, InstructionStep, NutritionFacts, Recipe, RecipeDetails, RecipeIngredient,
    SearchFilters,
};
