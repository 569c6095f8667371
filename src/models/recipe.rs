//! Canonical recipe records
//!
//! Provider-agnostic shapes returned to callers, plus the normalization
//! that turns raw provider payloads into them: HTML stripping, instruction
//! parsing, nutrition rollup and the used/missed ingredient split.

use serde::{Deserialize, Serialize};

use crate::models::provider::{
    ProviderNutrition, ProviderRecipe, ProviderRecipeInformation,
};

// == Search Filters ==
/// Optional constraints applied to a recipe search.
///
/// Serializes to a canonical JSON form used in cache-key derivation, so
/// field order here is part of key stability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Maximum cooking time in minutes; values above 60 select the
    /// "more than an hour" bucket
    pub cooking_time: Option<u32>,
    /// Dietary restriction
    pub diet: Option<Diet>,
    /// Desired serving count (not forwarded to the provider)
    pub servings: Option<u32>,
}

/// Supported dietary restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    Ketogenic,
}

impl Diet {
    /// Whether the provider models this diet as an intolerance parameter
    /// rather than a diet parameter.
    pub fn is_intolerance(&self) -> bool {
        matches!(self, Diet::GlutenFree | Diet::DairyFree)
    }

    /// The value sent to the provider (`intolerances=` for intolerances,
    /// `diet=` otherwise).
    pub fn api_value(&self) -> &'static str {
        match self {
            Diet::Vegetarian => "vegetarian",
            Diet::Vegan => "vegan",
            Diet::GlutenFree => "gluten",
            Diet::DairyFree => "dairy",
            Diet::Ketogenic => "ketogenic",
        }
    }
}

// == Recipe Summary ==
/// A recipe as returned from an ingredient search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Provider recipe id
    pub id: u64,
    /// Recipe title
    pub title: String,
    /// Image URL, if any
    pub image: Option<String>,
    /// Total preparation time in minutes (0 when unknown)
    pub ready_in_minutes: u32,
    /// Serving count
    pub servings: u32,
    /// Rating on a 5-star scale, derived from the provider score
    pub rating: f64,
    /// Plain-text summary with markup stripped
    pub summary: String,
    /// Search ingredients the recipe uses
    pub used_ingredients: Vec<String>,
    /// Recipe ingredients missing from the search set
    pub missed_ingredients: Vec<String>,
    /// Link to the original recipe
    pub source_url: Option<String>,
    /// Nutrition rollup, when the provider included one
    pub nutrition: Option<NutritionFacts>,
}

impl Recipe {
    /// Normalizes a provider search result into the canonical shape.
    pub fn from_provider(raw: ProviderRecipe) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            image: raw.image,
            ready_in_minutes: raw.ready_in_minutes.unwrap_or(0),
            servings: raw.servings.unwrap_or(4),
            rating: raw.spoonacular_score.map(|s| s / 20.0).unwrap_or(0.0),
            summary: strip_html(&raw.summary.unwrap_or_default()),
            used_ingredients: raw.used_ingredients.into_iter().map(|i| i.name).collect(),
            missed_ingredients: raw.missed_ingredients.into_iter().map(|i| i.name).collect(),
            source_url: raw.source_url,
            nutrition: raw.nutrition.and_then(NutritionFacts::from_provider),
        }
    }
}

// == Recipe Details ==
/// Full recipe information for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: u32,
    pub servings: u32,
    /// Plain-text summary with markup stripped
    pub summary: String,
    /// Numbered preparation steps
    pub instructions: Vec<InstructionStep>,
    /// Full ingredient list with measures
    pub ingredients: Vec<RecipeIngredient>,
    pub nutrition: Option<NutritionFacts>,
    pub source_url: Option<String>,
}

impl RecipeDetails {
    /// Normalizes a provider information payload into the canonical shape.
    pub fn from_provider(raw: ProviderRecipeInformation) -> Self {
        let instructions = normalize_instructions(&raw);

        Self {
            id: raw.id,
            title: raw.title,
            image: raw.image,
            ready_in_minutes: raw.ready_in_minutes.unwrap_or(0),
            servings: raw.servings.unwrap_or(4),
            summary: strip_html(&raw.summary.unwrap_or_default()),
            instructions,
            ingredients: raw
                .extended_ingredients
                .into_iter()
                .map(|i| RecipeIngredient {
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                    original: i.original,
                })
                .collect(),
            nutrition: raw.nutrition.and_then(NutritionFacts::from_provider),
            source_url: raw.source_url,
        }
    }
}

/// One numbered preparation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

/// One ingredient with its measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    /// The ingredient line as written in the source recipe
    pub original: String,
}

// == Nutrition ==
/// Per-serving nutrition rollup, amounts rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub fiber_g: u32,
    pub sugar_g: u32,
}

impl NutritionFacts {
    /// Rolls the provider's nutrient rows up into the fixed fact set.
    /// Returns None when the payload carries no nutrient rows.
    pub fn from_provider(raw: ProviderNutrition) -> Option<Self> {
        if raw.nutrients.is_empty() {
            return None;
        }

        let find = |name: &str| -> u32 {
            raw.nutrients
                .iter()
                .find(|n| n.name.to_lowercase().contains(name))
                .map(|n| n.amount.round().max(0.0) as u32)
                .unwrap_or(0)
        };

        Some(Self {
            calories: find("calories"),
            protein_g: find("protein"),
            carbs_g: find("carbohydrates"),
            fat_g: find("fat"),
            fiber_g: find("fiber"),
            sugar_g: find("sugar"),
        })
    }
}

// == Normalization Helpers ==

/// Picks analyzed steps when the provider supplies them, otherwise parses
/// the free-text instructions field.
fn normalize_instructions(raw: &ProviderRecipeInformation) -> Vec<InstructionStep> {
    if let Some(block) = raw.analyzed_instructions.first() {
        if !block.steps.is_empty() {
            return block
                .steps
                .iter()
                .enumerate()
                .map(|(index, s)| InstructionStep {
                    number: index as u32 + 1,
                    step: s.step.trim().to_string(),
                })
                .collect();
        }
    }

    parse_instruction_text(raw.instructions.as_deref().unwrap_or(""))
}

/// Splits free-text instructions into numbered steps.
///
/// Step boundaries are blank lines, leading "1." style markers, and
/// sentence ends followed by a capitalized sentence.
fn parse_instruction_text(text: &str) -> Vec<InstructionStep> {
    let mut steps: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut chars = paragraph.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '.' {
                // Sentence boundary only when followed by space + uppercase
                let mut lookahead = chars.clone();
                while matches!(lookahead.peek(), Some(ws) if ws.is_whitespace()) {
                    lookahead.next();
                }
                if matches!(lookahead.peek(), Some(next) if next.is_uppercase()) {
                    let trimmed = current.trim();
                    if !trimmed.is_empty() && trimmed.chars().all(|d| d.is_ascii_digit()) {
                        // A bare "3." numbering marker, not a sentence
                        current.clear();
                    } else {
                        steps.push(std::mem::take(&mut current));
                    }
                    chars = lookahead;
                    continue;
                }
            }
            current.push(c);
        }
        steps.push(current);
    }

    steps
        .into_iter()
        .map(|s| strip_step_marker(s.trim()).to_string())
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(index, step)| InstructionStep {
            number: index as u32 + 1,
            step,
        })
        .collect()
}

/// Drops a leading "3." style numbering marker from a step.
fn strip_step_marker(step: &str) -> &str {
    let rest = step.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < step.len() {
        if let Some(stripped) = rest.strip_prefix('.') {
            return stripped.trim_start();
        }
    }
    step
}

/// Strips markup tags and decodes the common entities, approximating the
/// provider summaries' plain-text rendering.
pub(crate) fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}
