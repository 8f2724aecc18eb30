use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipe::entities::NutritionFacts;

#[derive(Debug, Clone)]
pub struct SearchRecipesInput {
    pub query: String,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct IngredientInput {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: String,
    pub original: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateRecipeInput {
    pub title: String,
    pub description: String,
    pub cuisines: Vec<String>,
    pub diets: Vec<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<IngredientInput>,
    pub instructions: Vec<String>,
    pub nutrition: Option<NutritionFacts>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRecipeInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cuisines: Option<Vec<String>>,
    pub diets: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<IngredientInput>>,
    pub instructions: Option<Vec<String>>,
    pub image_url: Option<String>,
}

/// Metadata-level filter applied by the cache repository before any
/// document is parsed.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub has_nutrition: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SeedInput {
    pub cuisines: Vec<String>,
    pub limit_per_cuisine: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeedReport {
    pub fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
}
