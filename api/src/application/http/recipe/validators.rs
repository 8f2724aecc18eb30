use ladle_core::domain::recipe::entities::NutritionFacts;
use ladle_core::domain::recipe::value_objects::{CreateRecipeInput, IngredientInput, UpdateRecipeInput};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 50;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchRecipesQuery {
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub cuisine: Option<String>,

    #[serde(default)]
    pub diet: Option<String>,

    /// Maximum results, clamped to 1..=50. Defaults to 10.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct IngredientValidator {
    #[validate(length(min = 1, message = "ingredient name is required"))]
    pub name: String,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub original: String,
}

impl From<IngredientValidator> for IngredientInput {
    fn from(value: IngredientValidator) -> Self {
        IngredientInput {
            name: value.name,
            amount: value.amount,
            unit: value.unit,
            original: value.original,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRecipeValidator {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub cuisines: Vec<String>,

    #[serde(default)]
    pub diets: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<IngredientValidator>,

    #[serde(default)]
    pub instructions: Vec<String>,

    #[serde(default)]
    pub nutrition: Option<NutritionFacts>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<CreateRecipeValidator> for CreateRecipeInput {
    fn from(value: CreateRecipeValidator) -> Self {
        CreateRecipeInput {
            title: value.title,
            description: value.description,
            cuisines: value.cuisines,
            diets: value.diets,
            tags: value.tags,
            ingredients: value.ingredients.into_iter().map(Into::into).collect(),
            instructions: value.instructions,
            nutrition: value.nutrition,
            image_url: value.image_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRecipeValidator {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub cuisines: Option<Vec<String>>,

    #[serde(default)]
    pub diets: Option<Vec<String>>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Option<Vec<IngredientValidator>>,

    #[serde(default)]
    pub instructions: Option<Vec<String>>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<UpdateRecipeValidator> for UpdateRecipeInput {
    fn from(value: UpdateRecipeValidator) -> Self {
        UpdateRecipeInput {
            title: value.title,
            description: value.description,
            cuisines: value.cuisines,
            diets: value.diets,
            tags: value.tags,
            ingredients: value
                .ingredients
                .map(|list| list.into_iter().map(Into::into).collect()),
            instructions: value.instructions,
            image_url: value.image_url,
        }
    }
}
