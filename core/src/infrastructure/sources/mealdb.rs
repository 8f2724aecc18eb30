use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{Ingredient, Recipe, RecipeDraft, RecipeSource},
        helpers::split_instructions,
        ports::RecipeSourcePort,
    },
};

const MAX_INGREDIENT_SLOTS: usize = 20;

/// TheMealDB client. The free tier keys every request by path, with one
/// meal shape for search/lookup and a skinny shape for filter listings.
#[derive(Debug, Clone)]
pub struct MealDbClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// Full meal record. Ingredients and measures arrive as twenty numbered
/// columns (`strIngredient1..20` / `strMeasure1..20`), captured by the
/// flattened map.
#[derive(Debug, Deserialize)]
struct MealRecord {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(flatten)]
    columns: HashMap<String, Option<String>>,
}

#[derive(Debug, Deserialize)]
struct MealListing {
    #[serde(rename = "idMeal")]
    id: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn meal_to_recipe(meal: MealRecord) -> Result<Recipe, CoreError> {
    let mut ingredients = Vec::new();
    for slot in 1..=MAX_INGREDIENT_SLOTS {
        let name = meal
            .columns
            .get(&format!("strIngredient{slot}"))
            .cloned()
            .flatten();
        let Some(name) = non_empty(name) else {
            continue;
        };
        let measure = meal
            .columns
            .get(&format!("strMeasure{slot}"))
            .cloned()
            .flatten();
        let measure = non_empty(measure).unwrap_or_default();

        ingredients.push(Ingredient {
            original: if measure.is_empty() {
                name.clone()
            } else {
                format!("{measure} {name}")
            },
            name,
            amount: None,
            unit: measure,
        });
    }

    let instructions = meal
        .instructions
        .as_deref()
        .map(split_instructions)
        .unwrap_or_default();

    Recipe::new(RecipeDraft {
        id: Some(format!("mealdb-{}", meal.id)),
        title: meal.name,
        source: Some(RecipeSource::MealDb),
        cuisines: non_empty(meal.area).into_iter().collect(),
        tags: non_empty(meal.category)
            .into_iter()
            .chain(non_empty(meal.tags))
            .collect(),
        ingredients,
        instructions,
        image_url: non_empty(meal.thumbnail),
        ..Default::default()
    })
}

impl MealDbClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        param: (&str, &str),
    ) -> Result<Vec<T>, CoreError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .query(&[param])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("TheMealDB request failed: {}", e);
                CoreError::ExternalServiceError(format!("TheMealDB request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("TheMealDB returned {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "TheMealDB returned {status}"
            )));
        }

        let envelope: MealsEnvelope<T> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse TheMealDB response: {}", e);
            CoreError::ExternalServiceError(format!("malformed TheMealDB response: {e}"))
        })?;

        // "no results" is `{"meals": null}`, not an empty list.
        Ok(envelope.meals.unwrap_or_default())
    }

    fn collect(meals: Vec<MealRecord>, limit: usize) -> Vec<Recipe> {
        meals
            .into_iter()
            .filter_map(|meal| match meal_to_recipe(meal) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!("Skipping unmappable TheMealDB record: {}", e);
                    None
                }
            })
            .take(limit)
            .collect()
    }
}

impl RecipeSourcePort for MealDbClient {
    fn source(&self) -> RecipeSource {
        RecipeSource::MealDb
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Recipe>, CoreError> {
        let meals = self.fetch("search.php", ("s", query)).await?;
        Ok(Self::collect(meals, limit))
    }

    async fn by_cuisine(&self, cuisine: &str, limit: usize) -> Result<Vec<Recipe>, CoreError> {
        // The filter endpoint only returns listings, so each hit needs a
        // lookup round trip for the full record.
        let listings: Vec<MealListing> = self.fetch("filter.php", ("a", cuisine)).await?;

        let mut recipes = Vec::new();
        for listing in listings.into_iter().take(limit) {
            match self.lookup(&listing.id).await {
                Ok(Some(recipe)) => recipes.push(recipe),
                Ok(None) => {}
                Err(e) => warn!("TheMealDB lookup failed for '{}': {}", listing.id, e),
            }
        }
        Ok(recipes)
    }

    async fn lookup(&self, external_id: &str) -> Result<Option<Recipe>, CoreError> {
        let meals: Vec<MealRecord> = self.fetch("lookup.php", ("i", external_id)).await?;
        Ok(Self::collect(meals, 1).into_iter().next())
    }
}
