use std::sync::OnceLock;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{Ingredient, NutritionFacts, Recipe, RecipeDraft, RecipeSource},
        helpers::split_instructions,
        ports::RecipeSourcePort,
    },
};

/// Spoonacular client. Search returns id/title pairs only, so the full
/// record always comes from the per-recipe information endpoint.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InformationRecord {
    id: i64,
    title: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    cuisines: Vec<String>,
    #[serde(default)]
    diets: Vec<String>,
    #[serde(default)]
    dish_types: Vec<String>,
    #[serde(default)]
    extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    analyzed_instructions: Vec<InstructionSet>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    nutrition: Option<NutritionBlock>,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    #[serde(default)]
    name: String,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    original: String,
}

#[derive(Debug, Deserialize)]
struct InstructionSet {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    step: String,
}

#[derive(Debug, Deserialize)]
struct NutritionBlock {
    #[serde(default)]
    nutrients: Vec<Nutrient>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    name: String,
    amount: f64,
}

fn html_tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

fn strip_html(summary: &str) -> String {
    html_tags().replace_all(summary, "").trim().to_string()
}

fn nutrient_amount(block: &NutritionBlock, name: &str) -> Option<f64> {
    block
        .nutrients
        .iter()
        .find(|n| n.name.eq_ignore_ascii_case(name))
        .map(|n| n.amount)
}

fn information_to_recipe(record: InformationRecord) -> Result<Recipe, CoreError> {
    let nutrition = record.nutrition.as_ref().and_then(|block| {
        Some(NutritionFacts {
            calories: nutrient_amount(block, "Calories")?,
            protein_g: nutrient_amount(block, "Protein")?,
            carbs_g: nutrient_amount(block, "Carbohydrates")?,
            fat_g: nutrient_amount(block, "Fat")?,
        })
    });

    let mut instructions: Vec<String> = record
        .analyzed_instructions
        .into_iter()
        .flat_map(|set| set.steps)
        .map(|step| step.step)
        .collect();
    if instructions.is_empty()
        && let Some(blob) = &record.instructions
    {
        instructions = split_instructions(blob);
    }

    Recipe::new(RecipeDraft {
        id: Some(format!("spoonacular-{}", record.id)),
        title: record.title,
        description: record.summary.as_deref().map(strip_html).unwrap_or_default(),
        source: Some(RecipeSource::Spoonacular),
        cuisines: record.cuisines,
        diets: record.diets,
        tags: record.dish_types,
        ingredients: record
            .extended_ingredients
            .into_iter()
            .map(|i| Ingredient {
                name: i.name,
                amount: i.amount,
                unit: i.unit,
                original: i.original,
            })
            .collect(),
        instructions,
        nutrition,
        image_url: record.image,
        ..Default::default()
    })
}

impl SpoonacularClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: Client::new(),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CoreError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Spoonacular request failed: {}", e);
                CoreError::ExternalServiceError(format!("Spoonacular request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Spoonacular returned {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "Spoonacular returned {status}"
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Spoonacular response: {}", e);
            CoreError::ExternalServiceError(format!("malformed Spoonacular response: {e}"))
        })
    }

    async fn information(&self, id: i64) -> Result<Option<Recipe>, CoreError> {
        let record: InformationRecord = self
            .get_json(
                &format!("recipes/{id}/information"),
                &[("includeNutrition", "true")],
            )
            .await?;

        match information_to_recipe(record) {
            Ok(recipe) => Ok(Some(recipe)),
            Err(e) => {
                warn!("Skipping unmappable Spoonacular record '{}': {}", id, e);
                Ok(None)
            }
        }
    }

    async fn complex_search(
        &self,
        query: &[(&str, &str)],
        limit: usize,
    ) -> Result<Vec<Recipe>, CoreError> {
        let listing: ComplexSearchResponse = self.get_json("recipes/complexSearch", query).await?;

        let mut recipes = Vec::new();
        for result in listing.results.into_iter().take(limit) {
            match self.information(result.id).await {
                Ok(Some(recipe)) => recipes.push(recipe),
                Ok(None) => {}
                Err(e) => warn!("Spoonacular information failed for '{}': {}", result.id, e),
            }
        }
        Ok(recipes)
    }
}

impl RecipeSourcePort for SpoonacularClient {
    fn source(&self) -> RecipeSource {
        RecipeSource::Spoonacular
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Recipe>, CoreError> {
        let number = limit.to_string();
        self.complex_search(&[("query", query), ("number", number.as_str())], limit)
            .await
    }

    async fn by_cuisine(&self, cuisine: &str, limit: usize) -> Result<Vec<Recipe>, CoreError> {
        let number = limit.to_string();
        self.complex_search(&[("cuisine", cuisine), ("number", number.as_str())], limit)
            .await
    }

    async fn lookup(&self, external_id: &str) -> Result<Option<Recipe>, CoreError> {
        let id: i64 = external_id.parse().map_err(|_| {
            CoreError::Invalid(format!("invalid Spoonacular id '{external_id}'"))
        })?;
        self.information(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_information_record_maps_to_recipe() {
        let record: InformationRecord = serde_json::from_value(json!({
            "id": 716429,
            "title": "Pasta with Garlic",
            "summary": "A <b>quick</b> weeknight pasta.",
            "image": "https://img.spoonacular.com/recipes/716429.jpg",
            "cuisines": ["Mediterranean", "Italian"],
            "diets": ["dairy free"],
            "dishTypes": ["lunch", "main course"],
            "extendedIngredients": [
                {"name": "pasta", "amount": 8.0, "unit": "oz", "original": "8 oz pasta"},
                {"name": "garlic", "amount": 3.0, "unit": "cloves", "original": "3 cloves garlic"}
            ],
            "analyzedInstructions": [
                {"steps": [
                    {"number": 1, "step": "Boil the pasta."},
                    {"number": 2, "step": "Toast the garlic and toss."}
                ]}
            ],
            "nutrition": {"nutrients": [
                {"name": "Calories", "amount": 584.0, "unit": "kcal"},
                {"name": "Protein", "amount": 19.0, "unit": "g"},
                {"name": "Carbohydrates", "amount": 84.0, "unit": "g"},
                {"name": "Fat", "amount": 20.0, "unit": "g"}
            ]}
        }))
        .unwrap();

        let recipe = information_to_recipe(record).unwrap();
        assert_eq!(recipe.id, "spoonacular-716429");
        assert_eq!(recipe.description, "A quick weeknight pasta.");
        assert_eq!(recipe.diets, vec!["dairy free"]);
        assert_eq!(recipe.instructions.len(), 2);
        assert_eq!(recipe.nutrition.unwrap().calories, 584.0);
    }

    #[test]
    fn test_incomplete_nutrients_yield_no_facts() {
        let record: InformationRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "Thin Record",
            "nutrition": {"nutrients": [{"name": "Calories", "amount": 100.0}]}
        }))
        .unwrap();

        let recipe = information_to_recipe(record).unwrap();
        assert!(recipe.nutrition.is_none());
    }

    #[test]
    fn test_instruction_blob_fallback() {
        let record: InformationRecord = serde_json::from_value(json!({
            "id": 2,
            "title": "Blob Only",
            "instructions": "1. Chop everything finely.\n2. Cook it all together slowly."
        }))
        .unwrap();

        let recipe = information_to_recipe(record).unwrap();
        assert_eq!(recipe.instructions.len(), 2);
    }
}
