//! Conversions between stored documents and the canonical recipe.
//!
//! Stored documents are read leniently: older records carried tag lists
//! as comma-joined strings, instructions as a single blob and nutrition
//! flattened into the top level. All of these re-normalize on read.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{Ingredient, NutritionFacts, Recipe, RecipeDraft, RecipeSource},
        helpers::{normalize_title, split_instructions},
    },
};
use crate::infrastructure::store::DocumentEntry;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn into_list(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s],
            StringOrList::Many(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseIngredient {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        amount: Option<f64>,
        #[serde(default)]
        unit: String,
        #[serde(default)]
        original: String,
    },
}

impl From<LooseIngredient> for Ingredient {
    fn from(value: LooseIngredient) -> Self {
        match value {
            LooseIngredient::Name(name) => Ingredient {
                original: name.clone(),
                name,
                amount: None,
                unit: String::new(),
            },
            LooseIngredient::Full {
                name,
                amount,
                unit,
                original,
            } => Ingredient {
                name,
                amount,
                unit,
                original,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct LooseRecipeDocument {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    source: Option<RecipeSource>,
    #[serde(default)]
    cuisines: Option<StringOrList>,
    #[serde(default)]
    diets: Option<StringOrList>,
    #[serde(default)]
    tags: Option<StringOrList>,
    #[serde(default)]
    ingredients: Vec<LooseIngredient>,
    #[serde(default)]
    instructions: Option<StringOrList>,
    #[serde(default)]
    nutrition: Option<NutritionFacts>,
    // Legacy flattened nutrition fields.
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    protein_g: Option<f64>,
    #[serde(default, alias = "carbohydrates_g")]
    carbs_g: Option<f64>,
    #[serde(default)]
    fat_g: Option<f64>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl LooseRecipeDocument {
    fn nutrition(&self) -> Option<NutritionFacts> {
        if self.nutrition.is_some() {
            return self.nutrition.clone();
        }
        match (self.calories, self.protein_g, self.carbs_g, self.fat_g) {
            (Some(calories), Some(protein_g), Some(carbs_g), Some(fat_g)) => {
                Some(NutritionFacts {
                    calories,
                    protein_g,
                    carbs_g,
                    fat_g,
                })
            }
            _ => None,
        }
    }

    fn instructions(&mut self) -> Vec<String> {
        match self.instructions.take() {
            Some(StringOrList::One(blob)) => split_instructions(&blob),
            Some(StringOrList::Many(steps)) => steps,
            None => Vec::new(),
        }
    }
}

pub fn entry_to_recipe(entry: &DocumentEntry) -> Result<Recipe, CoreError> {
    let mut doc: LooseRecipeDocument =
        serde_json::from_value(entry.document.clone()).map_err(|e| {
            error!("Failed to parse stored recipe '{}': {}", entry.id, e);
            CoreError::StoreError(format!("corrupt recipe document '{}': {e}", entry.id))
        })?;

    let nutrition = doc.nutrition();
    let instructions = doc.instructions();

    Recipe::new(RecipeDraft {
        id: doc.id.or_else(|| Some(entry.id.clone())),
        title: doc.title,
        description: doc.description,
        source: doc.source,
        cuisines: doc.cuisines.map(StringOrList::into_list).unwrap_or_default(),
        diets: doc.diets.map(StringOrList::into_list).unwrap_or_default(),
        tags: doc.tags.map(StringOrList::into_list).unwrap_or_default(),
        ingredients: doc.ingredients.into_iter().map(Ingredient::from).collect(),
        instructions,
        nutrition,
        image_url: doc.image_url,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    })
}

pub fn recipe_to_entry(recipe: &Recipe) -> Result<DocumentEntry, CoreError> {
    let document = serde_json::to_value(recipe).map_err(|e| {
        error!("Failed to serialize recipe '{}': {}", recipe.id, e);
        CoreError::InternalServerError
    })?;

    let lowered = |values: &[String]| -> Vec<String> {
        values.iter().map(|v| v.to_lowercase()).collect()
    };

    let metadata = HashMap::from([
        ("title_key".to_string(), json!(normalize_title(&recipe.title))),
        ("source".to_string(), json!(recipe.source.id_prefix())),
        ("cuisines".to_string(), json!(lowered(&recipe.cuisines))),
        ("diets".to_string(), json!(lowered(&recipe.diets))),
        (
            "has_nutrition".to_string(),
            json!(recipe.nutrition.is_some()),
        ),
    ]);

    Ok(DocumentEntry {
        id: recipe.id.clone(),
        document,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(document: serde_json::Value) -> DocumentEntry {
        DocumentEntry {
            id: "mealdb-1".to_string(),
            document,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn test_canonical_document_round_trips() {
        let recipe = Recipe::new(RecipeDraft {
            id: Some("user-abc".to_string()),
            title: "Shakshuka".to_string(),
            cuisines: vec!["Middle Eastern".to_string()],
            instructions: vec!["Simmer sauce.".to_string(), "Poach eggs.".to_string()],
            ..Default::default()
        })
        .unwrap();

        let entry = recipe_to_entry(&recipe).unwrap();
        assert_eq!(entry.id, "user-abc");
        assert_eq!(entry.metadata["title_key"], json!("shakshuka"));
        assert_eq!(entry.metadata["has_nutrition"], json!(false));

        let parsed = entry_to_recipe(&entry).unwrap();
        assert_eq!(parsed, recipe);
    }

    #[test]
    fn test_legacy_flattened_nutrition_is_renested() {
        let parsed = entry_to_recipe(&entry(json!({
            "title": "Old Stew",
            "calories": 300.0,
            "protein_g": 20.0,
            "carbohydrates_g": 25.0,
            "fat_g": 10.0
        })))
        .unwrap();

        let facts = parsed.nutrition.unwrap();
        assert_eq!(facts.calories, 300.0);
        assert_eq!(facts.carbs_g, 25.0);
    }

    #[test]
    fn test_legacy_string_fields_become_lists() {
        let parsed = entry_to_recipe(&entry(json!({
            "title": "Goulash",
            "cuisines": "Hungarian",
            "tags": "stew,comfort food",
            "ingredients": ["beef", "paprika"],
            "instructions": "1. Brown the beef. 2. Add paprika and simmer for an hour."
        })))
        .unwrap();

        assert_eq!(parsed.cuisines, vec!["Hungarian"]);
        assert_eq!(parsed.tags, vec!["stew", "comfort food"]);
        assert_eq!(parsed.ingredients.len(), 2);
        assert_eq!(parsed.instructions.len(), 2);
    }

    #[test]
    fn test_missing_id_falls_back_to_entry_id() {
        let parsed = entry_to_recipe(&entry(json!({"title": "Mystery Dish"}))).unwrap();
        assert_eq!(parsed.id, "mealdb-1");
        assert_eq!(parsed.source, RecipeSource::MealDb);
    }

    #[test]
    fn test_partial_flattened_nutrition_ignored() {
        let parsed = entry_to_recipe(&entry(json!({
            "title": "Half Facts",
            "calories": 300.0
        })))
        .unwrap();
        assert!(parsed.nutrition.is_none());
    }
}
