use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::{entities::app_errors::CoreError, generate_uuid_v7};
use crate::domain::recipe::helpers::normalize_tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    MealDb,
    Spoonacular,
    User,
}

impl RecipeSource {
    pub fn id_prefix(&self) -> &'static str {
        match self {
            RecipeSource::MealDb => "mealdb",
            RecipeSource::Spoonacular => "spoonacular",
            RecipeSource::User => "user",
        }
    }

    pub fn from_id_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "mealdb" => Some(RecipeSource::MealDb),
            "spoonacular" => Some(RecipeSource::Spoonacular),
            "user" => Some(RecipeSource::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub original: String,
}

/// Macro-nutrient facts per serving. Always stored nested under the
/// `nutrition` key; legacy flattened shapes are re-nested on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// The canonical recipe record. Only produced through [`Recipe::new`],
/// which normalizes every upstream shape into this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source: RecipeSource,
    pub cuisines: Vec<String>,
    pub diets: Vec<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub nutrition: Option<NutritionFacts>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Loose input accepted by the validating constructor. Ingestion paths
/// (providers, store documents, user payloads) build a draft and never
/// assemble a [`Recipe`] by hand.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub source: Option<RecipeSource>,
    pub cuisines: Vec<String>,
    pub diets: Vec<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub nutrition: Option<NutritionFacts>,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn new(draft: RecipeDraft) -> Result<Self, CoreError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::Invalid("recipe title must not be empty".into()));
        }

        let source = draft
            .source
            .or_else(|| {
                draft
                    .id
                    .as_deref()
                    .and_then(|id| id.split_once('-'))
                    .and_then(|(prefix, _)| RecipeSource::from_id_prefix(prefix))
            })
            .unwrap_or(RecipeSource::User);

        let id = match draft.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => format!("{}-{}", source.id_prefix(), generate_uuid_v7()),
        };

        let ingredients = draft
            .ingredients
            .into_iter()
            .filter_map(|i| {
                let name = i.name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(Ingredient {
                    name: name.to_string(),
                    amount: i.amount,
                    unit: i.unit.trim().to_string(),
                    original: i.original.trim().to_string(),
                })
            })
            .collect();

        let instructions = draft
            .instructions
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        let now = Utc::now();
        let created_at = draft.created_at.unwrap_or(now);
        let updated_at = draft.updated_at.unwrap_or(created_at);

        Ok(Self {
            id,
            title,
            description: draft.description.trim().to_string(),
            source,
            cuisines: normalize_tags(draft.cuisines),
            diets: normalize_tags(draft.diets),
            tags: normalize_tags(draft.tags),
            ingredients,
            instructions,
            nutrition: draft.nutrition,
            image_url: draft
                .image_url
                .filter(|url| !url.trim().is_empty()),
            created_at,
            updated_at,
        })
    }

    pub fn set_nutrition(&mut self, facts: NutritionFacts) {
        self.nutrition = Some(facts);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> RecipeDraft {
        RecipeDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = Recipe::new(draft("   "));
        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_generated_id_carries_source_prefix() {
        let recipe = Recipe::new(draft("Pea Soup")).unwrap();
        assert!(recipe.id.starts_with("user-"));
        assert_eq!(recipe.source, RecipeSource::User);
    }

    #[test]
    fn test_source_inferred_from_id_prefix() {
        let mut d = draft("Beef Rendang");
        d.id = Some("mealdb-52772".to_string());
        let recipe = Recipe::new(d).unwrap();
        assert_eq!(recipe.source, RecipeSource::MealDb);
    }

    #[test]
    fn test_comma_joined_tags_become_lists() {
        let mut d = draft("Pad Thai");
        d.cuisines = vec!["Thai".to_string()];
        d.tags = vec!["Noodles,Street Food, quick".to_string()];
        let recipe = Recipe::new(d).unwrap();
        assert_eq!(recipe.tags, vec!["Noodles", "Street Food", "quick"]);
    }

    #[test]
    fn test_placeholder_ingredients_dropped() {
        let mut d = draft("Toast");
        d.ingredients = vec![
            Ingredient {
                name: "  ".to_string(),
                amount: None,
                unit: String::new(),
                original: "placeholder".to_string(),
            },
            Ingredient {
                name: "Bread".to_string(),
                amount: Some(2.0),
                unit: "slices".to_string(),
                original: "2 slices bread".to_string(),
            },
        ];
        let recipe = Recipe::new(d).unwrap();
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.ingredients[0].name, "Bread");
    }

    #[test]
    fn test_timestamps_preserved_when_given() {
        let created = "2024-01-02T03:04:05Z".parse().unwrap();
        let mut d = draft("Old Record");
        d.created_at = Some(created);
        let recipe = Recipe::new(d).unwrap();
        assert_eq!(recipe.created_at, created);
        assert_eq!(recipe.updated_at, created);
    }
}
