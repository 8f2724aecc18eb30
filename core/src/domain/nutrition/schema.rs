use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::entities::{NutritionFacts, Recipe},
};

const MAX_CALORIES: f64 = 10_000.0;
const MAX_MACRO_GRAMS: f64 = 1_000.0;

/// Returns the JSON schema for nutrition estimation LLM responses.
pub fn get_nutrition_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "calories": { "type": "number" },
            "protein_g": { "type": "number" },
            "carbs_g": { "type": "number" },
            "fat_g": { "type": "number" }
        },
        "required": ["calories", "protein_g", "carbs_g", "fat_g"]
    })
}

pub fn build_nutrition_prompt(recipe: &Recipe) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| {
            if i.original.is_empty() {
                i.name.clone()
            } else {
                i.original.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n- ");

    format!(
        "Estimate per-serving nutrition facts for the recipe below. \
         Respond with a single JSON object containing the numeric fields \
         calories, protein_g, carbs_g and fat_g. No prose, no markdown.\n\n\
         Title: {}\n\nIngredients:\n- {}\n\nInstructions:\n{}",
        recipe.title,
        ingredients,
        recipe.instructions.join("\n")
    )
}

/// Strips markdown code fences some models wrap JSON replies in.
pub fn strip_json_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Deserialize)]
struct NutritionReply {
    calories: f64,
    protein_g: f64,
    #[serde(alias = "carbohydrates_g", alias = "carbohydrates")]
    carbs_g: f64,
    fat_g: f64,
}

/// Parses and range-checks a raw LLM reply into [`NutritionFacts`].
pub fn parse_nutrition_reply(raw: &str) -> Result<NutritionFacts, CoreError> {
    let reply: NutritionReply = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| CoreError::ExternalServiceError(format!("malformed nutrition reply: {e}")))?;

    if !(0.0..=MAX_CALORIES).contains(&reply.calories) {
        return Err(CoreError::ExternalServiceError(format!(
            "calories out of range: {}",
            reply.calories
        )));
    }
    for (field, value) in [
        ("protein_g", reply.protein_g),
        ("carbs_g", reply.carbs_g),
        ("fat_g", reply.fat_g),
    ] {
        if !(0.0..=MAX_MACRO_GRAMS).contains(&value) {
            return Err(CoreError::ExternalServiceError(format!(
                "{field} out of range: {value}"
            )));
        }
    }

    Ok(NutritionFacts {
        calories: reply.calories,
        protein_g: reply.protein_g,
        carbs_g: reply.carbs_g,
        fat_g: reply.fat_g,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_reply_parses() {
        let facts = parse_nutrition_reply(
            r#"{"calories": 420.0, "protein_g": 32.5, "carbs_g": 18.0, "fat_g": 24.0}"#,
        )
        .unwrap();
        assert_eq!(facts.calories, 420.0);
        assert_eq!(facts.carbs_g, 18.0);
    }

    #[test]
    fn test_fenced_reply_parses() {
        let raw = "```json\n{\"calories\": 100, \"protein_g\": 5, \"carbs_g\": 10, \"fat_g\": 3}\n```";
        let facts = parse_nutrition_reply(raw).unwrap();
        assert_eq!(facts.calories, 100.0);
    }

    #[test]
    fn test_carbohydrates_alias_accepted() {
        let facts = parse_nutrition_reply(
            r#"{"calories": 100, "protein_g": 5, "carbohydrates": 10, "fat_g": 3}"#,
        )
        .unwrap();
        assert_eq!(facts.carbs_g, 10.0);
    }

    #[test]
    fn test_out_of_range_calories_rejected() {
        let result = parse_nutrition_reply(
            r#"{"calories": 99999, "protein_g": 5, "carbs_g": 10, "fat_g": 3}"#,
        );
        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[test]
    fn test_negative_macro_rejected() {
        let result = parse_nutrition_reply(
            r#"{"calories": 100, "protein_g": -1, "carbs_g": 10, "fat_g": 3}"#,
        );
        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[test]
    fn test_prose_reply_rejected() {
        let result = parse_nutrition_reply("Sure! Here are the nutrition facts you asked for.");
        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }
}
