use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, recipe::helpers::normalize_tags,
};

const MAX_TARGET_CALORIES: f64 = 10_000.0;

/// Meal-planning preferences for one profile. Reads for an unknown
/// profile return the defaults rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPreferences {
    pub profile_id: String,
    pub diets: Vec<String>,
    pub excluded_ingredients: Vec<String>,
    pub target_calories: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl MealPreferences {
    pub fn default_for(profile_id: &str) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            diets: Vec::new(),
            excluded_ingredients: Vec::new(),
            target_calories: None,
            updated_at: Utc::now(),
        }
    }

    pub fn new(
        profile_id: &str,
        diets: Vec<String>,
        excluded_ingredients: Vec<String>,
        target_calories: Option<f64>,
    ) -> Result<Self, CoreError> {
        let profile_id = profile_id.trim();
        if profile_id.is_empty() {
            return Err(CoreError::Invalid("profile_id must not be empty".into()));
        }
        if let Some(calories) = target_calories
            && !(0.0..=MAX_TARGET_CALORIES).contains(&calories)
        {
            return Err(CoreError::Invalid(format!(
                "target_calories out of range: {calories}"
            )));
        }

        Ok(Self {
            profile_id: profile_id.to_string(),
            diets: normalize_tags(diets),
            excluded_ingredients: normalize_tags(excluded_ingredients),
            target_calories,
            updated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_calories() {
        let result = MealPreferences::new("p1", vec![], vec![], Some(-5.0));
        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_diets_are_deduplicated() {
        let prefs = MealPreferences::new(
            "p1",
            vec!["Vegan".into(), "vegan".into(), "Gluten Free".into()],
            vec![],
            None,
        )
        .unwrap();
        assert_eq!(prefs.diets, vec!["Vegan", "Gluten Free"]);
    }
}
