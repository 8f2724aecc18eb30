use ladle_core::domain::preference::value_objects::PutPreferencesInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct PutPreferencesValidator {
    #[serde(default)]
    pub diets: Vec<String>,

    #[serde(default)]
    pub excluded_ingredients: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 10000.0, message = "target_calories out of range"))]
    pub target_calories: Option<f64>,
}

impl From<PutPreferencesValidator> for PutPreferencesInput {
    fn from(value: PutPreferencesValidator) -> Self {
        PutPreferencesInput {
            diets: value.diets,
            excluded_ingredients: value.excluded_ingredients,
            target_calories: value.target_calories,
        }
    }
}
