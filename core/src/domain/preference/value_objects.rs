#[derive(Debug, Clone, Default)]
pub struct PutPreferencesInput {
    pub diets: Vec<String>,
    pub excluded_ingredients: Vec<String>,
    pub target_calories: Option<f64>,
}
