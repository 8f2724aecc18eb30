pub mod recipe;

pub use recipe::{Ingredient, NutritionFacts, Recipe, RecipeDraft, RecipeSource};
