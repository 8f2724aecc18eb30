pub mod mealdb;
pub mod spoonacular;
