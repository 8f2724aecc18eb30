pub mod analyze_recipe_nutrition;
