use std::future::Future;

use chrono::Duration;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{Recipe, RecipeSource},
        value_objects::{
            CreateRecipeInput, RecipeFilter, SearchRecipesInput, SeedInput, SeedReport,
            UpdateRecipeInput,
        },
    },
};

/// Repository over the `recipe_details_cache` collection.
pub trait RecipeCacheRepository: Send + Sync {
    fn upsert(&self, recipe: Recipe) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    /// Returns `(updated, inserted)` counts.
    fn upsert_batch(
        &self,
        recipes: Vec<Recipe>,
    ) -> impl Future<Output = Result<(usize, usize), CoreError>> + Send;

    fn get_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Recipe>, CoreError>> + Send;

    fn get_by_ids(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    /// Substring/keyword match on the normalized title, narrowed by the
    /// metadata filter.
    fn search(
        &self,
        query: &str,
        filter: RecipeFilter,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn delete(&self, ids: &[String]) -> impl Future<Output = Result<usize, CoreError>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize, CoreError>> + Send;
}

/// Repository over the `recipe_search_cache` collection.
pub trait SearchCacheRepository: Send + Sync {
    fn get_fresh(
        &self,
        query_key: &str,
        max_age: Duration,
    ) -> impl Future<Output = Result<Option<Vec<String>>, CoreError>> + Send;

    fn put(
        &self,
        query_key: &str,
        recipe_ids: Vec<String>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn purge_expired(
        &self,
        max_age: Duration,
    ) -> impl Future<Output = Result<usize, CoreError>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize, CoreError>> + Send;
}

/// An external recipe provider (TheMealDB, Spoonacular). Implementations
/// return canonical records; normalization happens at the adapter edge.
pub trait RecipeSourcePort: Send + Sync {
    fn source(&self) -> RecipeSource;

    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn by_cuisine(
        &self,
        cuisine: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn lookup(
        &self,
        external_id: &str,
    ) -> impl Future<Output = Result<Option<Recipe>, CoreError>> + Send;
}

pub trait RecipeService: Send + Sync {
    fn search_recipes(
        &self,
        input: SearchRecipesInput,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn get_recipe(&self, id: &str) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    fn create_recipe(
        &self,
        input: CreateRecipeInput,
    ) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    fn update_recipe(
        &self,
        id: &str,
        input: UpdateRecipeInput,
    ) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    fn delete_recipe(&self, id: &str) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn seed_recipes(
        &self,
        input: SeedInput,
    ) -> impl Future<Output = Result<SeedReport, CoreError>> + Send;
}
