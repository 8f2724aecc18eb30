use chrono::{Duration, Utc};
use tracing::warn;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    nutrition::ports::LlmClient,
    preference::ports::PreferenceRepository,
    recipe::{
        entities::{Ingredient, Recipe, RecipeDraft, RecipeSource},
        helpers::normalize_title,
        ports::{RecipeCacheRepository, RecipeService, RecipeSourcePort, SearchCacheRepository},
        value_objects::{
            CreateRecipeInput, IngredientInput, RecipeFilter, SearchRecipesInput, SeedInput,
            SeedReport, UpdateRecipeInput,
        },
    },
};

fn build_query_key(input: &SearchRecipesInput) -> String {
    format!(
        "q:{}|c:{}|d:{}|l:{}",
        normalize_title(&input.query),
        input.cuisine.as_deref().unwrap_or("").to_lowercase(),
        input.diet.as_deref().unwrap_or("").to_lowercase(),
        input.limit
    )
}

fn ingredients_from_inputs(inputs: Vec<IngredientInput>) -> Vec<Ingredient> {
    inputs
        .into_iter()
        .map(|i| Ingredient {
            name: i.name,
            amount: i.amount,
            unit: i.unit,
            original: i.original,
        })
        .collect()
}

impl<RC, SC, PF, MS, SS, L, HC> Service<RC, SC, PF, MS, SS, L, HC>
where
    RC: RecipeCacheRepository,
    SC: SearchCacheRepository,
    PF: PreferenceRepository,
    MS: RecipeSourcePort,
    SS: RecipeSourcePort,
    L: LlmClient,
    HC: HealthCheckRepository,
{
    /// Queries every configured provider, skipping per-source failures.
    async fn fetch_from_sources(&self, input: &SearchRecipesInput) -> Vec<Recipe> {
        let mut fetched = Vec::new();

        if let Some(mealdb) = &self.mealdb_source {
            let result = match &input.cuisine {
                Some(cuisine) => mealdb.by_cuisine(cuisine, input.limit).await,
                None => mealdb.search(&input.query, input.limit).await,
            };
            match result {
                Ok(recipes) => fetched.extend(recipes),
                Err(e) => warn!("TheMealDB fetch failed, skipping source: {}", e),
            }
        }

        if let Some(spoonacular) = &self.spoonacular_source {
            let result = match &input.cuisine {
                Some(cuisine) => spoonacular.by_cuisine(cuisine, input.limit).await,
                None => spoonacular.search(&input.query, input.limit).await,
            };
            match result {
                Ok(recipes) => fetched.extend(recipes),
                Err(e) => warn!("Spoonacular fetch failed, skipping source: {}", e),
            }
        }

        fetched
    }

    async fn lookup_upstream(&self, id: &str) -> Result<Option<Recipe>, CoreError> {
        let Some((prefix, external_id)) = id.split_once('-') else {
            return Ok(None);
        };

        match RecipeSource::from_id_prefix(prefix) {
            Some(RecipeSource::MealDb) => match &self.mealdb_source {
                Some(source) => source.lookup(external_id).await,
                None => Ok(None),
            },
            Some(RecipeSource::Spoonacular) => match &self.spoonacular_source {
                Some(source) => source.lookup(external_id).await,
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }
}

impl<RC, SC, PF, MS, SS, L, HC> RecipeService for Service<RC, SC, PF, MS, SS, L, HC>
where
    RC: RecipeCacheRepository,
    SC: SearchCacheRepository,
    PF: PreferenceRepository,
    MS: RecipeSourcePort,
    SS: RecipeSourcePort,
    L: LlmClient,
    HC: HealthCheckRepository,
{
    async fn search_recipes(&self, input: SearchRecipesInput) -> Result<Vec<Recipe>, CoreError> {
        let max_age = Duration::minutes(self.config.store.search_cache_ttl_minutes);
        self.search_cache_repository.purge_expired(max_age).await?;

        let query_key = build_query_key(&input);
        if let Some(ids) = self
            .search_cache_repository
            .get_fresh(&query_key, max_age)
            .await?
        {
            let cached = self.recipe_repository.get_by_ids(&ids).await?;
            if !cached.is_empty() {
                return Ok(cached.into_iter().take(input.limit).collect());
            }
        }

        let filter = RecipeFilter {
            cuisine: input.cuisine.clone(),
            diet: input.diet.clone(),
            has_nutrition: None,
            limit: Some(input.limit),
        };
        let mut recipes = self.recipe_repository.search(&input.query, filter).await?;

        if recipes.len() < input.limit {
            let fetched = self.fetch_from_sources(&input).await;
            if !fetched.is_empty() {
                self.recipe_repository
                    .upsert_batch(fetched.clone())
                    .await?;
                for recipe in fetched {
                    if recipes.len() >= input.limit {
                        break;
                    }
                    if recipes.iter().all(|r| r.id != recipe.id) {
                        recipes.push(recipe);
                    }
                }
            }
        }

        let ids: Vec<String> = recipes.iter().map(|r| r.id.clone()).collect();
        self.search_cache_repository.put(&query_key, ids).await?;

        Ok(recipes)
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, CoreError> {
        if let Some(recipe) = self.recipe_repository.get_by_id(id).await? {
            return Ok(recipe);
        }

        if let Some(recipe) = self.lookup_upstream(id).await? {
            return self.recipe_repository.upsert(recipe).await;
        }

        Err(CoreError::NotFound)
    }

    async fn create_recipe(&self, input: CreateRecipeInput) -> Result<Recipe, CoreError> {
        let recipe = Recipe::new(RecipeDraft {
            title: input.title,
            description: input.description,
            source: Some(RecipeSource::User),
            cuisines: input.cuisines,
            diets: input.diets,
            tags: input.tags,
            ingredients: ingredients_from_inputs(input.ingredients),
            instructions: input.instructions,
            nutrition: input.nutrition,
            image_url: input.image_url,
            ..Default::default()
        })?;

        self.recipe_repository.upsert(recipe).await
    }

    async fn update_recipe(
        &self,
        id: &str,
        input: UpdateRecipeInput,
    ) -> Result<Recipe, CoreError> {
        let existing = self
            .recipe_repository
            .get_by_id(id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let updated = Recipe::new(RecipeDraft {
            id: Some(existing.id.clone()),
            title: input.title.unwrap_or(existing.title),
            description: input.description.unwrap_or(existing.description),
            source: Some(existing.source),
            cuisines: input.cuisines.unwrap_or(existing.cuisines),
            diets: input.diets.unwrap_or(existing.diets),
            tags: input.tags.unwrap_or(existing.tags),
            ingredients: input
                .ingredients
                .map(ingredients_from_inputs)
                .unwrap_or(existing.ingredients),
            instructions: input.instructions.unwrap_or(existing.instructions),
            nutrition: existing.nutrition,
            image_url: input.image_url.or(existing.image_url),
            created_at: Some(existing.created_at),
            updated_at: Some(Utc::now()),
        })?;

        self.recipe_repository.upsert(updated).await
    }

    async fn delete_recipe(&self, id: &str) -> Result<(), CoreError> {
        let deleted = self.recipe_repository.delete(&[id.to_string()]).await?;
        if deleted == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }

    async fn seed_recipes(&self, input: SeedInput) -> Result<SeedReport, CoreError> {
        let mut report = SeedReport::default();

        for cuisine in &input.cuisines {
            let mut batch = Vec::new();

            if let Some(mealdb) = &self.mealdb_source {
                match mealdb.by_cuisine(cuisine, input.limit_per_cuisine).await {
                    Ok(recipes) => batch.extend(recipes),
                    Err(e) => {
                        warn!("TheMealDB seed failed for cuisine '{}': {}", cuisine, e);
                        report.failed += 1;
                    }
                }
            }

            if let Some(spoonacular) = &self.spoonacular_source {
                match spoonacular
                    .by_cuisine(cuisine, input.limit_per_cuisine)
                    .await
                {
                    Ok(recipes) => batch.extend(recipes),
                    Err(e) => {
                        warn!("Spoonacular seed failed for cuisine '{}': {}", cuisine, e);
                        report.failed += 1;
                    }
                }
            }

            report.fetched += batch.len();
            if !batch.is_empty() {
                let (updated, inserted) = self.recipe_repository.upsert_batch(batch).await?;
                report.updated += updated;
                report.inserted += inserted;
            }
        }

        Ok(report)
    }
}
