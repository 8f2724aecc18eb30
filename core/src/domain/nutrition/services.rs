use tracing::{error, info};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    nutrition::{
        entities::BackfillReport,
        ports::{LlmClient, NutritionService},
        schema::{build_nutrition_prompt, get_nutrition_schema, parse_nutrition_reply},
    },
    preference::ports::PreferenceRepository,
    recipe::{
        entities::NutritionFacts,
        ports::{RecipeCacheRepository, RecipeSourcePort, SearchCacheRepository},
    },
};

impl<RC, SC, PF, MS, SS, L, HC> NutritionService for Service<RC, SC, PF, MS, SS, L, HC>
where
    RC: RecipeCacheRepository,
    SC: SearchCacheRepository,
    PF: PreferenceRepository,
    MS: RecipeSourcePort,
    SS: RecipeSourcePort,
    L: LlmClient,
    HC: HealthCheckRepository,
{
    async fn estimate_nutrition(&self, recipe_id: &str) -> Result<NutritionFacts, CoreError> {
        let mut recipe = self
            .recipe_repository
            .get_by_id(recipe_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let llm = self.llm_client.as_ref().ok_or_else(|| {
            CoreError::ServiceUnavailable("no nutrition estimation backend configured".into())
        })?;

        let prompt = build_nutrition_prompt(&recipe);
        let raw = llm.generate(prompt, get_nutrition_schema()).await?;
        let facts = parse_nutrition_reply(&raw)?;

        recipe.set_nutrition(facts.clone());
        self.recipe_repository.upsert(recipe).await?;

        Ok(facts)
    }

    async fn backfill_nutrition(&self, limit: usize) -> Result<BackfillReport, CoreError> {
        if self.llm_client.is_none() {
            return Err(CoreError::ServiceUnavailable(
                "no nutrition estimation backend configured".into(),
            ));
        }

        let recipes = self.recipe_repository.get_all().await?;
        let mut report = BackfillReport::default();

        for recipe in recipes {
            report.scanned += 1;
            if recipe.nutrition.is_some() {
                report.skipped += 1;
                continue;
            }
            if report.estimated >= limit {
                report.skipped += 1;
                continue;
            }

            match self.estimate_nutrition(&recipe.id).await {
                Ok(_) => report.estimated += 1,
                Err(e) => {
                    error!("nutrition backfill failed for '{}': {}", recipe.id, e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "nutrition backfill finished: {} estimated, {} skipped, {} failed",
            report.estimated, report.skipped, report.failed
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{
        Arc, RwLock,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::domain::common::{LadleConfig, LlmConfig, SourcesConfig, StoreConfig};
    use crate::domain::recipe::entities::{Recipe, RecipeDraft};
    use crate::infrastructure::{
        health::StoreHealthCheck,
        preference::repository::StorePreferenceRepository,
        recipe::repositories::{
            recipe_repository::StoreRecipeRepository,
            search_cache_repository::StoreSearchCacheRepository,
        },
        sources::{mealdb::MealDbClient, spoonacular::SpoonacularClient},
        store::DocumentStore,
    };

    struct CountingLlm {
        calls: Arc<AtomicUsize>,
    }

    impl LlmClient for CountingLlm {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn generate(
            &self,
            _prompt: String,
            _response_schema: serde_json::Value,
        ) -> Result<String, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(
                r#"{"calories": 420.0, "protein_g": 21.0, "carbs_g": 35.0, "fat_g": 12.0}"#
                    .to_string(),
            )
        }
    }

    fn test_config(dir: &Path) -> LadleConfig {
        LadleConfig {
            store: StoreConfig {
                data_dir: dir.to_string_lossy().into_owned(),
                search_cache_ttl_minutes: 60,
            },
            sources: SourcesConfig {
                mealdb_enabled: false,
                mealdb_base_url: String::new(),
                spoonacular_api_key: None,
                spoonacular_base_url: String::new(),
            },
            llm: LlmConfig {
                openai_api_key: None,
                openai_model: String::new(),
                ollama_base_url: None,
                ollama_model: String::new(),
            },
        }
    }

    fn recipe(title: &str, nutrition: Option<NutritionFacts>) -> Recipe {
        Recipe::new(RecipeDraft {
            title: title.to_string(),
            nutrition,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_backfill_never_reestimates_filled_records() {
        let dir = tempfile::tempdir().unwrap();
        let details = Arc::new(RwLock::new(
            DocumentStore::open(dir.path(), "recipe_details_cache").unwrap(),
        ));
        let search = Arc::new(RwLock::new(
            DocumentStore::open(dir.path(), "recipe_search_cache").unwrap(),
        ));
        let prefs = Arc::new(RwLock::new(
            DocumentStore::open(dir.path(), "meal_preferences").unwrap(),
        ));

        let calls = Arc::new(AtomicUsize::new(0));
        let service: Service<_, _, _, MealDbClient, SpoonacularClient, _, _> = Service::new(
            test_config(dir.path()),
            StoreRecipeRepository::new(Arc::clone(&details)),
            StoreSearchCacheRepository::new(search),
            StorePreferenceRepository::new(prefs),
            None,
            None,
            Some(CountingLlm {
                calls: Arc::clone(&calls),
            }),
            StoreHealthCheck::new(details),
        );

        let filled = service
            .recipe_repository
            .upsert(recipe(
                "Filled",
                Some(NutritionFacts {
                    calories: 100.0,
                    protein_g: 10.0,
                    carbs_g: 20.0,
                    fat_g: 5.0,
                }),
            ))
            .await
            .unwrap();
        let empty = service
            .recipe_repository
            .upsert(recipe("Empty", None))
            .await
            .unwrap();

        let first = service.backfill_nutrition(10).await.unwrap();
        assert_eq!(first.estimated, 1);
        assert_eq!(first.skipped, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = service.backfill_nutrition(10).await.unwrap();
        assert_eq!(second.estimated, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(second.failed, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stored = service
            .recipe_repository
            .get_by_id(&filled.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.nutrition.as_ref().unwrap().calories, 100.0);
        assert_eq!(stored.updated_at, filled.updated_at);

        let estimated = service
            .recipe_repository
            .get_by_id(&empty.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(estimated.nutrition.unwrap().calories, 420.0);
    }
}
