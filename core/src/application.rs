use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use tracing::info;

use crate::domain::common::{LadleConfig, services::Service};
use crate::infrastructure::{
    health::StoreHealthCheck,
    llm::fallback::FallbackLlmClient,
    preference::repository::StorePreferenceRepository,
    recipe::repositories::{
        recipe_repository::StoreRecipeRepository,
        search_cache_repository::StoreSearchCacheRepository,
    },
    sources::{mealdb::MealDbClient, spoonacular::SpoonacularClient},
    store::DocumentStore,
};

pub type LadleService = Service<
    StoreRecipeRepository,
    StoreSearchCacheRepository,
    StorePreferenceRepository,
    MealDbClient,
    SpoonacularClient,
    FallbackLlmClient,
    StoreHealthCheck,
>;

/// Opens the backing collections and wires every adapter into the
/// aggregate service.
pub async fn create_service(config: LadleConfig) -> anyhow::Result<LadleService> {
    let data_dir = Path::new(&config.store.data_dir);
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let details = Arc::new(RwLock::new(DocumentStore::open(
        data_dir,
        "recipe_details_cache",
    )?));
    let search_cache = Arc::new(RwLock::new(DocumentStore::open(
        data_dir,
        "recipe_search_cache",
    )?));
    let preferences = Arc::new(RwLock::new(DocumentStore::open(
        data_dir,
        "meal_preferences",
    )?));

    let mealdb = config
        .sources
        .mealdb_enabled
        .then(|| MealDbClient::new(config.sources.mealdb_base_url.clone()));
    let spoonacular = config.sources.spoonacular_api_key.as_ref().map(|key| {
        SpoonacularClient::new(config.sources.spoonacular_base_url.clone(), key.clone())
    });
    let llm_client = FallbackLlmClient::from_config(&config.llm);

    info!(
        data_dir = %data_dir.display(),
        mealdb = mealdb.is_some(),
        spoonacular = spoonacular.is_some(),
        llm = llm_client.is_some(),
        "ladle service initialized"
    );

    Ok(Service::new(
        config,
        StoreRecipeRepository::new(Arc::clone(&details)),
        StoreSearchCacheRepository::new(search_cache),
        StorePreferenceRepository::new(preferences),
        mealdb,
        spoonacular,
        llm_client,
        StoreHealthCheck::new(details),
    ))
}
