use std::sync::{Arc, RwLock};

use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::Recipe,
        helpers::normalize_title,
        ports::RecipeCacheRepository,
        value_objects::RecipeFilter,
    },
};
use crate::infrastructure::{
    recipe::mappers::{entry_to_recipe, recipe_to_entry},
    store::{DocumentEntry, DocumentStore},
};

#[derive(Debug, Clone)]
pub struct StoreRecipeRepository {
    store: Arc<RwLock<DocumentStore>>,
}

impl StoreRecipeRepository {
    pub fn new(store: Arc<RwLock<DocumentStore>>) -> Self {
        Self { store }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, DocumentStore>, CoreError> {
        self.store.read().map_err(|e| {
            error!("recipe store lock poisoned: {}", e);
            CoreError::InternalServerError
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, DocumentStore>, CoreError> {
        self.store.write().map_err(|e| {
            error!("recipe store lock poisoned: {}", e);
            CoreError::InternalServerError
        })
    }
}

fn metadata_matches(entry: &DocumentEntry, filter: &RecipeFilter) -> bool {
    if let Some(cuisine) = &filter.cuisine {
        let wanted = cuisine.to_lowercase();
        let listed = entry.metadata.get("cuisines").and_then(|v| v.as_array());
        if !listed.is_some_and(|values| values.iter().any(|v| v.as_str() == Some(&wanted))) {
            return false;
        }
    }
    if let Some(diet) = &filter.diet {
        let wanted = diet.to_lowercase();
        let listed = entry.metadata.get("diets").and_then(|v| v.as_array());
        if !listed.is_some_and(|values| values.iter().any(|v| v.as_str() == Some(&wanted))) {
            return false;
        }
    }
    if let Some(wanted) = filter.has_nutrition {
        let has = entry
            .metadata
            .get("has_nutrition")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if has != wanted {
            return false;
        }
    }
    true
}

fn title_matches(entry: &DocumentEntry, query_key: &str) -> bool {
    if query_key.is_empty() {
        return true;
    }
    let Some(title_key) = entry.metadata.get("title_key").and_then(|v| v.as_str()) else {
        return false;
    };
    title_key.contains(query_key)
        || query_key
            .split_whitespace()
            .all(|word| title_key.contains(word))
}

impl RecipeCacheRepository for StoreRecipeRepository {
    async fn upsert(&self, recipe: Recipe) -> Result<Recipe, CoreError> {
        let entry = recipe_to_entry(&recipe)?;
        let mut store = self.write()?;
        store.upsert(vec![entry]);
        store.save().map_err(|e| {
            error!("Failed to persist recipe '{}': {}", recipe.id, e);
            CoreError::StoreError(e.to_string())
        })?;

        Ok(recipe)
    }

    async fn upsert_batch(&self, recipes: Vec<Recipe>) -> Result<(usize, usize), CoreError> {
        let entries = recipes
            .iter()
            .map(recipe_to_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let mut store = self.write()?;
        let (updated, inserted) = store.upsert(entries);
        store.save().map_err(|e| {
            error!("Failed to persist recipe batch: {}", e);
            CoreError::StoreError(e.to_string())
        })?;

        Ok((updated.len(), inserted.len()))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, CoreError> {
        let store = self.read()?;
        store.get(id).map(entry_to_recipe).transpose()
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Recipe>, CoreError> {
        let store = self.read()?;
        store
            .get_many(ids)
            .into_iter()
            .map(entry_to_recipe)
            .collect()
    }

    async fn get_all(&self) -> Result<Vec<Recipe>, CoreError> {
        let store = self.read()?;
        store.get_all().iter().map(entry_to_recipe).collect()
    }

    async fn search(&self, query: &str, filter: RecipeFilter) -> Result<Vec<Recipe>, CoreError> {
        let query_key = normalize_title(query);
        let limit = filter.limit.unwrap_or(usize::MAX);

        let store = self.read()?;
        store
            .filter(|entry| metadata_matches(entry, &filter) && title_matches(entry, &query_key))
            .into_iter()
            .take(limit)
            .map(entry_to_recipe)
            .collect()
    }

    async fn delete(&self, ids: &[String]) -> Result<usize, CoreError> {
        let mut store = self.write()?;
        let deleted = store.delete(ids);
        if deleted > 0 {
            store.save().map_err(|e| {
                error!("Failed to persist recipe deletion: {}", e);
                CoreError::StoreError(e.to_string())
            })?;
        }
        Ok(deleted)
    }

    async fn count(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::{NutritionFacts, RecipeDraft};

    fn repository() -> (tempfile::TempDir, StoreRecipeRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "recipe_details_cache").unwrap();
        (dir, StoreRecipeRepository::new(Arc::new(RwLock::new(store))))
    }

    fn recipe(title: &str, cuisine: &str) -> Recipe {
        Recipe::new(RecipeDraft {
            title: title.to_string(),
            cuisines: vec![cuisine.to_string()],
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_matches_title_substring() {
        let (_dir, repo) = repository();
        repo.upsert(recipe("Chicken Tikka Masala", "Indian"))
            .await
            .unwrap();
        repo.upsert(recipe("Beef Wellington", "British"))
            .await
            .unwrap();

        let found = repo
            .search("tikka", RecipeFilter::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Chicken Tikka Masala");
    }

    #[tokio::test]
    async fn test_search_matches_all_query_words() {
        let (_dir, repo) = repository();
        repo.upsert(recipe("Slow Roasted Garlic Chicken", "French"))
            .await
            .unwrap();

        let found = repo
            .search("chicken garlic", RecipeFilter::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_cuisine_filter_is_case_insensitive() {
        let (_dir, repo) = repository();
        repo.upsert(recipe("Pad Thai", "Thai")).await.unwrap();

        let filter = RecipeFilter {
            cuisine: Some("THAI".to_string()),
            ..Default::default()
        };
        let found = repo.search("", filter).await.unwrap();
        assert_eq!(found.len(), 1);

        let filter = RecipeFilter {
            cuisine: Some("Mexican".to_string()),
            ..Default::default()
        };
        assert!(repo.search("", filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_has_nutrition_filter() {
        let (_dir, repo) = repository();
        let mut with = recipe("Full Facts", "Fusion");
        with.nutrition = Some(NutritionFacts {
            calories: 100.0,
            protein_g: 1.0,
            carbs_g: 2.0,
            fat_g: 3.0,
        });
        repo.upsert(with).await.unwrap();
        repo.upsert(recipe("No Facts", "Fusion")).await.unwrap();

        let filter = RecipeFilter {
            has_nutrition: Some(false),
            ..Default::default()
        };
        let found = repo.search("", filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "No Facts");
    }

    #[tokio::test]
    async fn test_delete_reports_count() {
        let (_dir, repo) = repository();
        let kept = repo.upsert(recipe("Keeper", "Greek")).await.unwrap();
        let doomed = repo.upsert(recipe("Doomed", "Greek")).await.unwrap();

        let deleted = repo.delete(&[doomed.id, "missing".to_string()]).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(repo.get_by_id(&kept.id).await.unwrap().is_some());
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
