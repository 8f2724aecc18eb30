use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError, recipe::ports::SearchCacheRepository,
};
use crate::infrastructure::store::{DocumentEntry, DocumentStore};

#[derive(Debug, Serialize, Deserialize)]
struct SearchCacheDocument {
    recipe_ids: Vec<String>,
    fetched_at: DateTime<Utc>,
}

/// Search-result cache keyed by the normalized query key. One entry per
/// distinct query, refreshed on every write.
#[derive(Debug, Clone)]
pub struct StoreSearchCacheRepository {
    store: Arc<RwLock<DocumentStore>>,
}

impl StoreSearchCacheRepository {
    pub fn new(store: Arc<RwLock<DocumentStore>>) -> Self {
        Self { store }
    }
}

fn parse_document(entry: &DocumentEntry) -> Result<SearchCacheDocument, CoreError> {
    serde_json::from_value(entry.document.clone()).map_err(|e| {
        error!("Corrupt search cache entry '{}': {}", entry.id, e);
        CoreError::StoreError(format!("corrupt search cache entry '{}': {e}", entry.id))
    })
}

impl SearchCacheRepository for StoreSearchCacheRepository {
    async fn get_fresh(
        &self,
        query_key: &str,
        max_age: Duration,
    ) -> Result<Option<Vec<String>>, CoreError> {
        let store = self.store.read().map_err(|e| {
            error!("search cache lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;

        let Some(entry) = store.get(query_key) else {
            return Ok(None);
        };
        let document = parse_document(entry)?;

        if Utc::now() - document.fetched_at > max_age {
            return Ok(None);
        }
        Ok(Some(document.recipe_ids))
    }

    async fn put(&self, query_key: &str, recipe_ids: Vec<String>) -> Result<(), CoreError> {
        let document = serde_json::to_value(SearchCacheDocument {
            recipe_ids,
            fetched_at: Utc::now(),
        })
        .map_err(|_| CoreError::InternalServerError)?;

        let mut store = self.store.write().map_err(|e| {
            error!("search cache lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;
        store.upsert(vec![DocumentEntry {
            id: query_key.to_string(),
            document,
            metadata: HashMap::new(),
        }]);
        store.save().map_err(|e| {
            error!("Failed to persist search cache: {}", e);
            CoreError::StoreError(e.to_string())
        })?;

        Ok(())
    }

    async fn purge_expired(&self, max_age: Duration) -> Result<usize, CoreError> {
        let mut store = self.store.write().map_err(|e| {
            error!("search cache lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;

        let cutoff = Utc::now() - max_age;
        let stale: Vec<String> = store
            .get_all()
            .iter()
            .filter(|entry| match parse_document(entry) {
                Ok(doc) => doc.fetched_at < cutoff,
                // Unreadable entries are purged rather than kept forever.
                Err(_) => true,
            })
            .map(|entry| entry.id.clone())
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        let purged = store.delete(&stale);
        store.save().map_err(|e| {
            error!("Failed to persist search cache purge: {}", e);
            CoreError::StoreError(e.to_string())
        })?;

        Ok(purged)
    }

    async fn count(&self) -> Result<usize, CoreError> {
        let store = self.store.read().map_err(|e| {
            error!("search cache lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;
        Ok(store.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> (tempfile::TempDir, StoreSearchCacheRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "recipe_search_cache").unwrap();
        (
            dir,
            StoreSearchCacheRepository::new(Arc::new(RwLock::new(store))),
        )
    }

    #[tokio::test]
    async fn test_fresh_entry_is_returned() {
        let (_dir, repo) = repository();
        repo.put("q:curry|c:|d:|l:10", vec!["mealdb-1".to_string()])
            .await
            .unwrap();

        let ids = repo
            .get_fresh("q:curry|c:|d:|l:10", Duration::minutes(60))
            .await
            .unwrap();
        assert_eq!(ids, Some(vec!["mealdb-1".to_string()]));
    }

    #[tokio::test]
    async fn test_stale_entry_is_ignored() {
        let (_dir, repo) = repository();
        repo.put("q:curry|c:|d:|l:10", vec!["mealdb-1".to_string()])
            .await
            .unwrap();

        let ids = repo
            .get_fresh("q:curry|c:|d:|l:10", Duration::minutes(-1))
            .await
            .unwrap();
        assert_eq!(ids, None);
    }

    #[tokio::test]
    async fn test_purge_removes_only_stale_entries() {
        let (_dir, repo) = repository();
        repo.put("fresh", vec![]).await.unwrap();
        assert_eq!(repo.purge_expired(Duration::minutes(60)).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 1);

        assert_eq!(repo.purge_expired(Duration::minutes(-1)).await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_key_misses() {
        let (_dir, repo) = repository();
        let ids = repo
            .get_fresh("q:nothing|c:|d:|l:10", Duration::minutes(60))
            .await
            .unwrap();
        assert_eq!(ids, None);
    }
}
