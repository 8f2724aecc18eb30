use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    preference::{entities::MealPreferences, ports::PreferenceRepository},
};
use crate::infrastructure::store::{DocumentEntry, DocumentStore};

/// Preferences keyed by profile id, one document per profile.
#[derive(Debug, Clone)]
pub struct StorePreferenceRepository {
    store: Arc<RwLock<DocumentStore>>,
}

impl StorePreferenceRepository {
    pub fn new(store: Arc<RwLock<DocumentStore>>) -> Self {
        Self { store }
    }
}

impl PreferenceRepository for StorePreferenceRepository {
    async fn get(&self, profile_id: &str) -> Result<Option<MealPreferences>, CoreError> {
        let store = self.store.read().map_err(|e| {
            error!("preference store lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;

        store
            .get(profile_id)
            .map(|entry| {
                serde_json::from_value(entry.document.clone()).map_err(|e| {
                    error!("Corrupt preferences for '{}': {}", profile_id, e);
                    CoreError::StoreError(format!("corrupt preferences '{profile_id}': {e}"))
                })
            })
            .transpose()
    }

    async fn put(&self, preferences: MealPreferences) -> Result<MealPreferences, CoreError> {
        let document = serde_json::to_value(&preferences).map_err(|e| {
            error!("Failed to serialize preferences: {}", e);
            CoreError::InternalServerError
        })?;

        let mut store = self.store.write().map_err(|e| {
            error!("preference store lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;
        store.upsert(vec![DocumentEntry {
            id: preferences.profile_id.clone(),
            document,
            metadata: HashMap::new(),
        }]);
        store.save().map_err(|e| {
            error!("Failed to persist preferences: {}", e);
            CoreError::StoreError(e.to_string())
        })?;

        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "meal_preferences").unwrap();
        let repo = StorePreferenceRepository::new(Arc::new(RwLock::new(store)));

        assert!(repo.get("p1").await.unwrap().is_none());

        let prefs = MealPreferences::new(
            "p1",
            vec!["vegetarian".to_string()],
            vec!["peanuts".to_string()],
            Some(2000.0),
        )
        .unwrap();
        repo.put(prefs.clone()).await.unwrap();

        let stored = repo.get("p1").await.unwrap().unwrap();
        assert_eq!(stored, prefs);
    }
}
