use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    nutrition::ports::LlmClient,
    preference::{
        entities::MealPreferences,
        ports::{PreferenceRepository, PreferenceService},
        value_objects::PutPreferencesInput,
    },
    recipe::ports::{RecipeCacheRepository, RecipeSourcePort, SearchCacheRepository},
};

impl<RC, SC, PF, MS, SS, L, HC> PreferenceService for Service<RC, SC, PF, MS, SS, L, HC>
where
    RC: RecipeCacheRepository,
    SC: SearchCacheRepository,
    PF: PreferenceRepository,
    MS: RecipeSourcePort,
    SS: RecipeSourcePort,
    L: LlmClient,
    HC: HealthCheckRepository,
{
    async fn get_preferences(&self, profile_id: &str) -> Result<MealPreferences, CoreError> {
        if profile_id.trim().is_empty() {
            return Err(CoreError::Invalid("profile_id must not be empty".into()));
        }

        let stored = self.preference_repository.get(profile_id).await?;
        Ok(stored.unwrap_or_else(|| MealPreferences::default_for(profile_id)))
    }

    async fn put_preferences(
        &self,
        profile_id: &str,
        input: PutPreferencesInput,
    ) -> Result<MealPreferences, CoreError> {
        let preferences = MealPreferences::new(
            profile_id,
            input.diets,
            input.excluded_ingredients,
            input.target_calories,
        )?;

        self.preference_repository.put(preferences).await
    }
}
