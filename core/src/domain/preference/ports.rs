use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    preference::{entities::MealPreferences, value_objects::PutPreferencesInput},
};

/// Repository over the `meal_preferences` collection.
pub trait PreferenceRepository: Send + Sync {
    fn get(
        &self,
        profile_id: &str,
    ) -> impl Future<Output = Result<Option<MealPreferences>, CoreError>> + Send;

    fn put(
        &self,
        preferences: MealPreferences,
    ) -> impl Future<Output = Result<MealPreferences, CoreError>> + Send;
}

pub trait PreferenceService: Send + Sync {
    fn get_preferences(
        &self,
        profile_id: &str,
    ) -> impl Future<Output = Result<MealPreferences, CoreError>> + Send;

    fn put_preferences(
        &self,
        profile_id: &str,
        input: PutPreferencesInput,
    ) -> impl Future<Output = Result<MealPreferences, CoreError>> + Send;
}
