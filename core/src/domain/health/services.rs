use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::StoreHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    nutrition::ports::LlmClient,
    preference::ports::PreferenceRepository,
    recipe::ports::{RecipeCacheRepository, RecipeSourcePort, SearchCacheRepository},
};

impl<RC, SC, PF, MS, SS, L, HC> HealthCheckService for Service<RC, SC, PF, MS, SS, L, HC>
where
    RC: RecipeCacheRepository,
    SC: SearchCacheRepository,
    PF: PreferenceRepository,
    MS: RecipeSourcePort,
    SS: RecipeSourcePort,
    L: LlmClient,
    HC: HealthCheckRepository,
{
    async fn readiness(&self) -> Result<StoreHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
