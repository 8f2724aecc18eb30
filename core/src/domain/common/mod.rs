use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct LadleConfig {
    pub store: StoreConfig,
    pub sources: SourcesConfig,
    pub llm: LlmConfig,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub data_dir: String,
    pub search_cache_ttl_minutes: i64,
}

#[derive(Clone, Debug)]
pub struct SourcesConfig {
    pub mealdb_enabled: bool,
    pub mealdb_base_url: String,
    pub spoonacular_api_key: Option<String>,
    pub spoonacular_base_url: String,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub ollama_base_url: Option<String>,
    pub ollama_model: String,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
