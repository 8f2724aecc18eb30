use clap::Parser;
use ladle_core::domain::common::{LadleConfig, LlmConfig, SourcesConfig, StoreConfig};

#[derive(Debug, Clone, Parser)]
pub struct ServerArgs {
    #[clap(long, env = "PORT", default_value = "3333")]
    pub port: u16,

    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Prefix prepended to every route, e.g. `/ladle`.
    #[clap(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[clap(
        long,
        env = "ALLOWED_ORIGINS",
        default_value = "http://localhost:5173",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,

    /// Shared secret for the admin endpoints. When unset, the admin
    /// surface answers 503.
    #[clap(long, env = "ADMIN_TOKEN")]
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct StoreArgs {
    #[clap(long, env = "LADLE_DATA_DIR", default_value = "./data")]
    pub data_dir: String,

    #[clap(long, env = "SEARCH_CACHE_TTL_MINUTES", default_value = "1440")]
    pub search_cache_ttl_minutes: i64,
}

#[derive(Debug, Clone, Parser)]
pub struct SourceArgs {
    #[clap(
        long,
        env = "MEALDB_ENABLED",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub mealdb_enabled: bool,

    #[clap(
        long,
        env = "MEALDB_BASE_URL",
        default_value = "https://www.themealdb.com/api/json/v1/1"
    )]
    pub mealdb_base_url: String,

    #[clap(long, env = "SPOONACULAR_API_KEY")]
    pub spoonacular_api_key: Option<String>,

    #[clap(
        long,
        env = "SPOONACULAR_BASE_URL",
        default_value = "https://api.spoonacular.com"
    )]
    pub spoonacular_base_url: String,
}

#[derive(Debug, Clone, Parser)]
pub struct LlmArgs {
    #[clap(long, env = "OPENAI_API_KEY")]
    pub openai_api_key: Option<String>,

    #[clap(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub openai_model: String,

    #[clap(long, env = "OLLAMA_BASE_URL")]
    pub ollama_base_url: Option<String>,

    #[clap(long, env = "OLLAMA_MODEL", default_value = "llama3.1")]
    pub ollama_model: String,
}

#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

impl From<Args> for LadleConfig {
    fn from(args: Args) -> Self {
        LadleConfig {
            store: StoreConfig {
                data_dir: args.store.data_dir,
                search_cache_ttl_minutes: args.store.search_cache_ttl_minutes,
            },
            sources: SourcesConfig {
                mealdb_enabled: args.sources.mealdb_enabled,
                mealdb_base_url: args.sources.mealdb_base_url,
                spoonacular_api_key: args.sources.spoonacular_api_key,
                spoonacular_base_url: args.sources.spoonacular_base_url,
            },
            llm: LlmConfig {
                openai_api_key: args.llm.openai_api_key,
                openai_model: args.llm.openai_model,
                ollama_base_url: args.llm.ollama_base_url,
                ollama_model: args.llm.ollama_model,
            },
        }
    }
}
