use tracing::warn;

use crate::domain::{
    common::{LlmConfig, entities::app_errors::CoreError},
    nutrition::ports::LlmClient,
};
use crate::infrastructure::llm::{ollama_client::OllamaClient, openai_client::OpenAiClient};

#[derive(Debug, Clone)]
enum LlmBackend {
    OpenAi(OpenAiClient),
    Ollama(OllamaClient),
}

impl LlmClient for LlmBackend {
    fn name(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi(client) => client.name(),
            LlmBackend::Ollama(client) => client.name(),
        }
    }

    async fn generate(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        match self {
            LlmBackend::OpenAi(client) => client.generate(prompt, response_schema).await,
            LlmBackend::Ollama(client) => client.generate(prompt, response_schema).await,
        }
    }
}

/// Tries each backend in order and returns the first successful reply.
/// Failed backends are logged and the last error is surfaced when all of
/// them fail.
async fn first_success<B: LlmClient>(
    backends: &[B],
    prompt: String,
    response_schema: serde_json::Value,
) -> Result<String, CoreError> {
    let mut last_error = CoreError::ServiceUnavailable("no LLM backend configured".into());

    for backend in backends {
        match backend
            .generate(prompt.clone(), response_schema.clone())
            .await
        {
            Ok(reply) => return Ok(reply),
            Err(e) => {
                warn!("LLM backend '{}' failed, trying next: {}", backend.name(), e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Tries each configured backend in order, OpenAI before Ollama, and
/// returns the first successful reply.
#[derive(Debug, Clone)]
pub struct FallbackLlmClient {
    backends: Vec<LlmBackend>,
}

impl FallbackLlmClient {
    /// Returns `None` when no backend is configured.
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        let mut backends = Vec::new();

        if let Some(api_key) = &config.openai_api_key {
            backends.push(LlmBackend::OpenAi(OpenAiClient::new(
                api_key.clone(),
                config.openai_model.clone(),
            )));
        }
        if let Some(base_url) = &config.ollama_base_url {
            backends.push(LlmBackend::Ollama(OllamaClient::new(
                base_url.clone(),
                config.ollama_model.clone(),
            )));
        }

        if backends.is_empty() {
            return None;
        }
        Some(Self { backends })
    }
}

impl LlmClient for FallbackLlmClient {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn generate(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        first_success(&self.backends, prompt, response_schema).await
    }
}
