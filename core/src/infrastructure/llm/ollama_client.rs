use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{common::entities::app_errors::CoreError, nutrition::ports::LlmClient};

#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: Client::new(),
        }
    }
}

impl LlmClient for OllamaClient {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: format!(
                "{prompt}\n\nRespond with a single JSON object matching this schema: {response_schema}"
            ),
            stream: false,
            format: "json".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                CoreError::ExternalServiceError(format!("Ollama request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Ollama returned {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "Ollama returned {status}"
            )));
        }

        let generated: GenerateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            CoreError::ExternalServiceError(format!("malformed Ollama response: {e}"))
        })?;

        Ok(generated.response)
    }
}
