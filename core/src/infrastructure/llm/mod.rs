pub mod fallback;
pub mod ollama_client;
pub mod openai_client;
