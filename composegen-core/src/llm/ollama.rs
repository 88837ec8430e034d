//! Ollama backend for local model execution
//!
//! Wraps the ollama-rs client so locally served models can drive the
//! pipeline without any cloud credential.

use super::config::BackendConfig;
use super::errors::{LlmError, LlmResult};
use super::provider::ChatBackend;
use async_trait::async_trait;
use ollama_rs::Ollama;
use ollama_rs::generation::chat::{ChatMessage, request::ChatMessageRequest};
use ollama_rs::models::ModelOptions;
use std::sync::Arc;

/// Ollama backend implementation
pub struct OllamaBackend {
    client: Arc<Ollama>,
    config: BackendConfig,
}

impl OllamaBackend {
    /// Create a new Ollama backend (doesn't connect yet)
    pub fn new(config: BackendConfig) -> Self {
        let (url, port) = split_base_url(&config.base_url);
        let client = Ollama::new(url, port);
        Self { client: Arc::new(client), config }
    }

    /// Check whether the endpoint is reachable
    pub async fn is_available(&self) -> bool {
        self.client.list_local_models().await.is_ok()
    }
}

/// Split a base URL like `http://localhost:11434` into the scheme+host part
/// and the port the client constructor expects.
fn split_base_url(base_url: &str) -> (String, u16) {
    let default_port = 11434;
    let rest = base_url
        .strip_prefix("http://")
        .or_else(|| base_url.strip_prefix("https://"))
        .unwrap_or(base_url);
    let scheme = if base_url.starts_with("https://") { "https" } else { "http" };

    match rest.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.trim_end_matches('/').parse().unwrap_or(default_port);
            (format!("{}://{}:{}", scheme, host, port), port)
        }
        None => {
            let host = rest.trim_end_matches('/');
            (format!("{}://{}:{}", scheme, host, default_port), default_port)
        }
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn invoke(&self, system: &str, user: &str) -> LlmResult<String> {
        let messages = vec![
            ChatMessage::system(system.to_string()),
            ChatMessage::user(user.to_string()),
        ];

        let options = ModelOptions::default().temperature(self.config.temperature);
        let request =
            ChatMessageRequest::new(self.config.model.clone(), messages).options(options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| LlmError::network(e.to_string()))?;

        Ok(response.message.content)
    }
}
