//! OpenAI-compatible cloud backend
//!
//! Speaks the chat-completions protocol over HTTP. Works against the
//! official endpoint and against any service exposing a compatible API
//! at a different base URL.

use super::config::BackendConfig;
use super::errors::{LlmError, LlmResult};
use super::provider::ChatBackend;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat backend
pub struct OpenAiBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

impl OpenAiBackend {
    pub fn new(config: BackendConfig) -> LlmResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> LlmResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::auth("OpenAI API key not configured"))
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn invoke(&self, system: &str, user: &str) -> LlmResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                WireMessage { role: "system".to_string(), content: system.to_string() },
                WireMessage { role: "user".to_string(), content: user.to_string() },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key()?))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::api(status.as_u16(), body));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::parse("Response contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::config::BackendKind;

    #[test]
    fn test_backend_creation() {
        let config = BackendConfig {
            kind: BackendKind::OpenAi,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: Some("sk-test".to_string()),
            ..BackendConfig::default()
        };
        let backend = OpenAiBackend::new(config).unwrap();
        assert_eq!(backend.name(), "openai");
        assert_eq!(backend.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_missing_key_is_auth_error() {
        let config = BackendConfig {
            kind: BackendKind::OpenAi,
            api_key: None,
            ..BackendConfig::default()
        };
        let backend = OpenAiBackend::new(config).unwrap();
        assert!(matches!(backend.api_key(), Err(LlmError::AuthenticationError { .. })));
    }
}
