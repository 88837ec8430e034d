//! Backend provider trait
//!
//! A unified seam over the generation backends: one system instruction and
//! one user message in, free-form text out. The pipeline and the refinement
//! loop only ever see this trait.

use super::config::{BackendConfig, BackendKind};
use super::errors::LlmResult;
use super::ollama::OllamaBackend;
use super::openai::OpenAiBackend;
use async_trait::async_trait;
use std::sync::Arc;

/// Common trait for all generation backends
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Name of this backend
    fn name(&self) -> &str;

    /// Model this backend is configured for
    fn model(&self) -> &str;

    /// Send one system instruction plus one user message, returning the
    /// assistant's raw text response.
    async fn invoke(&self, system: &str, user: &str) -> LlmResult<String>;
}

/// Build the backend selected by the configuration.
pub fn build_backend(config: &BackendConfig) -> LlmResult<Arc<dyn ChatBackend>> {
    match config.kind {
        BackendKind::OpenAi => Ok(Arc::new(OpenAiBackend::new(config.clone())?)),
        BackendKind::Ollama => Ok(Arc::new(OllamaBackend::new(config.clone()))),
    }
}
