pub mod check;
pub mod demo;
pub mod generate;
pub mod refine;
pub mod session;

use anyhow::Result;
use composegen_core::llm::{BackendConfig, ChatBackend, build_backend};
use std::sync::Arc;

/// Build the process-wide backend from environment configuration.
///
/// Constructed once per command and passed by reference; there is no
/// global instance to re-initialize.
pub fn backend_from_env() -> Result<Arc<dyn ChatBackend>> {
    let config = BackendConfig::from_env()?;
    tracing::debug!(model = %config.model, "backend configured");
    Ok(build_backend(&config)?)
}
