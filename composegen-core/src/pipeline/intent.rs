//! Intent-parsing stage

use super::StageOutcome;
use super::prompts;
use super::state::ParsedIntent;
use crate::extract;
use crate::llm::ChatBackend;
use tracing::{debug, warn};

/// Parse the user description into a structured intent.
///
/// Delegates to the backend with a JSON contract; any failure along the way
/// (network, extraction, shape mismatch) substitutes the deterministic
/// fallback intent so the pipeline always proceeds.
pub async fn parse_intent(backend: &dyn ChatBackend, user_input: &str) -> StageOutcome<ParsedIntent> {
    debug!(input = user_input, "analyzing user intent");

    let raw = match backend.invoke(prompts::INTENT_SYSTEM, user_input).await {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, "intent backend call failed");
            return StageOutcome::Fallback {
                value: ParsedIntent::fallback(),
                reason: format!("backend call failed: {}", error),
            };
        }
    };

    let text = extract::extract_json_text(&raw);
    let parsed = extract::parse_json_lenient(&text)
        .and_then(|value| serde_json::from_value::<ParsedIntent>(value).ok());

    match parsed {
        Some(intent) => {
            debug!(
                elements = intent.ui_elements.len(),
                layout = intent.layout_type.as_str(),
                "intent extracted"
            );
            StageOutcome::Primary(intent)
        }
        None => {
            warn!("intent response was not parseable JSON, using fallback intent");
            StageOutcome::Fallback {
                value: ParsedIntent::fallback(),
                reason: "unparseable intent response".to_string(),
            }
        }
    }
}
