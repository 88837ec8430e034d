//! Refinement loop
//!
//! Takes previously generated code plus free-text feedback and asks the
//! backend for an improved version under a structured-output contract.
//! Unlike the generation pipeline, a backend failure here is user-visible:
//! there is no deterministic way to apply feedback, so the error propagates
//! instead of degrading.

pub mod session;

use crate::extract::{self, ExtractionError};
use crate::llm::{ChatBackend, LlmError};
use crate::pipeline::prompts;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub use session::{IterationHistory, IterationRecord};

/// Errors surfaced to the user by the refinement loop
#[derive(Debug, Error)]
pub enum RefineError {
    /// Input validation: nothing to refine yet
    #[error("No current code to refine. Generate a UI first.")]
    EmptyCode,

    /// Input validation: no feedback given
    #[error("Please provide feedback on what to improve.")]
    EmptyFeedback,

    /// Every extraction fallback was exhausted
    #[error("Could not parse the refinement response: {0}")]
    Parse(#[from] ExtractionError),

    /// The backend call itself failed
    #[error(transparent)]
    Backend(#[from] LlmError),
}

/// Structured result of one refinement call
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Refinement {
    #[serde(default)]
    pub refined_code: String,
    #[serde(default)]
    pub changes_made: Vec<String>,
    #[serde(default)]
    pub accessibility_notes: Vec<String>,
    #[serde(default)]
    pub design_notes: Vec<String>,
}

/// Refines generated code against user feedback
pub struct Refiner {
    backend: Arc<dyn ChatBackend>,
}

impl Refiner {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Refine `prior_code` according to `feedback`.
    ///
    /// Parsing is layered: lenient JSON first, then an anchor scan that
    /// recovers at least the refined code. Only when the `refined_code`
    /// anchor is absent does a parse error reach the caller, and no prior
    /// state is touched in that case.
    pub async fn refine(&self, prior_code: &str, feedback: &str) -> Result<Refinement, RefineError> {
        if prior_code.trim().is_empty() {
            return Err(RefineError::EmptyCode);
        }
        if feedback.trim().is_empty() {
            return Err(RefineError::EmptyFeedback);
        }

        let user_message = prompts::refine_user_message(prior_code, feedback);
        let raw = self.backend.invoke(prompts::REFINE_SYSTEM, &user_message).await?;
        debug!(chars = raw.len(), "refinement response received");

        let text = extract::extract_json_text(&raw);
        if let Some(value) = extract::parse_json_lenient(&text) {
            if let Ok(refinement) = serde_json::from_value::<Refinement>(value) {
                if !refinement.refined_code.trim().is_empty() {
                    return Ok(refinement);
                }
            }
        }

        let code = extract::scan_string_field(&text, "refined_code")?;
        warn!("structured refinement parse failed, recovered code via field scan");
        Ok(Refinement { refined_code: code, ..Refinement::default() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{FailingBackend, MockBackend};

    const WELL_FORMED: &str = r#"```json
{
    "refined_code": "@Composable\nfun Screen() {\n    Button(onClick = { }, modifier = Modifier.height(64.dp)) { Text(\"Go\") }\n}",
    "changes_made": ["Increased button height"],
    "accessibility_notes": ["Larger touch target"],
    "design_notes": ["More prominent call to action"]
}
```"#;

    #[tokio::test]
    async fn test_refine_parses_structured_response() {
        let backend = MockBackend::with_responses(vec![WELL_FORMED]);
        let refiner = Refiner::new(Arc::new(backend));
        let refinement =
            refiner.refine("fun Screen() {}", "make the button bigger").await.unwrap();
        assert!(refinement.refined_code.contains("height(64.dp)"));
        assert_eq!(refinement.changes_made, vec!["Increased button height"]);
        assert_eq!(refinement.accessibility_notes.len(), 1);
    }

    #[tokio::test]
    async fn test_refine_rejects_empty_inputs() {
        let refiner = Refiner::new(Arc::new(MockBackend::new()));
        assert!(matches!(
            refiner.refine("", "feedback").await,
            Err(RefineError::EmptyCode)
        ));
        assert!(matches!(
            refiner.refine("fun X() {}", "   ").await,
            Err(RefineError::EmptyFeedback)
        ));
    }

    #[tokio::test]
    async fn test_refine_recovers_code_from_malformed_json() {
        // trailing brace missing and raw newline: strict and lenient parses
        // both fail, the anchor scan still finds the code
        let malformed =
            "{\"refined_code\": \"fun Screen() {\\n    Text(\\\"Hi\\\")\\n}\", \"changes_made\": [";
        let backend = MockBackend::with_responses(vec![malformed]);
        let refiner = Refiner::new(Arc::new(backend));
        let refinement = refiner.refine("fun Screen() {}", "say hi").await.unwrap();
        assert_eq!(refinement.refined_code, "fun Screen() {\n    Text(\"Hi\")\n}");
        assert!(refinement.changes_made.is_empty());
    }

    #[tokio::test]
    async fn test_refine_surfaces_parse_error_without_anchor() {
        let backend = MockBackend::with_responses(vec!["I cannot help with that."]);
        let refiner = Refiner::new(Arc::new(backend));
        let result = refiner.refine("fun Screen() {}", "improve it").await;
        assert!(matches!(result, Err(RefineError::Parse(_))));
    }

    #[tokio::test]
    async fn test_refinement_appends_one_record_to_history() {
        let prior_code = "@Composable\nfun Screen() {\n    Text(\"Hi\")\n    Button(onClick = { }) { Text(\"Go\") }\n}";
        let mut history = IterationHistory::new();
        history.record_generation("two components", prior_code, "ok", "ok");
        let prior_max = history.records().last().unwrap().sequence;

        let backend = MockBackend::with_responses(vec![WELL_FORMED]);
        let refiner = Refiner::new(Arc::new(backend));
        let refinement =
            refiner.refine(prior_code, "make the button bigger").await.unwrap();
        let record = history.record_refinement(&refinement, "make the button bigger");

        assert_eq!(record.sequence, prior_max + 1);
        assert_ne!(record.code, prior_code);
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].code, prior_code);
    }

    #[tokio::test]
    async fn test_refine_surfaces_backend_error() {
        let refiner = Refiner::new(Arc::new(FailingBackend));
        let result = refiner.refine("fun Screen() {}", "improve it").await;
        assert!(matches!(result, Err(RefineError::Backend(_))));
    }
}
