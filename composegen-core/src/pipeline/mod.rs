//! Generation pipeline
//!
//! A fixed forward sequence of stages turns a natural-language description
//! into Compose code plus review findings:
//!
//! start → intent_parsed → layout_planned → code_generated →
//! accessibility_reviewed → ui_reviewed → complete
//!
//! There are no branches, no cycles, and no retries. Stages that talk to
//! the backend own their own fallback, so a run always reaches `complete`
//! even when the backend is entirely unreachable.

pub mod codegen;
pub mod intent;
pub mod layout;
pub mod prompts;
pub mod report;
pub mod review;
pub mod state;

use crate::lint::{self, CompilationOutcome, CompileChecker, LintFinding};
use crate::llm::ChatBackend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

pub use state::{
    ComponentKind, GenerationRequest, LayoutKind, LayoutPlan, ParsedIntent, PipelineState,
    PlannedComponent, Stage, UiElement,
};

/// Result of a step that can degrade to a deterministic alternative.
///
/// Backend and parse failures are ordinary values here, not propagating
/// faults: every call site treats failure as "use the fallback".
#[derive(Debug, Clone)]
pub enum StageOutcome<T> {
    /// The step produced its primary result
    Primary(T),
    /// The step degraded to the deterministic alternative
    Fallback { value: T, reason: String },
}

impl<T> StageOutcome<T> {
    pub fn into_value(self) -> T {
        match self {
            Self::Primary(value) => value,
            Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Self::Primary(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Validation results attached to a run when validation was requested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings from the static validator, before any fix was applied
    pub lint_findings: Vec<LintFinding>,
    /// Import lines the auto-fixer inserted
    pub auto_fixes_applied: Vec<String>,
    /// Best-effort compilation outcome for the (fixed) code
    pub compilation: CompilationOutcome,
}

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub state: PipelineState,
    pub validation: Option<ValidationReport>,
}

impl PipelineRun {
    /// The report split into files when multi-file mode was requested,
    /// otherwise a single `Main.kt` entry.
    pub fn files(&self) -> BTreeMap<String, String> {
        if self.state.multi_file_mode {
            report::split_files(&self.state.final_report)
        } else {
            BTreeMap::from([("Main.kt".to_string(), self.state.final_report.clone())])
        }
    }
}

/// How the code-generation stage produces its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodegenMode {
    /// Delegate to the backend, falling back to the template on failure
    #[default]
    Delegated,
    /// Deterministic template construction only, for reproducible runs
    Template,
}

/// Pipeline driver
pub struct UiGenerator {
    backend: Arc<dyn ChatBackend>,
    codegen_mode: CodegenMode,
    compile_checker: CompileChecker,
}

impl UiGenerator {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            codegen_mode: CodegenMode::Delegated,
            compile_checker: CompileChecker::default(),
        }
    }

    pub fn with_codegen_mode(mut self, mode: CodegenMode) -> Self {
        self.codegen_mode = mode;
        self
    }

    /// Run the full pipeline for one request.
    ///
    /// Always reaches the `Complete` stage; the worst case is a degraded,
    /// template-based result, never an error.
    pub async fn run(&self, request: GenerationRequest) -> PipelineRun {
        let mut state = PipelineState::new(request);
        info!(input = %state.user_input, "starting generation pipeline");

        let intent = intent::parse_intent(self.backend.as_ref(), &state.user_input).await;
        if let Some(reason) = intent.fallback_reason() {
            warn!(reason, "intent stage degraded");
        }
        state.apply_intent(intent.into_value());

        state.apply_layout(layout::plan_layout(&state.parsed_intent));

        let generated = match self.codegen_mode {
            CodegenMode::Template => {
                StageOutcome::Primary(codegen::generate_template(&state.layout_plan))
            }
            CodegenMode::Delegated => {
                codegen::generate_delegated(self.backend.as_ref(), &state).await
            }
        };
        if let Some(reason) = generated.fallback_reason() {
            warn!(reason, "generation stage degraded");
        }
        let mut code = generated.into_value();

        let mut validation = None;
        if state.validate_requested {
            let lint_findings = lint::validate(&code);
            let auto_fixes_applied = lint::missing_import_lines(&code);
            code = lint::auto_fix(&code);
            let compilation = self.compile_checker.check(&code).await;
            info!(
                findings = lint_findings.len(),
                fixes = auto_fixes_applied.len(),
                compiled = compilation.success,
                "validation complete"
            );
            validation = Some(ValidationReport { lint_findings, auto_fixes_applied, compilation });
        }
        state.apply_code(code);

        state.apply_accessibility(review::review_accessibility(&state.generated_code));
        state.apply_design(review::review_design(&state.generated_code));

        let assembled = report::assemble_report(&state);
        state.apply_report(assembled);
        info!("pipeline complete");

        PipelineRun { state, validation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{FailingBackend, MockBackend};

    const INTENT_JSON: &str = r#"```json
{
    "ui_elements": [
        {"type": "Text", "content": "Welcome", "style": "headlineLarge"},
        {"type": "Button", "text": "Continue"}
    ],
    "layout_type": "Column",
    "styles": {},
    "actions": []
}
```"#;

    #[tokio::test]
    async fn test_pipeline_totality_with_failing_backend() {
        let generator = UiGenerator::new(Arc::new(FailingBackend));
        let run = generator.run(GenerationRequest::new("a login screen")).await;

        assert_eq!(run.state.current_stage, Stage::Complete);
        assert!(!run.state.final_report.is_empty());
        // both stages degraded: fallback intent, template code
        assert!(run.state.generated_code.contains("fun GeneratedUI()"));
        assert_eq!(
            run.state.parsed_intent.ui_elements[0].display_text(),
            Some("Error parsing intent")
        );
    }

    #[tokio::test]
    async fn test_findings_never_empty() {
        let generator = UiGenerator::new(Arc::new(FailingBackend));
        let run = generator.run(GenerationRequest::new("anything")).await;
        assert!(!run.state.accessibility_findings.is_empty());
        assert!(!run.state.design_findings.is_empty());
    }

    #[tokio::test]
    async fn test_happy_path_through_both_backend_stages() {
        let backend = MockBackend::with_responses(vec![
            INTENT_JSON,
            "```kotlin\nimport androidx.compose.material3.*\n\n@Composable\nfun WelcomeScreen() {\n    Text(\"Welcome\")\n    Button(onClick = { }) { Text(\"Continue\") }\n}\n```",
        ]);
        let generator = UiGenerator::new(Arc::new(backend.clone()));
        let run = generator.run(GenerationRequest::new("welcome screen with a button")).await;

        assert_eq!(run.state.current_stage, Stage::Complete);
        assert_eq!(backend.calls(), 2);
        assert_eq!(run.state.parsed_intent.ui_elements.len(), 2);
        assert_eq!(run.state.layout_plan.children.len(), 2);
        assert!(run.state.generated_code.contains("fun WelcomeScreen()"));
        assert!(run.state.final_report.contains("ACCESSIBILITY REVIEW"));
    }

    #[tokio::test]
    async fn test_layout_children_match_intent_order() {
        let backend = MockBackend::with_responses(vec![INTENT_JSON]);
        let generator =
            UiGenerator::new(Arc::new(backend)).with_codegen_mode(CodegenMode::Template);
        let run = generator.run(GenerationRequest::new("welcome screen")).await;

        let intent_kinds: Vec<_> =
            run.state.parsed_intent.ui_elements.iter().map(|e| e.kind.clone()).collect();
        let planned_kinds: Vec<_> =
            run.state.layout_plan.children.iter().map(|c| c.component.clone()).collect();
        assert_eq!(intent_kinds, planned_kinds);
    }

    #[tokio::test]
    async fn test_validation_report_attached_and_fixes_applied() {
        let backend = MockBackend::with_responses(vec![
            INTENT_JSON,
            // generated code arrives without any imports
            "@Composable\nfun WelcomeScreen() {\n    Text(\"Welcome\")\n}",
        ]);
        let generator = UiGenerator::new(Arc::new(backend));
        let run =
            generator.run(GenerationRequest::new("welcome screen").validated(true)).await;

        let validation = run.validation.expect("validation requested");
        assert!(
            validation
                .auto_fixes_applied
                .iter()
                .any(|line| line == "import androidx.compose.material3.Text")
        );
        assert!(run.state.generated_code.contains("import androidx.compose.material3.Text"));
        assert!(validation.compilation.success);
    }

    #[tokio::test]
    async fn test_validation_skipped_when_not_requested() {
        let generator = UiGenerator::new(Arc::new(FailingBackend));
        let run = generator.run(GenerationRequest::new("a screen")).await;
        assert!(run.validation.is_none());
    }

    #[tokio::test]
    async fn test_multi_file_falls_back_to_single_entry() {
        let generator =
            UiGenerator::new(Arc::new(FailingBackend)).with_codegen_mode(CodegenMode::Template);
        let run = generator.run(GenerationRequest::new("a screen").multi_file(true)).await;
        let files = run.files();
        assert_eq!(files.len(), 1);
        assert!(files.contains_key("Main.kt"));
    }
}
