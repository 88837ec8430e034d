//! Pipeline state and the records each stage produces
//!
//! One `PipelineState` is created per generation request and threaded
//! through every stage exactly once. All fields are declared upfront and
//! defaulted; stages fill them in through the `apply_*` methods, which
//! check the expected stage boundary and advance the stage marker. The
//! marker only ever moves forward.

use crate::sources::project::ComponentRef;
use crate::sources::search::SnippetExample;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed forward order of pipeline stages.
///
/// Used for observability and testing, never for branching.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Start,
    IntentParsed,
    LayoutPlanned,
    CodeGenerated,
    AccessibilityReviewed,
    UiReviewed,
    Complete,
}

/// UI component kinds recognized by the planner and the template generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Text,
    Button,
    Image,
    TextField,
    Icon,
    Divider,
    Spacer,
    /// Anything the backend named that we don't model explicitly
    Other(String),
}

impl Default for ComponentKind {
    fn default() -> Self {
        Self::Text
    }
}

impl ComponentKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "Text",
            Self::Button => "Button",
            Self::Image => "Image",
            Self::TextField => "TextField",
            Self::Icon => "Icon",
            Self::Divider => "Divider",
            Self::Spacer => "Spacer",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ComponentKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Text" => Self::Text,
            "Button" => Self::Button,
            "Image" => Self::Image,
            "TextField" => Self::TextField,
            "Icon" => Self::Icon,
            "Divider" => Self::Divider,
            "Spacer" => Self::Spacer,
            _ => Self::Other(value),
        }
    }
}

impl From<ComponentKind> for String {
    fn from(value: ComponentKind) -> Self {
        value.as_str().to_string()
    }
}

/// Root container kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(from = "String", into = "String")]
pub enum LayoutKind {
    #[default]
    Column,
    Row,
    Card,
    Box,
    LazyColumn,
    LazyRow,
}

impl LayoutKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Column => "Column",
            Self::Row => "Row",
            Self::Card => "Card",
            Self::Box => "Box",
            Self::LazyColumn => "LazyColumn",
            Self::LazyRow => "LazyRow",
        }
    }
}

impl From<String> for LayoutKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Row" => Self::Row,
            "Card" => Self::Card,
            "Box" => Self::Box,
            "LazyColumn" => Self::LazyColumn,
            "LazyRow" => Self::LazyRow,
            // unrecognized containers collapse to the default
            _ => Self::Column,
        }
    }
}

impl From<LayoutKind> for String {
    fn from(value: LayoutKind) -> Self {
        value.as_str().to_string()
    }
}

/// One UI element described by the parsed intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UiElement {
    #[serde(rename = "type", default)]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Attributes we don't model explicitly (hint, secure, action, ...)
    #[serde(flatten)]
    pub extras: serde_json::Map<String, Value>,
}

impl UiElement {
    pub fn new(kind: ComponentKind, content: impl Into<String>) -> Self {
        Self { kind, content: Some(content.into()), ..Self::default() }
    }

    /// Display text for the element, preferring `content` over `text`
    pub fn display_text(&self) -> Option<&str> {
        self.content.as_deref().or(self.text.as_deref())
    }
}

/// Structured description of what the user asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParsedIntent {
    #[serde(default)]
    pub ui_elements: Vec<UiElement>,
    #[serde(default)]
    pub layout_type: LayoutKind,
    #[serde(default)]
    pub styles: serde_json::Map<String, Value>,
    #[serde(default)]
    pub actions: Vec<Value>,
}

impl ParsedIntent {
    /// Deterministic substitute used when the backend response cannot be
    /// parsed; keeps the pipeline moving instead of aborting it.
    pub fn fallback() -> Self {
        let mut element = UiElement::new(ComponentKind::Text, "Error parsing intent");
        element.style = Some("bodyLarge".to_string());
        Self {
            ui_elements: vec![element],
            layout_type: LayoutKind::Column,
            styles: serde_json::Map::new(),
            actions: Vec::new(),
        }
    }
}

/// One planned child in the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedComponent {
    pub component: ComponentKind,
    pub properties: UiElement,
    pub modifiers: Vec<String>,
}

/// Layout structure derived from the parsed intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LayoutPlan {
    pub root_container: LayoutKind,
    pub children: Vec<PlannedComponent>,
    pub modifiers: Vec<String>,
    pub arrangement: String,
}

/// Inputs for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub description: String,
    pub reference_examples: Vec<SnippetExample>,
    pub existing_components: Vec<ComponentRef>,
    pub multi_file: bool,
    pub validate: bool,
}

impl GenerationRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), ..Self::default() }
    }

    pub fn with_examples(mut self, examples: Vec<SnippetExample>) -> Self {
        self.reference_examples = examples;
        self
    }

    pub fn with_components(mut self, components: Vec<ComponentRef>) -> Self {
        self.existing_components = components;
        self
    }

    pub fn multi_file(mut self, enabled: bool) -> Self {
        self.multi_file = enabled;
        self
    }

    pub fn validated(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }
}

/// State threaded through every pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    pub user_input: String,
    pub parsed_intent: ParsedIntent,
    pub layout_plan: LayoutPlan,
    pub generated_code: String,
    pub accessibility_findings: Vec<String>,
    pub design_findings: Vec<String>,
    pub final_report: String,
    pub current_stage: Stage,
    pub reference_examples: Vec<SnippetExample>,
    pub existing_components: Vec<ComponentRef>,
    pub multi_file_mode: bool,
    pub validate_requested: bool,
}

impl PipelineState {
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            user_input: request.description,
            parsed_intent: ParsedIntent::default(),
            layout_plan: LayoutPlan::default(),
            generated_code: String::new(),
            accessibility_findings: Vec::new(),
            design_findings: Vec::new(),
            final_report: String::new(),
            current_stage: Stage::Start,
            reference_examples: request.reference_examples,
            existing_components: request.existing_components,
            multi_file_mode: request.multi_file,
            validate_requested: request.validate,
        }
    }

    pub(crate) fn apply_intent(&mut self, intent: ParsedIntent) {
        debug_assert_eq!(self.current_stage, Stage::Start);
        self.parsed_intent = intent;
        self.advance(Stage::IntentParsed);
    }

    pub(crate) fn apply_layout(&mut self, plan: LayoutPlan) {
        debug_assert_eq!(self.current_stage, Stage::IntentParsed);
        self.layout_plan = plan;
        self.advance(Stage::LayoutPlanned);
    }

    pub(crate) fn apply_code(&mut self, code: String) {
        debug_assert_eq!(self.current_stage, Stage::LayoutPlanned);
        self.generated_code = code;
        self.advance(Stage::CodeGenerated);
    }

    pub(crate) fn apply_accessibility(&mut self, findings: Vec<String>) {
        debug_assert_eq!(self.current_stage, Stage::CodeGenerated);
        self.accessibility_findings.extend(findings);
        self.advance(Stage::AccessibilityReviewed);
    }

    pub(crate) fn apply_design(&mut self, findings: Vec<String>) {
        debug_assert_eq!(self.current_stage, Stage::AccessibilityReviewed);
        self.design_findings.extend(findings);
        self.advance(Stage::UiReviewed);
    }

    pub(crate) fn apply_report(&mut self, report: String) {
        debug_assert_eq!(self.current_stage, Stage::UiReviewed);
        self.final_report = report;
        self.advance(Stage::Complete);
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.current_stage, "stage order must be monotonic");
        self.current_stage = next;
    }
}
