//! Code-generation stage
//!
//! Two modes: a deterministic template construction used for reproducible
//! runs and as the fallback, and the default backend-delegated mode. The
//! delegated path can fail in many ways; every one of them degrades to the
//! template so generation never aborts the pipeline.

use super::StageOutcome;
use super::prompts;
use super::state::{ComponentKind, LayoutKind, LayoutPlan, PipelineState};
use crate::extract;
use crate::llm::ChatBackend;
use tracing::{debug, warn};

/// Generate code by delegating to the backend.
pub async fn generate_delegated(
    backend: &dyn ChatBackend,
    state: &PipelineState,
) -> StageOutcome<String> {
    let user_message = prompts::generator_user_message(state);

    let raw = match backend.invoke(prompts::GENERATOR_SYSTEM, &user_message).await {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, "code generation backend call failed, using template");
            return StageOutcome::Fallback {
                value: generate_template(&state.layout_plan),
                reason: format!("backend call failed: {}", error),
            };
        }
    };

    debug!(chars = raw.len(), "raw generation response received");
    let mut code = extract::extract_code(&raw);

    if !code.starts_with("import") && !code.starts_with("@Composable") {
        debug!("generated code lacks leading imports, prepending baseline set");
        code = format!("{}\n\n{}", prompts::BASELINE_IMPORTS.join("\n"), code);
    }

    StageOutcome::Primary(code)
}

/// Generate code from the layout plan alone.
///
/// Deterministic construction covering the Text, Button, and Image
/// component kinds with fixed code shapes.
pub fn generate_template(plan: &LayoutPlan) -> String {
    let mut lines: Vec<String> = vec![
        "import androidx.compose.runtime.Composable".to_string(),
        "import androidx.compose.ui.Modifier".to_string(),
        "import androidx.compose.material3.*".to_string(),
        "import androidx.compose.foundation.layout.*".to_string(),
        "import androidx.compose.foundation.background".to_string(),
        "import androidx.compose.ui.graphics.Color".to_string(),
        "import androidx.compose.ui.unit.dp".to_string(),
        "import androidx.compose.ui.Alignment".to_string(),
        String::new(),
        "@Composable".to_string(),
        "fun GeneratedUI() {".to_string(),
    ];

    let root = plan.root_container;
    let modifier_chain = plan.modifiers.join(".");

    match root {
        LayoutKind::Column => {
            lines.push(format!("    {}(", root.as_str()));
            if !plan.modifiers.is_empty() {
                lines.push(format!("        modifier = Modifier.{},", modifier_chain));
            }
            lines.push(format!("        verticalArrangement = Arrangement.{},", plan.arrangement));
            lines.push("        horizontalAlignment = Alignment.CenterHorizontally".to_string());
            lines.push("    ) {".to_string());
        }
        LayoutKind::Row => {
            lines.push(format!("    {}(", root.as_str()));
            if !plan.modifiers.is_empty() {
                lines.push(format!("        modifier = Modifier.{},", modifier_chain));
            }
            lines.push("        horizontalArrangement = Arrangement.SpaceBetween".to_string());
            lines.push("    ) {".to_string());
        }
        _ => {
            if plan.modifiers.is_empty() {
                lines.push(format!("    {}() {{", root.as_str()));
            } else {
                lines.push(format!("    {}(modifier = Modifier.{}) {{", root.as_str(), modifier_chain));
            }
        }
    }

    for child in &plan.children {
        match &child.component {
            ComponentKind::Text => {
                let text = child.properties.display_text().unwrap_or("Sample Text");
                let style = child.properties.style.as_deref().unwrap_or("bodyLarge");
                lines.push("        Text(".to_string());
                lines.push(format!("            text = \"{}\",", text));
                lines.push(format!("            style = MaterialTheme.typography.{}", style));
                lines.push("        )".to_string());
            }
            ComponentKind::Button => {
                let label = child
                    .properties
                    .text
                    .as_deref()
                    .or(child.properties.content.as_deref())
                    .unwrap_or("Button");
                lines.push("        Button(onClick = { }) {".to_string());
                lines.push(format!("            Text(\"{}\")", label));
                lines.push("        }".to_string());
            }
            ComponentKind::Image => {
                lines.push("        // Image placeholder".to_string());
                lines.push("        Box(".to_string());
                lines.push("            modifier = Modifier".to_string());
                lines.push("                .size(200.dp)".to_string());
                lines.push("                .background(Color.LightGray)".to_string());
                lines.push("        )".to_string());
            }
            _ => {}
        }
    }

    lines.push("    }".to_string());
    lines.push("}".to_string());

    lines.join("\n")
}
