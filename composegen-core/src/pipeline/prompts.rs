//! Instruction prompts for the backend-delegated stages
//!
//! Prompt text is configuration, not logic: the stages stay correct no
//! matter what the backend makes of these instructions, because every
//! response goes through the tolerant extraction layer.

use super::state::PipelineState;

/// System instruction for the intent-parsing stage
pub const INTENT_SYSTEM: &str = r#"You are a UI intent parser. Extract UI components and layout information from user descriptions.

Respond with a JSON object containing:
- ui_elements: array of UI components (type, text/content, style, action)
- layout_type: main container type (Column, Row, Card, Box, etc.)
- styles: any specific styling requirements
- actions: any user interactions mentioned

Component types: Text, Button, Image, TextField, Icon, Divider, Spacer
Layout types: Column, Row, Card, Box, LazyColumn, LazyRow

Example input: "Create a login screen with a title, email field, password field, and login button"
Example output:
{
    "ui_elements": [
        {"type": "Text", "content": "Login", "style": "headlineLarge"},
        {"type": "TextField", "content": "Email", "hint": "Enter your email"},
        {"type": "TextField", "content": "Password", "hint": "Enter your password", "secure": true},
        {"type": "Button", "text": "Login", "action": "onLogin"}
    ],
    "layout_type": "Column",
    "styles": {"spacing": "medium", "alignment": "center"},
    "actions": ["onLogin"]
}

Only return valid JSON, no additional text."#;

/// System instruction for the code-generation stage
pub const GENERATOR_SYSTEM: &str = r#"You are an expert Jetpack Compose developer. Generate complete, production-ready Compose code.

CRITICAL RULES - FOLLOW EXACTLY:
1. Generate ONLY valid Kotlin Jetpack Compose code
2. Use Material3 components (androidx.compose.material3.*)
3. Include ALL necessary imports at the top
4. Use proper modifiers in THIS ORDER: .fillMaxWidth() THEN .padding() THEN .height()
5. For TextFields, ALWAYS use OutlinedTextField with:
   - var state by remember { mutableStateOf("") }
   - value = state
   - onValueChange = { state = it }
   - label = { Text("Label") }
   - placeholder = { Text("Hint text") }
6. For spacing, ALWAYS use: Spacer(modifier = Modifier.height(XYdp))
7. Use proper typography: MaterialTheme.typography.headlineLarge, bodyMedium, etc.
8. For buttons: Button(onClick = {}, modifier = Modifier.fillMaxWidth().height(48.dp))
9. Use Column with: verticalArrangement = Arrangement.Top, horizontalAlignment = Alignment.CenterHorizontally
10. For password fields: visualTransformation = PasswordVisualTransformation()
11. For icons: use Icon(imageVector = Icons.Default.IconName, contentDescription = "...")
12. For dividers with text: Use Row with HorizontalDivider and Text
13. MATCH THE EXACT COMPONENT COUNT: If the user specifies 18 components, generate exactly 18 components
14. PRESERVE EXACT SPACING: Use the exact dp values specified (24dp, 32dp, 16dp, 8dp)
15. For images/logos: Use Icon() or Box() with specified size

Generate code that EXACTLY matches the user's specifications."#;

/// System instruction for the refinement loop
pub const REFINE_SYSTEM: &str = r#"You are a Jetpack Compose UI expert. You refine generated UI code based on user feedback.

Given the current code and user feedback, produce an improved version that addresses the feedback while maintaining:
- Proper Jetpack Compose syntax
- Material 3 guidelines
- Accessibility best practices
- Clean, readable code

Respond with a JSON object containing:
{
    "refined_code": "the complete improved @Composable function",
    "changes_made": ["list of improvements made"],
    "accessibility_notes": ["accessibility improvements"],
    "design_notes": ["design improvements"]
}

Inside JSON strings, escape embedded newlines as \n and double quotes as \".
Only return valid JSON, no additional text."#;

/// Maximum number of reference snippets embedded in the generation prompt
const MAX_REFERENCE_EXAMPLES: usize = 3;

/// Maximum characters of each reference snippet embedded in the prompt
const MAX_REFERENCE_CHARS: usize = 500;

/// Maximum number of existing component names surfaced to the backend
const MAX_EXISTING_COMPONENTS: usize = 5;

/// Build the user message for the code-generation stage, embedding the raw
/// description, a per-component checklist, reference snippets, and known
/// project components.
pub fn generator_user_message(state: &PipelineState) -> String {
    let element_count = state.parsed_intent.ui_elements.len();
    let mut parts: Vec<String> = vec![
        "=== USER'S EXACT REQUIREMENTS ===".to_string(),
        state.user_input.clone(),
        "\n=== YOUR TASK ===".to_string(),
        "Generate Jetpack Compose code that implements EVERY SINGLE ITEM listed above.".to_string(),
        format!("You MUST include ALL {} components mentioned.", element_count),
        "\n=== MANDATORY CODE STRUCTURE ===".to_string(),
    ];

    parts.push("\n1. START WITH THESE IMPORTS (copy exactly):".to_string());
    parts.push(BASELINE_IMPORTS.join("\n"));

    parts.push("\n2. FUNCTION SIGNATURE:".to_string());
    parts.push("@Composable\nfun GeneratedScreen() {".to_string());

    parts.push("\n3. STATE VARIABLES (declare ALL text fields):".to_string());
    parts.push("For EACH TextField in the requirements, add:".to_string());
    parts.push("    var fieldName by remember { mutableStateOf(\"\") }".to_string());

    parts.push(format!(
        "\n4. MAIN CONTAINER - {}:",
        state.layout_plan.root_container.as_str()
    ));
    parts.push(
        "    Column(\n        modifier = Modifier\n            .fillMaxSize()\n            \
         .padding(16.dp),\n        horizontalAlignment = Alignment.CenterHorizontally,\n        \
         verticalArrangement = Arrangement.Top\n    ) {"
            .to_string(),
    );

    parts.push("\n5. IMPLEMENT EACH COMPONENT FROM USER'S LIST:".to_string());
    parts.push(
        "Go through EACH numbered item in the user requirements above and generate code."
            .to_string(),
    );

    parts.push("\n6. CLOSE THE FUNCTION:".to_string());
    parts.push("    }\n}".to_string());

    parts.push("\n=== CRITICAL CHECKLIST ===".to_string());
    parts.push(format!("- Did you include ALL {} components?", element_count));
    parts.push("- Did you use the EXACT spacing values specified?".to_string());
    parts.push("- Did you use OutlinedTextField (not Text) for input fields?".to_string());
    parts.push("- Did you make clickable texts clickable with .clickable { }?".to_string());
    parts.push("- Did you use .fillMaxWidth() for buttons and fields?".to_string());
    parts.push("- Did you match ALL text labels exactly?".to_string());

    if !state.reference_examples.is_empty() {
        parts.push("\n=== REFERENCE EXAMPLES ===".to_string());
        parts.push("Here are some real Jetpack Compose examples for reference:".to_string());
        for (idx, example) in
            state.reference_examples.iter().take(MAX_REFERENCE_EXAMPLES).enumerate()
        {
            parts.push(format!("\nExample {}: {}", idx + 1, example.description));
            let snippet: String = example.code.chars().take(MAX_REFERENCE_CHARS).collect();
            parts.push(format!("```kotlin\n{}...\n```", snippet));
        }
    }

    if !state.existing_components.is_empty() {
        let names: Vec<&str> = state
            .existing_components
            .iter()
            .take(MAX_EXISTING_COMPONENTS)
            .map(|component| component.name.as_str())
            .collect();
        parts.push(format!("\nExisting composables in project: {}", names.join(", ")));
    }

    parts.push("\n=== OUTPUT FORMAT ===".to_string());
    parts.push(
        "Return ONLY the complete Kotlin code. Start with imports, end with closing brace. \
         NO explanations, NO markdown fences."
            .to_string(),
    );

    parts.join("\n")
}

/// Build the user message for the refinement loop
pub fn refine_user_message(prior_code: &str, feedback: &str) -> String {
    format!(
        "Current Code:\n```kotlin\n{}\n```\n\nUser Feedback:\n{}\n\nPlease refine the code based on this feedback.",
        prior_code, feedback
    )
}

/// Imports prepended to backend output that arrives without its own
pub const BASELINE_IMPORTS: &[&str] = &[
    "import androidx.compose.runtime.Composable",
    "import androidx.compose.ui.Modifier",
    "import androidx.compose.material3.*",
    "import androidx.compose.foundation.layout.*",
    "import androidx.compose.foundation.clickable",
    "import androidx.compose.material.icons.Icons",
    "import androidx.compose.material.icons.filled.*",
    "import androidx.compose.ui.unit.dp",
    "import androidx.compose.runtime.remember",
    "import androidx.compose.runtime.mutableStateOf",
    "import androidx.compose.runtime.getValue",
    "import androidx.compose.runtime.setValue",
    "import androidx.compose.ui.Alignment",
    "import androidx.compose.ui.graphics.Color",
    "import androidx.compose.ui.text.font.FontWeight",
    "import androidx.compose.ui.text.input.PasswordVisualTransformation",
    "import androidx.compose.ui.text.input.VisualTransformation",
    "import androidx.compose.ui.text.style.TextAlign",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::state::{GenerationRequest, PipelineState};
    use crate::sources::project::ComponentRef;
    use crate::sources::search::SnippetExample;

    #[test]
    fn test_generator_message_embeds_description() {
        let state = PipelineState::new(GenerationRequest::new("a login screen with two fields"));
        let message = generator_user_message(&state);
        assert!(message.contains("a login screen with two fields"));
        assert!(message.contains("ALL 0 components"));
        assert!(message.contains("NO markdown fences"));
    }

    #[test]
    fn test_generator_message_truncates_examples() {
        let long_code = "X".repeat(2000);
        let request = GenerationRequest::new("a card").with_examples(vec![
            SnippetExample {
                code: long_code,
                description: "Card sample".to_string(),
                path: "ui/Card.kt".to_string(),
                source_url: String::new(),
            };
            5
        ]);
        let state = PipelineState::new(request);
        let message = generator_user_message(&state);
        assert!(message.contains("Example 3:"));
        assert!(!message.contains("Example 4:"));
        assert!(!message.contains(&"X".repeat(501)));
    }

    #[test]
    fn test_generator_message_lists_existing_components() {
        let request = GenerationRequest::new("a screen").with_components(vec![
            ComponentRef { name: "LoginScreen".to_string(), file: "Login.kt".to_string() },
            ComponentRef { name: "AppBar".to_string(), file: "Bar.kt".to_string() },
        ]);
        let state = PipelineState::new(request);
        let message = generator_user_message(&state);
        assert!(message.contains("Existing composables in project: LoginScreen, AppBar"));
    }

    #[test]
    fn test_refine_message_embeds_code_and_feedback() {
        let message = refine_user_message("fun X() {}", "make the button bigger");
        assert!(message.contains("```kotlin\nfun X() {}\n```"));
        assert!(message.contains("make the button bigger"));
    }
}
