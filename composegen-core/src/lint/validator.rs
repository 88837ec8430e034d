//! Static validator for generated Compose code

use super::rules::{IMPORT_RULES, import_line};
use super::{LintFinding, Severity};

/// Number of lines after an image call inspected for an accessibility
/// description
const ACCESSIBILITY_WINDOW: usize = 5;

/// Validate Compose code for common structural defects.
///
/// Checks run in a fixed order and are independent of each other; the
/// result is deterministic for identical input. Findings are informational
/// only; the input is never modified.
pub fn validate(code: &str) -> Vec<LintFinding> {
    let lines: Vec<&str> = code.lines().collect();
    let mut findings = Vec::new();

    for (trigger, path) in IMPORT_RULES {
        let import = import_line(path);
        if code.contains(trigger) && !code.contains(&import) {
            findings.push(LintFinding {
                severity: Severity::Error,
                message: format!("Missing import: {}", path),
                line: find_line(&lines, trigger),
                suggestion: format!("Add: {}", import),
            });
        }
    }

    for (idx, line) in lines.iter().enumerate() {
        if line.contains("Image(") {
            let window_end = (idx + 1 + ACCESSIBILITY_WINDOW).min(lines.len());
            let window = lines[idx + 1..window_end].join("\n");
            if !window.contains("contentDescription") {
                findings.push(LintFinding {
                    severity: Severity::Warning,
                    message: "Image missing contentDescription for accessibility".to_string(),
                    line: idx + 1,
                    suggestion: "Add contentDescription parameter to Image".to_string(),
                });
            }
        }
    }

    findings
}

/// First 1-based line containing the text, defaulting to line 1
fn find_line(lines: &[&str], text: &str) -> usize {
    lines.iter().position(|line| line.contains(text)).map(|idx| idx + 1).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_import_single_finding() {
        let code = "@Composable fun X() { Text(\"Hi\") }";
        let findings = validate(code);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("androidx.compose.material3.Text"));
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn test_clean_code_yields_no_findings() {
        let code = "import androidx.compose.material3.Text\n\nfun greeting() = Text(\"Hi\")";
        assert!(validate(code).is_empty());
    }

    #[test]
    fn test_image_without_content_description_warns() {
        let code = "import androidx.compose.foundation.Image\n\
                    Image(\n    painter = painterResource(id),\n    modifier = x\n)";
        let findings = validate(code);
        let warning = findings.iter().find(|f| f.severity == Severity::Warning).unwrap();
        assert_eq!(warning.line, 2);
        assert!(warning.message.contains("contentDescription"));
    }

    #[test]
    fn test_image_with_content_description_in_window_passes() {
        let code = "import androidx.compose.foundation.Image\n\
                    Image(\n    painter = p,\n    contentDescription = \"Logo\"\n)";
        assert!(validate(code).iter().all(|f| f.severity != Severity::Warning));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let code = "Column { Text(\"a\")\nButton(onClick = {}) { Text(\"b\") } }";
        let first = validate(code);
        let second = validate(code);
        let render =
            |fs: &[LintFinding]| fs.iter().map(|f| format!("{}:{}", f.line, f.message)).collect::<Vec<_>>();
        assert_eq!(render(&first), render(&second));
    }

    #[test]
    fn test_findings_follow_rule_table_order() {
        let code = "Column { Button(onClick = {}) { Text(\"b\") } }";
        let findings = validate(code);
        let messages: Vec<&str> =
            findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Missing import: androidx.compose.material3.Text",
                "Missing import: androidx.compose.material3.Button",
                "Missing import: androidx.compose.foundation.layout.Column",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(validate("").is_empty());
    }
}
