//! Accessibility and design review stages
//!
//! Pure rule scans over the generated code. Each review always produces at
//! least one finding line, because report assembly renders the lists
//! unconditionally.

use tracing::debug;

/// Review the code for accessibility considerations.
pub fn review_accessibility(code: &str) -> Vec<String> {
    let mut findings = Vec::new();

    if code.contains("Image") && !code.contains("contentDescription") {
        findings.push("Missing contentDescription for Image components".to_string());
    }

    if code.contains("Button") && !(code.contains(".size(") && code.contains("48.dp")) {
        findings.push("Ensure buttons meet minimum touch target size (48dp)".to_string());
    }

    if code.contains("Text") {
        findings.push("Consider adding semantics for screen readers".to_string());
    }

    if findings.is_empty() {
        findings.push("No major accessibility issues found".to_string());
    }

    debug!(count = findings.len(), "accessibility review complete");
    findings
}

/// Review the code against Material 3 design guidance.
pub fn review_design(code: &str) -> Vec<String> {
    let mut findings = Vec::new();

    if !code.contains("MaterialTheme") {
        findings.push("Consider using MaterialTheme for consistent theming".to_string());
    }

    if code.contains("padding") {
        findings.push("Good: Using padding for spacing".to_string());
    } else {
        findings.push("Consider adding padding for better visual hierarchy".to_string());
    }

    if code.contains("Arrangement") {
        findings.push("Good: Using Arrangement for proper spacing".to_string());
    }

    if code.contains("Alignment") {
        findings.push("Good: Using Alignment for proper positioning".to_string());
    }

    if findings.is_empty() {
        findings.push("Code follows Material 3 guidelines".to_string());
    }

    debug!(count = findings.len(), "design review complete");
    findings
}
