//! Report assembly and re-extraction
//!
//! The final report is plain text: the generated code plus both review
//! lists under fixed section banners. The extraction helpers let a display
//! layer pull the code block or a single section back out of an assembled
//! report.

use super::state::PipelineState;
use std::collections::BTreeMap;

const BANNER: &str =
    "======================================================================";

const CODE_SECTION: &str = "GENERATED JETPACK COMPOSE UI CODE";
const ACCESSIBILITY_SECTION: &str = "ACCESSIBILITY REVIEW";
const DESIGN_SECTION: &str = "DESIGN REVIEW (Material 3 Guidelines)";

/// Assemble the final report from the generated code and review findings.
pub fn assemble_report(state: &PipelineState) -> String {
    let mut lines: Vec<String> = vec![
        BANNER.to_string(),
        CODE_SECTION.to_string(),
        BANNER.to_string(),
        String::new(),
        state.generated_code.clone(),
        String::new(),
        BANNER.to_string(),
        ACCESSIBILITY_SECTION.to_string(),
        BANNER.to_string(),
    ];

    for finding in &state.accessibility_findings {
        lines.push(format!("  \u{2022} {}", finding));
    }

    lines.push(String::new());
    lines.push(BANNER.to_string());
    lines.push(DESIGN_SECTION.to_string());
    lines.push(BANNER.to_string());

    for finding in &state.design_findings {
        lines.push(format!("  \u{2022} {}", finding));
    }

    lines.push(BANNER.to_string());
    lines.join("\n")
}

/// Split a multi-file output into path → content entries.
///
/// The output is expected to be a JSON object mapping file paths to file
/// contents; anything else is returned as a single `Main.kt` entry.
pub fn split_files(output: &str) -> BTreeMap<String, String> {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(output) {
        let entries: BTreeMap<String, String> = map
            .into_iter()
            .filter_map(|(path, content)| content.as_str().map(|c| (path, c.to_string())))
            .collect();
        if !entries.is_empty() {
            return entries;
        }
    }
    BTreeMap::from([("Main.kt".to_string(), output.to_string())])
}

/// Pull the composable code back out of an assembled report.
///
/// Scans from the first `@Composable` line to the first lone closing brace
/// after a plausible body; returns the whole report when no code block is
/// found.
pub fn extract_code_section(report: &str) -> String {
    let mut code_lines: Vec<&str> = Vec::new();
    let mut in_code = false;

    for line in report.lines() {
        if line.contains("@Composable") {
            in_code = true;
        }
        if in_code {
            code_lines.push(line);
        }
        if in_code && line.trim() == "}" && code_lines.len() > 5 {
            break;
        }
    }

    if code_lines.is_empty() { report.to_string() } else { code_lines.join("\n") }
}

/// Pull one banner-delimited section's bullet lines out of a report.
pub fn extract_section(report: &str, section_name: &str) -> String {
    let mut section_lines: Vec<&str> = Vec::new();
    let mut in_section = false;

    for line in report.lines() {
        if line.contains(section_name) {
            in_section = true;
            continue;
        }
        if in_section {
            if line.contains("==========") {
                // a banner this far in closes the section
                if !section_lines.is_empty() {
                    break;
                }
                continue;
            }
            if line.trim_start().starts_with('\u{2022}') {
                section_lines.push(line);
            }
        }
    }

    if section_lines.is_empty() {
        "No issues found".to_string()
    } else {
        section_lines.join("\n")
    }
}
