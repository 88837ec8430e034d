//! Static validation and repair of generated Compose code
//!
//! Deliberately shallow analysis: substring triggers for imports, a bounded
//! line window for accessibility attributes, count-based delimiter balance.
//! The findings are advisory; validation never mutates its input and never
//! fails, no matter how malformed the code is.

pub mod autofix;
pub mod compile;
pub mod rules;
pub mod validator;

use serde::{Deserialize, Serialize};

pub use autofix::{auto_fix, missing_import_lines};
pub use compile::{CompilationOutcome, CompileChecker};
pub use validator::validate;

/// Finding severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single issue found in generated code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintFinding {
    pub severity: Severity,
    pub message: String,
    /// 1-based, best-effort line number
    pub line: usize,
    pub suggestion: String,
}
