//! Deterministic auto-fixer for missing imports

use super::rules::{import_line, missing_imports};
use tracing::debug;

/// Keywords that mark the first structural line of a Kotlin file
const STRUCTURAL_KEYWORDS: &[&str] = &["package", "@", "fun", "class"];

/// Import lines the code needs but does not have, sorted lexicographically
pub fn missing_import_lines(code: &str) -> Vec<String> {
    let mut lines: Vec<String> = missing_imports(code).iter().map(|path| import_line(path)).collect();
    lines.sort();
    lines.dedup();
    lines
}

/// Insert any missing import lines at the top of the code.
///
/// Idempotent: running the fixer on already-fixed code returns it
/// byte-identical. The insertion point is the first non-blank, non-comment
/// line containing a structural keyword, defaulting to the start of the
/// file.
pub fn auto_fix(code: &str) -> String {
    let imports = missing_import_lines(code);
    if imports.is_empty() {
        return code.to_string();
    }
    debug!(count = imports.len(), "inserting missing imports");

    let mut lines: Vec<String> = code.lines().map(str::to_string).collect();

    let mut insert_at = 0;
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if STRUCTURAL_KEYWORDS.iter().any(|kw| line.contains(kw)) {
            insert_at = idx;
            break;
        }
    }

    for import in imports {
        lines.insert(insert_at, import);
        insert_at += 1;
    }
    if insert_at < lines.len() && !lines[insert_at].trim().is_empty() {
        lines.insert(insert_at, String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::validator::validate;
    use crate::lint::Severity;

    #[test]
    fn test_adds_missing_import_and_keeps_body() {
        let code = "@Composable fun X() { Text(\"Hi\") }";
        let fixed = auto_fix(code);
        assert!(fixed.contains("import androidx.compose.material3.Text"));
        assert!(fixed.contains("Text(\"Hi\")"));
    }

    #[test]
    fn test_idempotence() {
        let code = "@Composable\nfun Screen() {\n    Column {\n        Text(\"a\")\n    }\n}";
        let once = auto_fix(code);
        let twice = auto_fix(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_input_returned_byte_identical() {
        let code = "import androidx.compose.material3.Text\n\nfun x() = Text(\"Hi\")\n";
        assert_eq!(auto_fix(code), code);
    }

    #[test]
    fn test_fix_clears_import_findings() {
        let code = "@Composable\nfun Screen() {\n    Button(onClick = {}) { Text(\"Go\") }\n}";
        let fixed = auto_fix(code);
        let import_errors: Vec<_> = validate(&fixed)
            .into_iter()
            .filter(|f| f.severity == Severity::Error && f.message.contains("Missing import"))
            .collect();
        assert!(import_errors.is_empty(), "still missing: {:?}", import_errors);
    }

    #[test]
    fn test_imports_inserted_in_sorted_order() {
        let code = "fun x() { Row { Column { Box {} } } }";
        let fixed = auto_fix(code);
        let box_at = fixed.find("layout.Box").unwrap();
        let column_at = fixed.find("layout.Column").unwrap();
        let row_at = fixed.find("layout.Row").unwrap();
        assert!(box_at < column_at && column_at < row_at);
    }

    #[test]
    fn test_blank_separator_after_imports() {
        let code = "fun x() { Text(\"a\") }";
        let fixed = auto_fix(code);
        let lines: Vec<&str> = fixed.lines().collect();
        assert_eq!(lines[0], "import androidx.compose.material3.Text");
        assert_eq!(lines[1], "");
    }

    #[test]
    fn test_insert_skips_leading_comment() {
        let code = "// generated\n@Composable\nfun X() { Text(\"Hi\") }";
        let fixed = auto_fix(code);
        let lines: Vec<&str> = fixed.lines().collect();
        assert_eq!(lines[0], "// generated");
        assert!(lines[1].starts_with("import "));
    }
}
