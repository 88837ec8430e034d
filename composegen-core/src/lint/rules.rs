//! Shared trigger table for import checks
//!
//! One table drives both the validator and the auto-fixer, so anything the
//! validator flags the fixer can repair, and vice versa. Triggers are plain
//! substrings; this is intentionally not a parse of the code.

/// Trigger substring paired with the import path it implies
pub const IMPORT_RULES: &[(&str, &str)] = &[
    ("Text(", "androidx.compose.material3.Text"),
    ("Button(", "androidx.compose.material3.Button"),
    ("Image(", "androidx.compose.foundation.Image"),
    ("Modifier", "androidx.compose.ui.Modifier"),
    ("Column", "androidx.compose.foundation.layout.Column"),
    ("Row", "androidx.compose.foundation.layout.Row"),
    ("Box", "androidx.compose.foundation.layout.Box"),
];

/// Render an import path as the import line expected in the source
pub fn import_line(path: &str) -> String {
    format!("import {}", path)
}

/// Import paths whose triggers appear in the code but whose import line is
/// missing, in rule-table order
pub fn missing_imports(code: &str) -> Vec<&'static str> {
    IMPORT_RULES
        .iter()
        .filter(|(trigger, path)| code.contains(trigger) && !code.contains(&import_line(path)))
        .map(|(_, path)| *path)
        .collect()
}
