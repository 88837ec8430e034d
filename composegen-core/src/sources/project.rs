//! Project-introspection connector
//!
//! Walks an Android project for existing composable declarations so the
//! generator can reference them instead of duplicating them. Unreadable
//! files are skipped; a missing directory yields an empty structure.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// One composable declaration found in the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub name: String,
    /// Path of the declaring file, relative to the project root
    pub file: String,
}

/// What introspection found in a project directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub existing_components: Vec<ComponentRef>,
    pub manifest_present: bool,
}

/// Read an Android project's structure.
pub fn read_project(project_path: &Path) -> ProjectInfo {
    let mut info = ProjectInfo::default();
    if !project_path.exists() {
        return info;
    }

    let pattern = Regex::new(r"@Composable\s+fun\s+(\w+)").expect("valid pattern");

    for entry in WalkDir::new(project_path).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "kt") {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(path) else {
            continue;
        };
        if !content.contains("@Composable") {
            continue;
        }

        let relative = path
            .strip_prefix(project_path)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        for capture in pattern.captures_iter(&content) {
            if let Some(name) = capture.get(1) {
                info.existing_components
                    .push(ComponentRef { name: name.as_str().to_string(), file: relative.clone() });
            }
        }
    }

    info.manifest_present =
        project_path.join("app/src/main/AndroidManifest.xml").exists();

    debug!(
        components = info.existing_components.len(),
        manifest = info.manifest_present,
        "project introspection complete"
    );
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_yields_empty_info() {
        let info = read_project(Path::new("/nonexistent/project"));
        assert!(info.existing_components.is_empty());
        assert!(!info.manifest_present);
    }

    #[test]
    fn test_finds_composables_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let ui_dir = dir.path().join("app/src/main/java/ui");
        fs::create_dir_all(&ui_dir).unwrap();
        fs::write(
            ui_dir.join("Login.kt"),
            "@Composable\nfun LoginScreen() {}\n\n@Composable\nfun LoginButton() {}\n",
        )
        .unwrap();
        fs::write(ui_dir.join("Util.kt"), "fun helper() {}\n").unwrap();
        fs::create_dir_all(dir.path().join("app/src/main")).unwrap();
        fs::write(dir.path().join("app/src/main/AndroidManifest.xml"), "<manifest/>").unwrap();

        let info = read_project(dir.path());
        let names: Vec<&str> =
            info.existing_components.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"LoginScreen"));
        assert!(names.contains(&"LoginButton"));
        assert_eq!(info.existing_components.len(), 2);
        assert!(info.manifest_present);
        assert!(info.existing_components[0].file.ends_with("Login.kt"));
    }
}
