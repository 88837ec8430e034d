//! External data-source connectors
//!
//! Thin, best-effort wrappers around the services that enrich generation:
//! a design tool for style tokens, a code-hosting search for reference
//! snippets, and local project introspection. Each connector owns its own
//! degradation path (a mock payload, an empty list, an empty structure),
//! so none of them can fail a pipeline run.

pub mod design;
pub mod project;
pub mod search;

pub use design::{DesignComponent, DesignSource, DesignSpec, TypeStyle};
pub use project::{ComponentRef, ProjectInfo, read_project};
pub use search::{ExampleSearch, SnippetExample};
