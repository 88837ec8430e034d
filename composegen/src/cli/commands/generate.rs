//! Generate command

use super::backend_from_env;
use crate::cli::app::GenerateArgs;
use anyhow::{Context, Result};
use composegen_core::pipeline::{CodegenMode, GenerationRequest, UiGenerator};
use composegen_core::sources::{ExampleSearch, read_project};
use tracing::info;

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let backend = backend_from_env()?;

    let mut request = GenerationRequest::new(&args.description)
        .multi_file(args.multi_file)
        .validated(args.validate);

    if args.examples {
        let search = ExampleSearch::new(std::env::var("GITHUB_TOKEN").ok());
        let examples = search.search(&args.description, 3).await;
        info!(count = examples.len(), "reference examples collected");
        request = request.with_examples(examples);
    }

    if let Some(project) = &args.project {
        let info = read_project(project);
        info!(components = info.existing_components.len(), "project introspected");
        request = request.with_components(info.existing_components);
    }

    let mode = if args.template { CodegenMode::Template } else { CodegenMode::Delegated };
    let generator = UiGenerator::new(backend).with_codegen_mode(mode);
    let run = generator.run(request).await;

    println!("{}", run.state.final_report);

    if let Some(validation) = &run.validation {
        println!();
        println!("Validation: {} lint finding(s)", validation.lint_findings.len());
        for finding in &validation.lint_findings {
            println!("  [{:?}] line {}: {}", finding.severity, finding.line, finding.message);
        }
        for fix in &validation.auto_fixes_applied {
            println!("  fixed: {}", fix);
        }
        let compilation = &validation.compilation;
        println!("Compilation: {}", if compilation.success { "SUCCESS" } else { "FAILED" });
        for error in &compilation.errors {
            println!("  error: {}", error);
        }
    }

    if args.multi_file {
        println!("\nFiles:");
        for path in run.files().keys() {
            println!("  {}", path);
        }
    }

    if let Some(output) = &args.output {
        std::fs::write(output, &run.state.generated_code)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("\nCode written to {}", output.display());
    }

    Ok(())
}
