//! Refine command

use super::backend_from_env;
use crate::cli::app::RefineArgs;
use anyhow::{Context, Result};
use composegen_core::refine::Refiner;

pub async fn execute(args: RefineArgs) -> Result<()> {
    let prior_code = std::fs::read_to_string(&args.code)
        .with_context(|| format!("Failed to read {}", args.code.display()))?;

    let refiner = Refiner::new(backend_from_env()?);
    let refinement = refiner.refine(&prior_code, &args.feedback).await?;

    println!("{}", refinement.refined_code);

    if !refinement.changes_made.is_empty() {
        println!("\nChanges applied:");
        for change in &refinement.changes_made {
            println!("  - {}", change);
        }
    }
    if !refinement.accessibility_notes.is_empty() {
        println!("\nAccessibility notes:");
        for note in &refinement.accessibility_notes {
            println!("  - {}", note);
        }
    }
    if !refinement.design_notes.is_empty() {
        println!("\nDesign notes:");
        for note in &refinement.design_notes {
            println!("  - {}", note);
        }
    }

    if let Some(output) = &args.output {
        std::fs::write(output, &refinement.refined_code)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("\nRefined code written to {}", output.display());
    }

    Ok(())
}
