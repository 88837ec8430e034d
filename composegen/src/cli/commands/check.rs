//! Check command: validator, auto-fixer, and compile check on one file

use crate::cli::app::CheckArgs;
use anyhow::{Context, Result};
use composegen_core::lint::{CompileChecker, auto_fix, validate};

pub async fn execute(args: CheckArgs) -> Result<()> {
    let code = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let findings = validate(&code);
    if findings.is_empty() {
        println!("No lint findings.");
    } else {
        println!("{} lint finding(s):", findings.len());
        for finding in &findings {
            println!(
                "  [{:?}] line {}: {} ({})",
                finding.severity, finding.line, finding.message, finding.suggestion
            );
        }
    }

    let fixed = auto_fix(&code);
    if args.fix && fixed != code {
        std::fs::write(&args.file, &fixed)
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
        println!("Auto-fixes written to {}", args.file.display());
    }

    let outcome = CompileChecker::default().check(&fixed).await;
    println!("Compilation: {}", if outcome.success { "SUCCESS" } else { "FAILED" });
    for error in &outcome.errors {
        println!("  error: {}", error);
    }
    for warning in &outcome.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}
