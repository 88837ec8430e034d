//! Interactive generate-and-refine session
//!
//! Stand-in for the web front-end: generates an initial UI, then loops on
//! feedback, keeping the append-only iteration history for the lifetime of
//! the session.

use super::backend_from_env;
use crate::cli::app::SessionArgs;
use anyhow::Result;
use composegen_core::pipeline::{GenerationRequest, UiGenerator, report};
use composegen_core::refine::{IterationHistory, Refiner};
use std::io::{self, BufRead, Write};

pub async fn execute(args: SessionArgs) -> Result<()> {
    let backend = backend_from_env()?;
    let generator = UiGenerator::new(backend.clone());
    let refiner = Refiner::new(backend);
    let mut history = IterationHistory::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let description = match args.description {
        Some(description) => description,
        None => {
            prompt("Describe the UI to generate")?;
            match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            }
        }
    };

    if description.trim().is_empty() {
        println!("Please enter a UI description.");
        return Ok(());
    }

    let request = GenerationRequest::new(&description).validated(args.validate);
    let run = generator.run(request).await;
    let code = report::extract_code_section(&run.state.final_report);
    let accessibility = report::extract_section(&run.state.final_report, "ACCESSIBILITY REVIEW");
    let design = report::extract_section(&run.state.final_report, "DESIGN REVIEW");
    history.record_generation(&description, &code, &accessibility, &design);

    println!("{}", run.state.final_report);
    println!("\nEnter feedback to refine, or :history / :reset / :quit");

    loop {
        prompt("feedback")?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":reset" => {
                history.reset();
                println!("Session reset. Start a new session to generate again.");
                break;
            }
            ":history" => {
                if history.is_empty() {
                    println!("No iterations yet.");
                }
                for record in history.records() {
                    println!(
                        "Iteration {} - {} - {}",
                        record.sequence,
                        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        if record.feedback.is_empty() {
                            record.description.as_str()
                        } else {
                            record.feedback.as_str()
                        }
                    );
                }
                continue;
            }
            feedback => {
                let Some(current) = history.latest().map(|record| record.code.clone()) else {
                    println!("No current code to refine. Generate a UI first.");
                    continue;
                };
                match refiner.refine(&current, feedback).await {
                    Ok(refinement) => {
                        let record = history.record_refinement(&refinement, feedback);
                        println!("{}", record.code);
                        println!("\n{}", record.accessibility);
                        println!("\n{}", record.design);
                    }
                    Err(error) => println!("Refinement failed: {}", error),
                }
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<()> {
    print!("{}> ", label);
    io::stdout().flush()?;
    Ok(())
}
