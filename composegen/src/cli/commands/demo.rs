//! Demo command: the three canonical generation scenarios

use super::backend_from_env;
use crate::cli::app::DemoArgs;
use anyhow::Result;
use composegen_core::pipeline::{CodegenMode, GenerationRequest, UiGenerator};

const DEMO_DESCRIPTIONS: &[&str] = &[
    "Create a simple login screen with a title, username field, password field, and a login button",
    "Build a card with an image, title text, and a button",
    "Design a settings screen with text and buttons in a column",
];

pub async fn execute(args: DemoArgs) -> Result<()> {
    let backend = backend_from_env()?;
    let mode = if args.template { CodegenMode::Template } else { CodegenMode::Delegated };
    let generator = UiGenerator::new(backend).with_codegen_mode(mode);

    for (idx, description) in DEMO_DESCRIPTIONS.iter().enumerate() {
        println!("{}", "#".repeat(70));
        println!("EXAMPLE {}", idx + 1);
        println!("{}", "#".repeat(70));

        let run = generator.run(GenerationRequest::new(*description)).await;
        println!("{}", run.state.final_report);

        if idx + 1 < DEMO_DESCRIPTIONS.len() {
            println!();
        }
    }

    Ok(())
}
