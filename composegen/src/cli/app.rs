use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "composegen",
    version,
    about = "Composegen - Generate Jetpack Compose UI code from natural language",
    long_about = "Composegen turns plain-English UI descriptions into Jetpack Compose code, \
reviews the result for accessibility and design considerations, and iteratively refines it \
against your feedback."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Compose code from a description
    #[command(about = "Generate Compose UI code from a natural-language description")]
    Generate(GenerateArgs),

    /// Refine previously generated code against feedback
    #[command(about = "Refine a generated file according to free-text feedback")]
    Refine(RefineArgs),

    /// Interactive generate-and-refine session
    #[command(about = "Run an interactive session with iteration history")]
    Session(SessionArgs),

    /// Validate a Kotlin file
    #[command(about = "Run the static validator, auto-fixer, and compile check on a file")]
    Check(CheckArgs),

    /// Run the built-in demonstration prompts
    #[command(about = "Generate the three canonical demo screens")]
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Natural-language description of the desired UI
    pub description: String,

    /// Run validation and auto-fix on the generated code
    #[arg(long)]
    pub validate: bool,

    /// Use deterministic template generation instead of the backend
    #[arg(long)]
    pub template: bool,

    /// Return the output as multiple files
    #[arg(long)]
    pub multi_file: bool,

    /// Android project to introspect for existing composables
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Search the sample repository for reference snippets
    #[arg(long)]
    pub examples: bool,

    /// Write the generated code to a file instead of only printing the report
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RefineArgs {
    /// File containing the code to refine
    #[arg(short, long)]
    pub code: PathBuf,

    /// What to improve
    pub feedback: String,

    /// Write the refined code back to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Initial UI description; prompted for interactively when omitted
    pub description: Option<String>,

    /// Run validation on each generated iteration
    #[arg(long)]
    pub validate: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Kotlin file to check
    pub file: PathBuf,

    /// Apply auto-fixes and write the file back
    #[arg(long)]
    pub fix: bool,
}

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Use deterministic template generation instead of the backend
    #[arg(long)]
    pub template: bool,
}
