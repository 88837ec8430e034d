use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Load .env before anything reads backend configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing with appropriate verbosity
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        2.. => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    match cli.command {
        Commands::Generate(args) => runtime.block_on(cli::commands::generate::execute(args))?,
        Commands::Refine(args) => runtime.block_on(cli::commands::refine::execute(args))?,
        Commands::Session(args) => runtime.block_on(cli::commands::session::execute(args))?,
        Commands::Check(args) => runtime.block_on(cli::commands::check::execute(args))?,
        Commands::Demo(args) => runtime.block_on(cli::commands::demo::execute(args))?,
    }

    Ok(())
}
