//! SpecScout CLI - find products under a weight limit in a folder of PDF datasheets.

use clap::Parser;
use specscout_cli::commands;
use specscout_cli::{Cli, Config, Formatter, RunSettings};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before clap reads GEMINI_API_KEY; a missing file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "specscout=debug" } else { "specscout=info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

async fn run(cli: Cli) -> specscout_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = RunSettings::resolve(&cli, config)?;
    let formatter = Formatter::new(settings.format, settings.color);

    commands::execute_scan(&settings, &formatter).await?;
    Ok(())
}
