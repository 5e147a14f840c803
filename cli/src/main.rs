use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use presentation::cli::{Cli, CliApp};
use shared::telemetry::init_tracing;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let app = CliApp::from_settings(&cli)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;
    app.run(cli).await?;
    Ok(())
}
