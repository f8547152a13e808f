mod cli;
mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use offers_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        cli::Commands::Top(args) => commands::top::handle(args, &config).await,
        cli::Commands::Config { path } => {
            commands::config::handle(path, &config, cli.config.as_deref())
        }
    }
}
