use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "offers")]
#[command(about = "Cheapest in-stock dedicated servers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "OFFERS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the cheapest servers in stock at a datacenter
    Top(TopArgs),

    /// Show the effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args)]
pub struct TopArgs {
    /// Catalog subsidiary (default from config: GB)
    #[arg(long, env = "OFFERS_SUBSIDIARY")]
    pub subsidiary: Option<String>,

    /// Datacenter code (default from config: lon)
    #[arg(long, env = "OFFERS_DATACENTER")]
    pub datacenter: Option<String>,

    /// Number of offers (default from config: 5)
    #[arg(long, short = 'n', env = "OFFERS_TOP")]
    pub top: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read the availability feed from a JSON file instead of the API
    #[arg(long, requires = "catalog_file")]
    pub availability_file: Option<PathBuf>,

    /// Read the catalog feed from a JSON file instead of the API
    #[arg(long, requires = "availability_file")]
    pub catalog_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    /// Telegram MarkdownV2
    Telegram,
}
