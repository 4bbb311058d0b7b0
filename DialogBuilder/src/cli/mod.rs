//! DialogBuilder CLI - Command-line interface for dialog tree conversion

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "dialogbuilder", version)]
#[command(about = "DialogBuilder: dialog tree import, export, naming and layout", long_about = None)]
struct Cli {
    /// Config file (default: ./dialogbuilder.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Run the DialogBuilder CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    cli.command.execute(&config)?;

    Ok(())
}
