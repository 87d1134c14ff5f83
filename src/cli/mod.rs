//! CLI interface for sheet-ticker
//!
//! Provides subcommands for:
//! - `update`: run one read-resolve-write cycle
//! - `config`: show the loaded configuration

mod update;

pub use update::UpdateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sheet-ticker")]
#[command(about = "Batch updater that syncs crypto ticker prices into a Google spreadsheet")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file; relative paths resolve next to the executable
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one spreadsheet update cycle
    Update(UpdateArgs),
    /// Show the loaded configuration
    Config,
}
