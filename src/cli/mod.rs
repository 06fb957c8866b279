//! CLI interface for hedge-scan
//!
//! Provides subcommands for:
//! - `scan`: fetch odds for the configured sports and detect opportunities
//! - `check`: run detection over a provider-shaped JSON file
//! - `config`: show the resolved configuration

mod check;
mod report;
mod scan;

pub use check::CheckArgs;
pub use scan::ScanArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hedge-scan")]
#[command(about = "Hedge opportunity scanner for two-way sports betting markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch odds and detect hedge opportunities
    Scan(ScanArgs),
    /// Detect opportunities in a local odds payload
    Check(CheckArgs),
    /// Show the resolved configuration
    Config,
}
