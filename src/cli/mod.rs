//! CLI interface for metal-prices
//!
//! Provides subcommands for:
//! - `run`: Fetch, convert, and (optionally) save one observation
//! - `config`: Show the effective configuration

mod run;

pub use run::{confirm, render_table, RunArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "metal-prices")]
#[command(about = "Gold and silver spot prices in USD and EGP, per ounce and per gram")]
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
    /// Fetch prices once and record the observation
    Run(RunArgs),
    /// Show configuration
    Config,
}
