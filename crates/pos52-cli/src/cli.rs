//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, PositionArgs, StatsArgs};

/// Pos52 - 52-week positional bucket statistics
#[derive(Parser)]
#[command(name = "pos52")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Analysis configuration file (TOML)
    #[arg(short, long, global = true, env = "POS52_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every command.
    pub fn context(&self) -> Context {
        Context {
            format: self.format,
            quiet: self.quiet,
            config: self.config.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Forward return and drawdown statistics per 52-week position bucket
    Stats(StatsArgs),

    /// Position of the latest close inside its trailing window
    Position(PositionArgs),

    /// Inspect and validate analysis configurations
    Config(ConfigArgs),
}

/// Global options resolved once and handed to commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Configuration file, if any.
    pub config: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
