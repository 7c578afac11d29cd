//! Pos52 CLI - 52-week positional bucket statistics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Bucket statistics from a directory of per-day JSON files
//! pos52 stats --history-dir data/history
//!
//! # Same, from a chart snapshot, written to a report file
//! pos52 stats --chart-json data/chart.json --out data/pos52_bucket_stats.json
//!
//! # Where the latest close sits in its trailing window
//! pos52 position --csv prices.csv --format json
//!
//! # Effective configuration
//! pos52 --config pos52.toml config show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON and CSV output.
    let filter = if cli.quiet {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,pos52=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = cli.context();

    match cli.command {
        Commands::Stats(args) => commands::stats::execute(args, &ctx)?,
        Commands::Position(args) => commands::position::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
