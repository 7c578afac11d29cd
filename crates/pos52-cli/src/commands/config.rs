//! Config command implementation.
//!
//! Shows and validates analysis configurations.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use pos52_config::{AnalysisConfig, Validate};

use crate::cli::{Context, OutputFormat};
use crate::commands::{load_config, WindowArgs};
use crate::output::{print_single, print_success, print_warning};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (file plus defaults)
    Show,

    /// Print the default configuration
    Default,

    /// Validate a configuration file
    Check(CheckArgs),
}

/// Arguments for check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file to validate
    pub file: PathBuf,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = load_config(ctx.config.as_deref(), &WindowArgs::default())?;
            print_config(&config, ctx.format)
        }
        ConfigCommand::Default => print_config(&AnalysisConfig::default(), ctx.format),
        ConfigCommand::Check(check) => execute_check(&check, ctx),
    }
}

fn print_config(config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_single(config)?,
        OutputFormat::Table | OutputFormat::Csv => print!("{}", config.to_toml_string()?),
    }
    Ok(())
}

/// Validates a file and lists every problem found.
fn execute_check(args: &CheckArgs, ctx: &Context) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)?;
    // Parse without validating so every problem is listed at once.
    let config = AnalysisConfig::parse_toml(&content)?;

    let errors = config.validate();
    if errors.is_empty() {
        if !ctx.quiet {
            print_success(&format!("{} is valid", args.file.display()));
        }
        return Ok(());
    }

    for error in &errors {
        print_warning(&error.to_string());
    }
    anyhow::bail!("{} has {} validation error(s)", args.file.display(), errors.len())
}
