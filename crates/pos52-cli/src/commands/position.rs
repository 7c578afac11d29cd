//! Position command implementation.
//!
//! Reports where the latest close sits inside its trailing window.

use anyhow::Result;
use clap::Args;

use pos52_analytics::BucketStatsPipeline;

use crate::cli::{Context, OutputFormat};
use crate::commands::{load_config, SourceArgs};
use crate::output::{print_header, print_output, print_single, print_warning, KeyValue};

/// Arguments for the position command.
#[derive(Args, Debug)]
pub struct PositionArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Trailing window length in trading days
    #[arg(long, env = "POS52_LOOKBACK")]
    pub lookback: Option<usize>,
}

/// Execute the position command.
pub fn execute(args: PositionArgs, ctx: &Context) -> Result<()> {
    let window = crate::commands::WindowArgs {
        lookback: args.lookback,
        ..Default::default()
    };
    let config = load_config(ctx.config.as_deref(), &window)?;
    let pipeline = BucketStatsPipeline::new(config)?;

    let provider = args.source.provider()?;
    let load = provider.load()?;
    for skipped in &load.skipped {
        tracing::warn!("{}: skipped {} ({})", provider.name(), skipped.origin, skipped.reason);
    }

    let current = pipeline.current_position(&load.series);

    match ctx.format {
        OutputFormat::Json => print_single(&current)?,
        OutputFormat::Table | OutputFormat::Csv => {
            let Some(current) = current else {
                print_warning(&format!(
                    "No position: need more than {} closes and a trailing window that is not flat",
                    pipeline.config().lookback
                ));
                return Ok(());
            };

            let rows = vec![
                KeyValue::new("Date", current.date),
                KeyValue::new("Close", current.close),
                KeyValue::new("Window Low", current.window_low),
                KeyValue::new("Window High", current.window_high),
                KeyValue::new("Position", format!("{:.2}", current.position)),
                KeyValue::new("Bucket", current.bucket.as_deref().unwrap_or("-")),
            ];
            if ctx.format == OutputFormat::Table && !ctx.quiet {
                print_header("Current 52-Week Position");
            }
            print_output(&rows, ctx.format)?;
        }
    }

    Ok(())
}
