//! Stats command implementation.
//!
//! Runs the bucket-statistics pipeline over a price history.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use pos52_analytics::{BucketStats, BucketStatsPipeline, BucketStatsReport};
use pos52_ext_file::JsonReportWriter;

use crate::cli::{Context, OutputFormat};
use crate::commands::{load_config, SourceArgs, WindowArgs};
use crate::output::{format_pct, print_header, print_output, print_single, print_success, KeyValue};

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Also write the report as JSON to this file (parent directories are created)
    #[arg(short, long, env = "POS52_OUT")]
    pub out: Option<PathBuf>,
}

/// One bucket as displayed.
#[derive(Debug, Clone, Serialize, Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Samples")]
    samples: usize,
    #[tabled(rename = "Avg Return")]
    avg_return: String,
    #[tabled(rename = "Avg Drawdown")]
    avg_drawdown: String,
    #[tabled(rename = "Worst Drawdown")]
    worst_drawdown: String,
    #[tabled(rename = "Win Rate")]
    win_rate: String,
}

impl From<&BucketStats> for BucketRow {
    fn from(stats: &BucketStats) -> Self {
        let [lower, upper] = stats.range;
        Self {
            bucket: stats.name.clone(),
            range: format!("{lower}-{upper}"),
            samples: stats.sample_size,
            avg_return: format_pct(stats.avg_forward_return_pct, 2),
            avg_drawdown: format_pct(stats.avg_drawdown_pct, 2),
            worst_drawdown: format_pct(stats.worst_drawdown_pct, 2),
            win_rate: format_pct(stats.win_rate_pct, 1),
        }
    }
}

/// Execute the stats command.
pub fn execute(args: StatsArgs, ctx: &Context) -> Result<()> {
    let config = load_config(ctx.config.as_deref(), &args.window)?;
    let pipeline = BucketStatsPipeline::new(config)?;
    let provider = args.source.provider()?;

    tracing::info!("loading history from {}", provider.name());
    let report = pipeline.run_provider(provider.as_ref())?;

    if let Some(out) = &args.out {
        JsonReportWriter::new().write(out, &report)?;
        if !ctx.quiet {
            print_success(&format!("Report written to {}", out.display()));
        }
    }

    let rows: Vec<BucketRow> = report.buckets.iter().map(BucketRow::from).collect();
    match ctx.format {
        OutputFormat::Table => print_report_table(&report, &rows, ctx.quiet)?,
        OutputFormat::Json => print_single(&report)?,
        OutputFormat::Csv => print_output(&rows, OutputFormat::Csv)?,
    }

    Ok(())
}

fn print_report_table(report: &BucketStatsReport, rows: &[BucketRow], quiet: bool) -> Result<()> {
    let meta = &report.meta;

    if !quiet {
        print_header("52-Week Position Buckets");
        let summary = vec![
            KeyValue::new(
                "As of",
                meta.asof.map_or_else(|| "-".to_string(), |d| d.to_string()),
            ),
            KeyValue::new("Lookback", meta.lookback),
            KeyValue::new("Horizon", meta.horizon),
            KeyValue::new("Min Samples", meta.min_samples),
            KeyValue::new("Samples", meta.sample_total),
        ];
        print_output(&summary, OutputFormat::Table)?;
    }

    print_output(rows, OutputFormat::Table)?;

    if !quiet {
        let d = &report.diagnostics;
        print_header("Skipped Days");
        let skipped = vec![
            KeyValue::new("Flat window", d.degenerate_window),
            KeyValue::new("No forward data", d.missing_forward_data),
            KeyValue::new("Non-finite", d.non_finite),
            KeyValue::new("Out of range", d.out_of_range),
        ];
        print_output(&skipped, OutputFormat::Table)?;
    }

    Ok(())
}
