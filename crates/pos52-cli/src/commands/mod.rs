//! CLI command implementations.

pub mod config;
pub mod position;
pub mod stats;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use position::PositionArgs;
pub use stats::StatsArgs;

use std::path::{Path, PathBuf};

use clap::Args;

use pos52_config::{AnalysisConfig, Validate};
use pos52_core::traits::HistoryProvider;
use pos52_ext_file::{ChartJsonSource, CsvHistorySource, DailyJsonDirSource};

use crate::error::{CliError, CliResult};

/// Where the price history comes from. Exactly one source is required.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Directory of per-day JSON files ({"date": "YYYY-MM-DD", "close": n})
    #[arg(long, env = "POS52_HISTORY_DIR")]
    pub history_dir: Option<PathBuf>,

    /// Chart snapshot JSON with a `series` of {time, close} entries
    #[arg(long, env = "POS52_CHART_JSON")]
    pub chart_json: Option<PathBuf>,

    /// CSV file with `date` and `close` columns
    #[arg(long, env = "POS52_CSV")]
    pub csv: Option<PathBuf>,
}

impl SourceArgs {
    /// Builds the history provider for the chosen source.
    pub fn provider(&self) -> CliResult<Box<dyn HistoryProvider>> {
        let existing = |path: &Path| {
            if path.exists() {
                Ok(path.to_path_buf())
            } else {
                Err(CliError::SourceNotFound(path.to_path_buf()))
            }
        };

        if let Some(dir) = &self.history_dir {
            return Ok(Box::new(DailyJsonDirSource::new(existing(dir)?)));
        }
        if let Some(path) = &self.chart_json {
            return Ok(Box::new(ChartJsonSource::new(existing(path)?)));
        }
        match &self.csv {
            Some(path) => Ok(Box::new(CsvHistorySource::new(existing(path)?))),
            None => Err(CliError::NoSource),
        }
    }
}

/// Overrides for the window parameters of the loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Trailing window length in trading days
    #[arg(long, env = "POS52_LOOKBACK")]
    pub lookback: Option<usize>,

    /// Forward horizon in trading days
    #[arg(long, env = "POS52_HORIZON")]
    pub horizon: Option<usize>,

    /// Minimum bucket size before aggregates are reported
    #[arg(long, env = "POS52_MIN_SAMPLES")]
    pub min_samples: Option<usize>,
}

/// Loads the configuration file (or defaults) and applies overrides.
pub fn load_config(path: Option<&Path>, window: &WindowArgs) -> CliResult<AnalysisConfig> {
    let mut config = match path {
        Some(path) => AnalysisConfig::from_toml_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(lookback) = window.lookback {
        config = config.with_lookback(lookback);
    }
    if let Some(horizon) = window.horizon {
        config = config.with_horizon(horizon);
    }
    if let Some(min_samples) = window.min_samples {
        config = config.with_min_samples(min_samples);
    }

    config.validate_or_error()?;
    Ok(config)
}
