//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use pos52_config::ConfigError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No history source was given.
    #[error("No history source: pass --history-dir, --chart-json or --csv")]
    NoSource,

    /// The history source does not exist.
    #[error("History source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
