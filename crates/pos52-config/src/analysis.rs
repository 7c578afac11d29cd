//! Analysis configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pos52_core::types::{BucketSpec, POSITION_CEILING, POSITION_FLOOR};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Trailing window length in trading days (one trading year).
pub const DEFAULT_LOOKBACK: usize = 252;

/// Forward horizon in trading days (one trading quarter).
pub const DEFAULT_HORIZON: usize = 63;

/// Buckets with fewer samples report no aggregates.
pub const DEFAULT_MIN_SAMPLES: usize = 20;

/// Smallest allowed history margin beyond `lookback + horizon`.
pub const MIN_MARGIN: usize = 5;

/// Settings for one bucket-statistics run.
///
/// Every field has a serde default, so a TOML file only needs the values it
/// changes:
///
/// ```toml
/// lookback = 126
/// min_samples = 10
///
/// [[bucket_edges]]
/// name = "low"
/// lower = 0.0
/// upper = 50.0
///
/// [[bucket_edges]]
/// name = "high"
/// lower = 50.0
/// upper = 100.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Trailing window length; the window excludes the day being measured.
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// Forward horizon for returns and drawdowns.
    #[serde(default = "default_horizon")]
    pub horizon: usize,

    /// Minimum bucket size for aggregates to be reported.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Extra points required beyond `lookback + horizon`.
    #[serde(default = "default_margin")]
    pub margin: usize,

    /// Enable parallel outcome computation (requires the `parallel` feature).
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum number of candidate days before going parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Ordered position bands covering `[0, 100]`.
    ///
    /// Kept last so the TOML rendering places the array of tables after the
    /// plain values.
    #[serde(default = "BucketSpec::standard")]
    pub bucket_edges: Vec<BucketSpec>,
}

fn default_lookback() -> usize {
    DEFAULT_LOOKBACK
}

fn default_horizon() -> usize {
    DEFAULT_HORIZON
}

fn default_min_samples() -> usize {
    DEFAULT_MIN_SAMPLES
}

fn default_margin() -> usize {
    MIN_MARGIN
}

fn default_true() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    1_000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback: default_lookback(),
            horizon: default_horizon(),
            min_samples: default_min_samples(),
            margin: default_margin(),
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
            bucket_edges: BucketSpec::standard(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookback window.
    #[must_use]
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    /// Sets the forward horizon.
    #[must_use]
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the minimum bucket size.
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Sets the history margin.
    #[must_use]
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Replaces the bucket edges.
    #[must_use]
    pub fn with_bucket_edges(mut self, edges: Vec<BucketSpec>) -> Self {
        self.bucket_edges = edges;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Minimum series length: `lookback + horizon + margin`.
    ///
    /// Saturates at `usize::MAX`; validation rejects configs whose sum
    /// overflows.
    #[must_use]
    pub fn required_history(&self) -> usize {
        self.checked_required_history().unwrap_or(usize::MAX)
    }

    fn checked_required_history(&self) -> Option<usize> {
        self.lookback
            .checked_add(self.horizon)?
            .checked_add(self.margin)
    }

    /// Parses a config from TOML text without validating it.
    pub fn parse_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parses a config from TOML text and validates it.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config = Self::parse_toml(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a config from a TOML file and validates it.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Renders the config as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.lookback < 2 {
            errors.push(ValidationError::new(
                "lookback",
                "must be at least 2 (a single-close window is always flat)",
            ));
        }
        if self.horizon < 1 {
            errors.push(ValidationError::new("horizon", "must be at least 1"));
        }
        if self.margin < MIN_MARGIN {
            errors.push(ValidationError::new(
                "margin",
                format!("must be at least {MIN_MARGIN}"),
            ));
        }

        if self.checked_required_history().is_none() {
            errors.push(ValidationError::new(
                "lookback",
                "lookback + horizon + margin overflows the maximum series length",
            ));
        }

        errors.extend(validate_bucket_edges(&self.bucket_edges));
        errors
    }
}

fn validate_bucket_edges(edges: &[BucketSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let (Some(first), Some(last)) = (edges.first(), edges.last()) else {
        errors.push(ValidationError::new("bucket_edges", "must not be empty"));
        return errors;
    };

    if first.lower != POSITION_FLOOR {
        errors.push(ValidationError::new(
            "bucket_edges",
            format!("first bucket must start at {POSITION_FLOOR}, got {}", first.lower),
        ));
    }
    if last.upper != POSITION_CEILING {
        errors.push(ValidationError::new(
            "bucket_edges",
            format!("last bucket must end at {POSITION_CEILING}, got {}", last.upper),
        ));
    }

    for (i, bucket) in edges.iter().enumerate() {
        if bucket.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("bucket_edges[{i}].name"),
                "must not be empty",
            ));
        }
        if !(bucket.lower.is_finite() && bucket.upper.is_finite()) || bucket.lower >= bucket.upper {
            errors.push(ValidationError::new(
                format!("bucket_edges[{i}]"),
                format!("lower ({}) must be below upper ({})", bucket.lower, bucket.upper),
            ));
        }
        if edges[..i].iter().any(|b| b.name == bucket.name) {
            errors.push(ValidationError::new(
                format!("bucket_edges[{i}].name"),
                format!("duplicate bucket name '{}'", bucket.name),
            ));
        }
    }

    for pair in edges.windows(2) {
        if pair[0].upper != pair[1].lower {
            errors.push(ValidationError::new(
                "bucket_edges",
                format!(
                    "'{}' ends at {} but '{}' starts at {}",
                    pair[0].name, pair[0].upper, pair[1].name, pair[1].lower
                ),
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.lookback, 252);
        assert_eq!(config.horizon, 63);
        assert_eq!(config.min_samples, 20);
        assert_eq!(config.margin, 5);
        assert_eq!(config.bucket_edges, BucketSpec::standard());
        assert_eq!(config.required_history(), 320);
        assert!(config.is_valid());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AnalysisConfig::new()
            .with_lookback(50)
            .with_horizon(20)
            .with_min_samples(1)
            .with_parallel(false)
            .with_parallel_threshold(10);

        assert_eq!(config.lookback, 50);
        assert_eq!(config.horizon, 20);
        assert_eq!(config.min_samples, 1);
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 10);
        assert_eq!(config.required_history(), 75);
    }

    #[test]
    fn test_rejects_small_windows() {
        let config = AnalysisConfig::new().with_lookback(1).with_horizon(0);
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            config.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_rejects_small_margin() {
        let config = AnalysisConfig::new().with_margin(4);
        match config.validate_or_error() {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "margin"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_overflowing_history() {
        let config = AnalysisConfig::new().with_lookback(usize::MAX - 10);
        assert_eq!(config.required_history(), usize::MAX);
        match config.validate_or_error() {
            Err(ConfigError::Validation { field, message }) => {
                assert_eq!(field, "lookback");
                assert!(message.contains("overflows"));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let config = AnalysisConfig::new().with_horizon(usize::MAX).with_margin(usize::MAX);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_rejects_overflowing_history_from_toml() {
        let content = format!("lookback = {}\nhorizon = {}\n", i64::MAX, i64::MAX);
        assert!(matches!(
            AnalysisConfig::from_toml_str(&content),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_rejects_gapped_edges() {
        let config = AnalysisConfig::new().with_bucket_edges(vec![
            BucketSpec::new("low", 0.0, 40.0),
            BucketSpec::new("high", 50.0, 100.0),
        ]);
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("'low' ends at 40"));
    }

    #[test]
    fn test_rejects_uncovered_axis() {
        let config = AnalysisConfig::new().with_bucket_edges(vec![
            BucketSpec::new("mid", 10.0, 60.0),
            BucketSpec::new("top", 60.0, 95.0),
        ]);
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_rejects_duplicate_and_inverted_buckets() {
        let config = AnalysisConfig::new().with_bucket_edges(vec![
            BucketSpec::new("a", 0.0, 50.0),
            BucketSpec::new("a", 50.0, 50.0),
            BucketSpec::new("b", 50.0, 100.0),
        ]);
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"bucket_edges[1]".to_string()));
        assert!(fields.contains(&"bucket_edges[1].name".to_string()));
    }

    #[test]
    fn test_rejects_empty_edges() {
        let config = AnalysisConfig::new().with_bucket_edges(Vec::new());
        assert!(!config.is_valid());
    }

    #[test]
    fn test_toml_partial() {
        let config = AnalysisConfig::from_toml_str("lookback = 126\nmin_samples = 5\n").unwrap();
        assert_eq!(config.lookback, 126);
        assert_eq!(config.min_samples, 5);
        assert_eq!(config.horizon, DEFAULT_HORIZON);
        assert_eq!(config.bucket_edges.len(), 4);
    }

    #[test]
    fn test_toml_custom_edges() {
        let content = r#"
            [[bucket_edges]]
            name = "low"
            lower = 0.0
            upper = 50.0

            [[bucket_edges]]
            name = "high"
            lower = 50.0
            upper = 100.0
        "#;
        let config = AnalysisConfig::from_toml_str(content).unwrap();
        assert_eq!(config.bucket_edges.len(), 2);
        assert_eq!(config.bucket_edges[1].name, "high");
    }

    #[test]
    fn test_toml_invalid_is_rejected() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("lookback = 1"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("lookback = \"long\""),
            Err(ConfigError::Deserialization(_))
        ));
    }

    #[test]
    fn test_parse_toml_skips_validation() {
        let config = AnalysisConfig::parse_toml("lookback = 1\nhorizon = 0\n").unwrap();
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalysisConfig::new().with_lookback(100);
        let text = config.to_toml_string().unwrap();
        let parsed = AnalysisConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pos52.toml");
        std::fs::write(&path, "horizon = 21\n").unwrap();

        let config = AnalysisConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.horizon, 21);

        let missing = AnalysisConfig::from_toml_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_serde_json() {
        let config = AnalysisConfig::new().with_parallel_threshold(75);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.parallel_threshold, 75);
    }
}
