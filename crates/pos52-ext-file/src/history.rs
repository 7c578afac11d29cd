//! File-based price history sources.
//!
//! Every source reads its input, drops records it cannot use with a typed
//! [`SkipReason`], and hands the rest to [`PriceSeries::new`] sorted by date
//! with duplicates removed. Only a source that cannot be read at all fails.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use pos52_core::error::{CoreError, CoreResult};
use pos52_core::traits::{HistoryLoad, HistoryProvider, SkipReason, SkippedRecord};
use pos52_core::types::{PricePoint, PriceSeries};

// =============================================================================
// SHARED RECORD HANDLING
// =============================================================================

/// A decoded record and where it came from.
struct Candidate {
    origin: String,
    point: PricePoint,
}

/// Sorts candidates by date, keeps the first record of each date, and builds
/// the series.
fn assemble(mut candidates: Vec<Candidate>, mut skipped: Vec<SkippedRecord>) -> CoreResult<HistoryLoad> {
    candidates.sort_by_key(|c| c.point.date);

    let mut points: Vec<PricePoint> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if points.last().is_some_and(|p| p.date == candidate.point.date) {
            skipped.push(SkippedRecord::new(
                candidate.origin,
                SkipReason::DuplicateDate(candidate.point.date),
            ));
            continue;
        }
        points.push(candidate.point);
    }

    Ok(HistoryLoad {
        series: PriceSeries::new(points)?,
        skipped,
    })
}

fn check_close(value: f64) -> Result<f64, SkipReason> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SkipReason::InvalidClose(value))
    }
}

/// Parses `YYYY-MM-DD`, ignoring any time-of-day suffix.
fn parse_date(raw: &str) -> Result<NaiveDate, SkipReason> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| SkipReason::InvalidDate(raw.to_string()))
}

/// Reads a close that may be a JSON number or a numeric string.
fn close_from_json(value: Option<&Value>) -> Result<f64, SkipReason> {
    let close = match value {
        None | Some(Value::Null) => return Err(SkipReason::MissingClose),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| SkipReason::ParseError(format!("close {n} is out of range")))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| SkipReason::ParseError(format!("close '{s}' is not a number")))?,
        Some(other) => {
            return Err(SkipReason::ParseError(format!(
                "close must be a number, got {other}"
            )))
        }
    };
    check_close(close)
}

/// Whole unix seconds from an integer or an integral float such as `1704153600.0`.
#[allow(clippy::cast_possible_truncation)]
fn unix_seconds(value: &Value) -> Option<i64> {
    if let Some(seconds) = value.as_i64() {
        return Some(seconds);
    }
    let seconds = value.as_f64()?;
    let limit = 2f64.powi(63);
    (seconds.fract() == 0.0 && (-limit..limit).contains(&seconds)).then(|| seconds as i64)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

// =============================================================================
// DAILY JSON DIRECTORY SOURCE
// =============================================================================

/// A directory holding one JSON file per trading day.
///
/// Each `*.json` file is an object with a `close` and an optional `date`
/// (`YYYY-MM-DD`). When `date` is missing or blank the file stem is used, so
/// files named `2024-05-17.json` need no date field. Other files in the
/// directory are ignored.
#[derive(Debug, Clone)]
pub struct DailyJsonDirSource {
    dir: PathBuf,
}

impl DailyJsonDirSource {
    /// Creates a source over `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_file(path: &Path) -> Result<PricePoint, SkipReason> {
        let content = fs::read_to_string(path).map_err(|e| SkipReason::ParseError(e.to_string()))?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| SkipReason::ParseError(e.to_string()))?;
        let record = value
            .as_object()
            .ok_or_else(|| SkipReason::ParseError("expected a JSON object".to_string()))?;

        let close = close_from_json(record.get("close"))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw_date = record
            .get("date")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&stem);

        Ok(PricePoint::new(parse_date(raw_date)?, close))
    }
}

impl HistoryProvider for DailyJsonDirSource {
    fn name(&self) -> String {
        format!("daily-json:{}", self.dir.display())
    }

    fn load(&self) -> CoreResult<HistoryLoad> {
        let entries =
            fs::read_dir(&self.dir).map_err(|e| CoreError::io(self.dir.display().to_string(), e))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut candidates = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();
        for path in &files {
            let origin = display_name(path);
            match Self::read_file(path) {
                Ok(point) => candidates.push(Candidate { origin, point }),
                Err(reason) => skipped.push(SkippedRecord::new(origin, reason)),
            }
        }

        log::debug!(
            "read {} daily files from {} ({} unusable)",
            files.len(),
            self.dir.display(),
            skipped.len()
        );
        assemble(candidates, skipped)
    }
}

// =============================================================================
// CHART JSON SOURCE
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChartDocument {
    series: Vec<Value>,
}

/// A chart snapshot: `{"series": [{"time": <unix seconds>, "close": ..}, ..]}`.
///
/// `time` is converted to its UTC calendar date. Extra fields (open, high,
/// volume, ...) are ignored, as are top-level keys besides `series`.
#[derive(Debug, Clone)]
pub struct ChartJsonSource {
    path: PathBuf,
}

impl ChartJsonSource {
    /// Creates a source over the chart file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_entry(entry: &Value) -> Result<PricePoint, SkipReason> {
        let close = close_from_json(entry.get("close"))?;
        let time = entry.get("time").ok_or_else(|| SkipReason::InvalidDate("missing time".into()))?;
        let seconds = unix_seconds(time).ok_or_else(|| SkipReason::InvalidDate(time.to_string()))?;
        let date = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| SkipReason::InvalidDate(seconds.to_string()))?
            .date_naive();
        Ok(PricePoint::new(date, close))
    }
}

impl HistoryProvider for ChartJsonSource {
    fn name(&self) -> String {
        format!("chart-json:{}", self.path.display())
    }

    fn load(&self) -> CoreResult<HistoryLoad> {
        let source_name = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|e| CoreError::io(&source_name, e))?;
        let document: ChartDocument =
            serde_json::from_str(&content).map_err(|e| CoreError::parse(&source_name, e))?;

        let mut candidates = Vec::with_capacity(document.series.len());
        let mut skipped = Vec::new();
        for (i, entry) in document.series.iter().enumerate() {
            let origin = format!("series[{i}]");
            match Self::read_entry(entry) {
                Ok(point) => candidates.push(Candidate { origin, point }),
                Err(reason) => skipped.push(SkippedRecord::new(origin, reason)),
            }
        }

        assemble(candidates, skipped)
    }
}

// =============================================================================
// CSV SOURCE
// =============================================================================

/// A CSV file with a header row containing `date` and `close` columns.
///
/// Column names match case-insensitively; other columns are ignored. An empty
/// close cell is a missing close.
#[derive(Debug, Clone)]
pub struct CsvHistorySource {
    path: PathBuf,
}

impl CsvHistorySource {
    /// Creates a source over the CSV file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl HistoryProvider for CsvHistorySource {
    fn name(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn load(&self) -> CoreResult<HistoryLoad> {
        let source_name = self.path.display().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| CoreError::io(&source_name, e))?;

        let headers = reader
            .headers()
            .map_err(|e| CoreError::parse(&source_name, e))?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| CoreError::parse(&source_name, format!("missing '{name}' column")))
        };
        let date_col = column("date")?;
        let close_col = column("close")?;

        let mut candidates = Vec::new();
        let mut skipped = Vec::new();
        for (row, result) in reader.records().enumerate() {
            // Header is line 1.
            let origin = format!("line {}", row + 2);
            let parsed = result
                .map_err(|e| SkipReason::ParseError(e.to_string()))
                .and_then(|record| {
                    let close = match record.get(close_col).unwrap_or("") {
                        "" => return Err(SkipReason::MissingClose),
                        raw => raw.parse::<f64>().map_err(|_| {
                            SkipReason::ParseError(format!("close '{raw}' is not a number"))
                        })?,
                    };
                    let close = check_close(close)?;
                    let date = parse_date(record.get(date_col).unwrap_or(""))?;
                    Ok(PricePoint::new(date, close))
                });
            match parsed {
                Ok(point) => candidates.push(Candidate { origin, point }),
                Err(reason) => skipped.push(SkippedRecord::new(origin, reason)),
            }
        }

        assemble(candidates, skipped)
    }
}

// =============================================================================
// IN-MEMORY SOURCE
// =============================================================================

/// Price points already in memory, for tests and embedding.
///
/// Points go through the same sorting, deduplication, and close checks as
/// file input.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    points: Vec<PricePoint>,
}

impl InMemorySource {
    /// Creates a named source over `points`.
    pub fn new(name: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

impl HistoryProvider for InMemorySource {
    fn name(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn load(&self) -> CoreResult<HistoryLoad> {
        let mut candidates = Vec::with_capacity(self.points.len());
        let mut skipped = Vec::new();
        for (i, point) in self.points.iter().enumerate() {
            let origin = format!("point[{i}]");
            match check_close(point.close) {
                Ok(_) => candidates.push(Candidate { origin, point: *point }),
                Err(reason) => skipped.push(SkippedRecord::new(origin, reason)),
            }
        }
        assemble(candidates, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-05-17"), Ok(date(2024, 5, 17)));
        assert_eq!(parse_date(" 2024-05-17T16:00:00Z "), Ok(date(2024, 5, 17)));
        assert_eq!(
            parse_date("17/05/2024"),
            Err(SkipReason::InvalidDate("17/05/2024".to_string()))
        );
    }

    #[test]
    fn test_unix_seconds() {
        assert_eq!(unix_seconds(&serde_json::json!(1_704_153_600)), Some(1_704_153_600));
        assert_eq!(unix_seconds(&serde_json::json!(1_704_153_600.0)), Some(1_704_153_600));
        assert_eq!(unix_seconds(&serde_json::json!(1_704_153_600.5)), None);
        assert_eq!(unix_seconds(&serde_json::json!(1e30)), None);
        assert_eq!(unix_seconds(&serde_json::json!("1704153600")), None);
    }

    #[test]
    fn test_close_from_json() {
        assert_eq!(close_from_json(Some(&serde_json::json!(12.5))), Ok(12.5));
        assert_eq!(close_from_json(Some(&serde_json::json!("12.5"))), Ok(12.5));
        assert_eq!(close_from_json(None), Err(SkipReason::MissingClose));
        assert_eq!(close_from_json(Some(&Value::Null)), Err(SkipReason::MissingClose));
        assert_eq!(
            close_from_json(Some(&serde_json::json!(-1.0))),
            Err(SkipReason::InvalidClose(-1.0))
        );
        assert!(matches!(
            close_from_json(Some(&serde_json::json!("abc"))),
            Err(SkipReason::ParseError(_))
        ));
        assert!(matches!(
            close_from_json(Some(&serde_json::json!([1]))),
            Err(SkipReason::ParseError(_))
        ));
    }

    #[test]
    fn test_in_memory_sorts_and_dedupes() {
        let source = InMemorySource::new(
            "t",
            vec![
                PricePoint::new(date(2024, 1, 3), 3.0),
                PricePoint::new(date(2024, 1, 1), 1.0),
                PricePoint::new(date(2024, 1, 3), 9.0),
                PricePoint::new(date(2024, 1, 2), 0.0),
            ],
        );
        let load = source.load().unwrap();

        assert_eq!(load.series.closes(), &[1.0, 3.0]);
        assert_eq!(load.skipped_with("invalid_close"), 1);
        assert_eq!(load.skipped_with("duplicate_date"), 1);
        assert_eq!(load.skipped[1].origin, "point[2]");
    }
}
