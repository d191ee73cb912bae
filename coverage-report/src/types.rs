//! Core types for the coverage report library
//!
//! This module defines the data loaded from experiment CSV files and the
//! error type shared by the loader, the generator and the renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Timestamp type used for report metadata
pub type Timestamp = DateTime<Utc>;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// A single row of an experiment CSV file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoveragePoint {
    /// Cumulative number of fuzzing iterations performed
    pub run_id: f64,
    /// Cumulative number of distinct lines hit so far
    pub coverage: f64,
}

impl CoveragePoint {
    pub fn new(run_id: f64, coverage: f64) -> Self {
        Self { run_id, coverage }
    }

    /// Coordinates in chart space (x = iterations, y = coverage)
    pub fn as_xy(&self) -> (f64, f64) {
        (self.run_id, self.coverage)
    }
}

/// A loaded experiment table
///
/// Always holds at least one point: tables with zero rows are rejected by the
/// loader with [`ReportError::EmptyData`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    /// All rows in file order
    pub points: Vec<CoveragePoint>,
    /// First row's `total_lines` value, if the column exists and is numeric
    pub total_lines: Option<f64>,
}

impl SeriesData {
    /// Last row of the table
    pub fn endpoint(&self) -> Option<CoveragePoint> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Errors that can occur while building a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Experiment file not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("Failed to load {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Experiment file has no rows: {0:?}")]
    EmptyData(PathBuf),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReportError {
    /// Whether this error only affects a single series (the run continues)
    pub fn is_series_error(&self) -> bool {
        matches!(
            self,
            ReportError::MissingFile(_) | ReportError::Load { .. } | ReportError::EmptyData(_)
        )
    }
}

/// Why a series was left out of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SkipReason {
    /// The file does not exist
    MissingFile,
    /// The file exists but could not be parsed into a table
    Load(String),
    /// The table parsed but had zero rows
    Empty,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFile => write!(f, "missing file"),
            SkipReason::Load(message) => write!(f, "load error: {}", message),
            SkipReason::Empty => write!(f, "empty table"),
        }
    }
}

/// A series that was configured but not plotted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSeries {
    pub label: String,
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Per-series figures reported after a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub label: String,
    pub path: PathBuf,
    /// Number of rows plotted
    pub points: usize,
    pub final_run_id: f64,
    pub final_coverage: f64,
    /// This series' own `total_lines` value
    pub total_lines: Option<f64>,
    /// `final_coverage / total_lines`, when the denominator is known and positive
    pub coverage_ratio: Option<f64>,
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOutcome {
    /// Where the chart image was written
    pub output: PathBuf,
    /// Plotted series, in processing order
    pub series: Vec<SeriesSummary>,
    /// Configured series that were not plotted
    pub skipped: Vec<SkippedSeries>,
    /// Height of the "Total Instrumented Lines" reference line, if drawn
    pub reference_line: Option<f64>,
    pub generated_at: Timestamp,
}

/// Format a table value the way it appears in console output
///
/// Integral values print without a fractional part (`180`, not `180.0`).
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
