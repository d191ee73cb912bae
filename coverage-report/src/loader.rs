//! Experiment CSV loader
//!
//! Reads one experiment result file into a [`SeriesData`] table. Required
//! columns are `run_id` and `coverage`; `total_lines` is optional and only its
//! first row is used. Extra columns are ignored.

use crate::types::{CoveragePoint, ReportError, Result, SeriesData};
use serde::Deserialize;
use std::path::Path;

/// Column holding the denominator for coverage
pub const TOTAL_LINES_COLUMN: &str = "total_lines";

/// Raw CSV row as written by the fuzzing harness
#[derive(Debug, Deserialize)]
struct CsvRow {
    run_id: f64,
    coverage: f64,
    #[serde(default)]
    total_lines: Option<f64>,
}

/// Load an experiment CSV file
///
/// # Errors
/// * [`ReportError::MissingFile`] if `path` does not exist
/// * [`ReportError::Load`] if the file has no columns, lacks a required column,
///   or holds a non-numeric value
/// * [`ReportError::EmptyData`] if the header parsed but no rows follow
pub fn load_series(path: &Path) -> Result<SeriesData> {
    if !path.exists() {
        return Err(ReportError::MissingFile(path.to_path_buf()));
    }

    log::debug!("Reading experiment file: {:?}", path);

    let load_error = |message: String| ReportError::Load {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| load_error(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| load_error(e.to_string()))?
        .clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(load_error("No columns to parse from file".to_string()));
    }
    let has_total_lines = headers.iter().any(|h| h == TOTAL_LINES_COLUMN);

    let mut points = Vec::new();
    let mut first_total = None;
    for row in reader.deserialize::<CsvRow>() {
        let row = row.map_err(|e| load_error(e.to_string()))?;
        if points.is_empty() {
            first_total = row.total_lines;
        }
        points.push(CoveragePoint::new(row.run_id, row.coverage));
    }

    if points.is_empty() {
        return Err(ReportError::EmptyData(path.to_path_buf()));
    }

    let total_lines = if has_total_lines {
        first_total.filter(|v| v.is_finite())
    } else {
        None
    };

    log::debug!(
        "Loaded {} rows from {:?} (total_lines: {:?})",
        points.len(),
        path,
        total_lines
    );

    Ok(SeriesData {
        points,
        total_lines,
    })
}
