//! JSON run summary
//!
//! Machine-readable record of what a run plotted and skipped.

use anyhow::{Context, Result};
use coverage_report::ReportOutcome;
use std::fs;
use std::path::Path;

/// Write the outcome as pretty-printed JSON
pub fn write_summary(outcome: &ReportOutcome, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to serialize run summary")?;
    fs::write(path, json).with_context(|| format!("Failed to write summary file: {:?}", path))?;
    log::info!("Summary written to {:?}", path);
    Ok(())
}
