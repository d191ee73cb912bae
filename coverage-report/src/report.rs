//! Report generator
//!
//! Runs the single pass over the configured experiments: load each file, add
//! it to the chart, annotate it, and finally save the image. A bad or missing
//! input only skips that series; the chart is saved regardless.

use crate::chart::ChartModel;
use crate::config::ReportConfig;
use crate::loader::load_series;
use crate::render::render_chart;
use crate::types::{ReportError, ReportOutcome, Result, SkipReason, SkippedSeries};
use chrono::Utc;
use std::io::{self, Write};

/// Builds and saves the coverage comparison chart
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator for the given configuration
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load every configured series into a chart model
    ///
    /// Warnings and per-series summary lines are written to `console` in
    /// processing order. Only a failing `console` write is returned as an error.
    ///
    /// # Example
    /// ```no_run
    /// use coverage_report::{ReportConfig, ReportGenerator};
    ///
    /// let generator = ReportGenerator::new(ReportConfig::new());
    /// let (model, skipped) = generator.build_chart(&mut std::io::stdout()).unwrap();
    /// println!("{} plotted, {} skipped", model.series().len(), skipped.len());
    /// ```
    pub fn build_chart<W: Write>(&self, console: &mut W) -> Result<(ChartModel, Vec<SkippedSeries>)> {
        let mut model = ChartModel::new();
        let mut skipped = Vec::new();

        for spec in &self.config.series {
            let path = &spec.path;
            let reason = match load_series(path) {
                Ok(data) => match model.add_series(spec.label.as_str(), path.as_path(), data) {
                    Some(summary) => {
                        log::info!("Plotted {:?} from {:?}", spec.label, path);
                        writeln!(console, "{}", summary)?;
                        continue;
                    }
                    None => SkipReason::Empty,
                },
                Err(ReportError::MissingFile(_)) => SkipReason::MissingFile,
                Err(ReportError::Load { message, .. }) => SkipReason::Load(message),
                Err(ReportError::EmptyData(_)) => SkipReason::Empty,
                Err(e) => return Err(e),
            };

            log::warn!("Skipping {:?} ({:?}): {}", spec.label, path, reason);
            match &reason {
                SkipReason::MissingFile => {
                    writeln!(console, "Warning: {} not found. Skipping.", path.display())?
                }
                SkipReason::Load(message) => {
                    writeln!(console, "Error reading {}: {}", path.display(), message)?
                }
                SkipReason::Empty => writeln!(console, "Warning: {} is empty.", path.display())?,
            }
            skipped.push(SkippedSeries {
                label: spec.label.clone(),
                path: path.clone(),
                reason,
            });
        }

        Ok((model, skipped))
    }

    /// Build the chart, save it, and report what was drawn
    ///
    /// # Errors
    /// Returns [`ReportError::Render`] if the image cannot be written and
    /// [`ReportError::IoError`] if `console` fails. Missing, malformed or empty
    /// inputs never fail the run.
    pub fn generate<W: Write>(&self, console: &mut W) -> Result<ReportOutcome> {
        let (model, skipped) = self.build_chart(console)?;

        render_chart(&model, &self.config.chart, &self.config.output)?;

        let output = self.config.output.path.clone();
        log::info!(
            "Chart saved: {:?} ({} plotted, {} skipped)",
            output,
            model.series().len(),
            skipped.len()
        );
        writeln!(console, "\nPlot saved to {}", output.display())?;

        Ok(ReportOutcome {
            output,
            series: model.series().iter().map(|s| s.summary()).collect(),
            skipped,
            reference_line: model.reference_line(),
            generated_at: Utc::now(),
        })
    }
}

/// Generate the report for `config`, printing progress to stdout
pub fn generate_report(config: &ReportConfig) -> Result<ReportOutcome> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    ReportGenerator::new(config.clone()).generate(&mut handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesSpec;
    use std::fs;
    use tempfile::TempDir;

    fn console_lines(buffer: &[u8]) -> Vec<String> {
        String::from_utf8(buffer.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_build_chart_mixed_inputs() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.csv");
        let empty = dir.path().join("empty.csv");
        let broken = dir.path().join("broken.csv");
        let missing = dir.path().join("missing.csv");
        fs::write(&good, "run_id,coverage,total_lines\n10,5,40\n20,8,40\n").unwrap();
        fs::write(&empty, "run_id,coverage,total_lines\n").unwrap();
        fs::write(&broken, "run_id,coverage\nx,y\n").unwrap();

        let config = ReportConfig::new().with_series(vec![
            SeriesSpec::new("Missing", &missing),
            SeriesSpec::new("Empty", &empty),
            SeriesSpec::new("Broken", &broken),
            SeriesSpec::new("Good", &good),
        ]);

        let mut console = Vec::new();
        let (model, skipped) = ReportGenerator::new(config)
            .build_chart(&mut console)
            .unwrap();

        assert_eq!(model.series().len(), 1);
        assert_eq!(model.reference_line(), Some(40.0));
        let reasons: Vec<&SkipReason> = skipped.iter().map(|s| &s.reason).collect();
        assert_eq!(reasons[0], &SkipReason::MissingFile);
        assert_eq!(reasons[1], &SkipReason::Empty);
        assert!(matches!(reasons[2], SkipReason::Load(_)));

        let lines = console_lines(&console);
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            format!("Warning: {} not found. Skipping.", missing.display())
        );
        assert_eq!(lines[1], format!("Warning: {} is empty.", empty.display()));
        assert!(lines[2].starts_with(&format!("Error reading {}: ", broken.display())));
        assert_eq!(lines[3], "Good: 8/40 lines | 20 runs");
    }

    #[test]
    fn test_empty_series_does_not_raise_reference_line() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.csv");
        fs::write(&empty, "run_id,coverage,total_lines\n").unwrap();

        let config = ReportConfig::new().with_series(vec![SeriesSpec::new("Empty", &empty)]);
        let (model, skipped) = ReportGenerator::new(config)
            .build_chart(&mut io::sink())
            .unwrap();

        assert!(model.is_empty());
        assert_eq!(skipped.len(), 1);
        assert_eq!(model.reference_line(), None);
    }
}
