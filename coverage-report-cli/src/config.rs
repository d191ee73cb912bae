//! Configuration loading and parsing
//!
//! The config file mirrors the library's [`ReportConfig`]; every section is
//! optional and falls back to the built-in three-experiment comparison.

use anyhow::{bail, Context, Result};
use coverage_report::{ChartStyle, LegendPosition, OutputConfig, ReportConfig, SeriesSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub chart: ChartSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChartSection {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub legend: Option<LegendPosition>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputSection {
    pub path: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    /// Where to write the JSON run summary
    pub summary: Option<PathBuf>,
}

impl AppConfig {
    /// Merge onto the library defaults
    ///
    /// An empty `series` list keeps the default experiments.
    pub fn to_report_config(&self) -> ReportConfig {
        let mut config = ReportConfig::new();
        if !self.series.is_empty() {
            config.series = self.series.clone();
        }

        let defaults = ChartStyle::default();
        config.chart = ChartStyle {
            title: self.chart.title.clone().unwrap_or(defaults.title),
            x_label: self.chart.x_label.clone().unwrap_or(defaults.x_label),
            y_label: self.chart.y_label.clone().unwrap_or(defaults.y_label),
            legend: self.chart.legend.unwrap_or(defaults.legend),
        };

        let defaults = OutputConfig::default();
        config.output = OutputConfig {
            path: self.output.path.clone().unwrap_or(defaults.path),
            dpi: self.output.dpi.unwrap_or(defaults.dpi),
            width_in: self.output.width_in.unwrap_or(defaults.width_in),
            height_in: self.output.height_in.unwrap_or(defaults.height_in),
        };

        config
    }

    /// Reject settings that cannot produce an image
    pub fn validate(&self) -> Result<()> {
        if self.output.dpi == Some(0) {
            bail!("output.dpi must be greater than zero");
        }
        for (name, value) in [("width_in", self.output.width_in), ("height_in", self.output.height_in)] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    bail!("output.{} must be a positive number, got {}", name, v);
                }
            }
        }
        for series in &self.series {
            if series.label.trim().is_empty() {
                bail!("series entry for {:?} has an empty label", series.path);
            }
        }
        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
