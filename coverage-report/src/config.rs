//! Report configuration types
//!
//! Which experiment files to read, how the chart looks, and where it is saved.
//! Defaults reproduce the fixed three-schedule comparison chart.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output image path
pub const DEFAULT_OUTPUT: &str = "experiment_results.png";

/// Default chart title
pub const DEFAULT_TITLE: &str = "Greybox Fuzzing: Power Schedule Comparison";

/// Default horizontal axis description
pub const DEFAULT_X_LABEL: &str = "Number of Iterations (Throughput)";

/// Default vertical axis description
pub const DEFAULT_Y_LABEL: &str = "Coverage (Line Hits)";

/// Complete configuration for one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Experiments to plot, in drawing order
    #[serde(default = "default_series")]
    pub series: Vec<SeriesSpec>,

    #[serde(default)]
    pub chart: ChartStyle,

    #[serde(default)]
    pub output: OutputConfig,
}

/// One experiment: a legend label and the CSV file holding its results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub label: String,
    pub path: PathBuf,
}

impl SeriesSpec {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// Parse `LABEL=PATH`
    ///
    /// The label is everything before the first `=`, so paths may contain `=`.
    pub fn parse(spec: &str) -> Option<Self> {
        let (label, path) = spec.split_once('=')?;
        let label = label.trim();
        let path = path.trim();
        if label.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self::new(label, path))
    }
}

/// Text and layout of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_x_label")]
    pub x_label: String,

    #[serde(default = "default_y_label")]
    pub y_label: String,

    #[serde(default)]
    pub legend: LegendPosition,
}

/// Corner of the plotting area holding the legend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    #[default]
    LowerRight,
}

/// Output image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Image path; a `.svg` extension selects the SVG backend
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Dots per inch (pixel density of the bitmap)
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Figure width in inches
    #[serde(default = "default_width_in")]
    pub width_in: f64,

    /// Figure height in inches
    #[serde(default = "default_height_in")]
    pub height_in: f64,
}

fn default_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new("Simple (AFL)", "experiment_simple.csv"),
        SeriesSpec::new("Boosted", "experiment_boosted.csv"),
        SeriesSpec::new("Fast (AFL++)", "experiment_fast.csv"),
    ]
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_x_label() -> String {
    DEFAULT_X_LABEL.to_string()
}

fn default_y_label() -> String {
    DEFAULT_Y_LABEL.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_dpi() -> u32 {
    300
}

fn default_width_in() -> f64 {
    12.0
}

fn default_height_in() -> f64 {
    8.0
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            series: default_series(),
            chart: ChartStyle::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: default_title(),
            x_label: default_x_label(),
            y_label: default_y_label(),
            legend: LegendPosition::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            dpi: default_dpi(),
            width_in: default_width_in(),
            height_in: default_height_in(),
        }
    }
}

impl OutputConfig {
    /// Image size in pixels (at least 1x1)
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        let width = (self.width_in * dpi).round().max(1.0) as u32;
        let height = (self.height_in * dpi).round().max(1.0) as u32;
        (width, height)
    }

    /// Convert a typographic point size to pixels at this resolution
    pub fn pt_to_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// True when the output path asks for an SVG document
    pub fn is_svg(&self) -> bool {
        self.path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false)
    }
}

impl ReportConfig {
    /// Create a configuration with the default series and chart settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: replace the series list
    pub fn with_series(mut self, series: Vec<SeriesSpec>) -> Self {
        self.series = series;
        self
    }

    /// Builder method: append a series
    pub fn add_series(mut self, label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.series.push(SeriesSpec::new(label, path));
        self
    }

    /// Builder method: set the output image path
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.path = path.into();
        self
    }

    /// Builder method: set the output resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.output.dpi = dpi;
        self
    }

    /// Builder method: set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.chart.title = title.into();
        self
    }

    /// Builder method: set the legend corner
    pub fn with_legend(mut self, legend: LegendPosition) -> Self {
        self.chart.legend = legend;
        self
    }

    /// Resolve relative series and output paths against `base`
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for series in &mut self.series {
            if series.path.is_relative() {
                series.path = base.join(&series.path);
            }
        }
        if self.output.path.is_relative() {
            self.output.path = base.join(&self.output.path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_series_order() {
        let config = ReportConfig::new();
        let labels: Vec<&str> = config.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Simple (AFL)", "Boosted", "Fast (AFL++)"]);
        assert_eq!(config.series[0].path, PathBuf::from("experiment_simple.csv"));
        assert_eq!(config.output.path, PathBuf::from("experiment_results.png"));
    }

    #[test]
    fn test_report_config_builder() {
        let config = ReportConfig::new()
            .with_series(Vec::new())
            .add_series("Only", "only.csv")
            .with_output("out.svg")
            .with_dpi(72)
            .with_title("Custom")
            .with_legend(LegendPosition::UpperLeft);

        assert_eq!(config.series, vec![SeriesSpec::new("Only", "only.csv")]);
        assert!(config.output.is_svg());
        assert_eq!(config.output.dpi, 72);
        assert_eq!(config.chart.title, "Custom");
        assert_eq!(config.chart.legend, LegendPosition::UpperLeft);
    }

    #[test]
    fn test_pixel_size_and_points() {
        let output = OutputConfig::default();
        assert_eq!(output.pixel_size(), (3600, 2400));
        assert_eq!(output.pt_to_px(72.0), 300.0);

        let tiny = OutputConfig {
            width_in: 0.0,
            ..OutputConfig::default()
        };
        assert_eq!(tiny.pixel_size().0, 1);
    }

    #[test]
    fn test_series_spec_parse() {
        assert_eq!(
            SeriesSpec::parse("Boosted=runs/boosted.csv"),
            Some(SeriesSpec::new("Boosted", "runs/boosted.csv"))
        );
        assert_eq!(
            SeriesSpec::parse("Fast (AFL++) = a=b.csv"),
            Some(SeriesSpec::new("Fast (AFL++)", "a=b.csv"))
        );
        assert_eq!(SeriesSpec::parse("no-separator"), None);
        assert_eq!(SeriesSpec::parse("=path.csv"), None);
        assert_eq!(SeriesSpec::parse("label="), None);
    }

    #[test]
    fn test_resolve_paths() {
        let config = ReportConfig::new()
            .with_series(vec![
                SeriesSpec::new("rel", "a.csv"),
                SeriesSpec::new("abs", "/data/b.csv"),
            ])
            .resolve_paths(Path::new("/work"));
        assert_eq!(config.series[0].path, PathBuf::from("/work/a.csv"));
        assert_eq!(config.series[1].path, PathBuf::from("/data/b.csv"));
        assert_eq!(config.output.path, PathBuf::from("/work/experiment_results.png"));
    }
}
