//! Chart model
//!
//! Everything that ends up on the chart, computed without touching a drawing
//! backend: curves with their assigned colors, end-of-curve annotations, the
//! running maximum of `total_lines`, and axis ranges.

use crate::types::{format_value, CoveragePoint, SeriesData, SeriesSummary};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;

/// Fractional padding added on each side of the data range
const AXIS_MARGIN: f64 = 0.05;

/// Extra room to the right of the last point for the "N runs" annotations
const ANNOTATION_MARGIN: f64 = 0.10;

/// Legend label of the coverage ceiling line
pub const REFERENCE_LABEL: &str = "Total Instrumented Lines";

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesColor(pub u8, pub u8, pub u8);

/// Categorical palette ("tab10"), cycled in plotting order
pub const PALETTE: [SeriesColor; 10] = [
    SeriesColor(0x1f, 0x77, 0xb4),
    SeriesColor(0xff, 0x7f, 0x0e),
    SeriesColor(0x2c, 0xa0, 0x2c),
    SeriesColor(0xd6, 0x27, 0x28),
    SeriesColor(0x94, 0x67, 0xbd),
    SeriesColor(0x8c, 0x56, 0x4b),
    SeriesColor(0xe3, 0x77, 0xc2),
    SeriesColor(0x7f, 0x7f, 0x7f),
    SeriesColor(0xbc, 0xbd, 0x22),
    SeriesColor(0x17, 0xbe, 0xcf),
];

/// Color of the `index`-th plotted series
pub fn palette_color(index: usize) -> SeriesColor {
    PALETTE[index % PALETTE.len()]
}

/// One curve as it will be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub label: String,
    pub path: PathBuf,
    pub color: SeriesColor,
    pub points: Vec<CoveragePoint>,
    /// Last row of the table; the marker and annotation sit here
    pub endpoint: CoveragePoint,
    /// This series' own `total_lines`
    pub total_lines: Option<f64>,
}

impl PlottedSeries {
    /// Annotation text drawn next to the endpoint
    pub fn annotation(&self) -> String {
        format!("{} runs", self.endpoint.run_id as i64)
    }

    pub fn summary(&self) -> SeriesSummary {
        let coverage_ratio = self
            .total_lines
            .filter(|total| *total > 0.0)
            .map(|total| self.endpoint.coverage / total);
        SeriesSummary {
            label: self.label.clone(),
            path: self.path.clone(),
            points: self.points.len(),
            final_run_id: self.endpoint.run_id,
            final_coverage: self.endpoint.coverage,
            total_lines: self.total_lines,
            coverage_ratio,
        }
    }
}

/// Accumulated chart state across all processed series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartModel {
    series: Vec<PlottedSeries>,
    max_total_lines: f64,
}

impl ChartModel {
    /// Create an empty chart
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a loaded series, assigning it the next palette color
    ///
    /// Returns the console summary line, which reports coverage against the
    /// running maximum of `total_lines` as it stands after this series.
    pub fn add_series(
        &mut self,
        label: impl Into<String>,
        path: impl Into<PathBuf>,
        data: SeriesData,
    ) -> Option<String> {
        let endpoint = data.endpoint()?;
        if let Some(total) = data.total_lines {
            self.max_total_lines = self.max_total_lines.max(total);
        }

        let series = PlottedSeries {
            label: label.into(),
            path: path.into(),
            color: palette_color(self.series.len()),
            points: data.points,
            endpoint,
            total_lines: data.total_lines,
        };
        let line = format!(
            "{}: {}/{} lines | {} runs",
            series.label,
            format_value(endpoint.coverage),
            format_value(self.max_total_lines),
            format_value(endpoint.run_id)
        );
        self.series.push(series);
        Some(line)
    }

    pub fn series(&self) -> &[PlottedSeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Running maximum of `total_lines` (0 when no series provided it)
    pub fn max_total_lines(&self) -> f64 {
        self.max_total_lines
    }

    /// Height of the coverage ceiling line, drawn only when positive
    pub fn reference_line(&self) -> Option<f64> {
        (self.max_total_lines > 0.0).then_some(self.max_total_lines)
    }

    /// Text placed above the reference line at the left edge
    pub fn reference_text(&self) -> Option<String> {
        self.reference_line()
            .map(|value| format!(" Max: {}", format_value(value)))
    }

    /// Horizontal axis range covering all points plus annotation room
    pub fn x_range(&self) -> Range<f64> {
        let xs = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.run_id));
        match bounds(xs) {
            Some((min, max)) => {
                let span = span_of(min, max);
                (min - AXIS_MARGIN * span)..(max + (AXIS_MARGIN + ANNOTATION_MARGIN) * span)
            }
            None => 0.0..1.0,
        }
    }

    /// Vertical axis range covering all points and the reference line
    pub fn y_range(&self) -> Range<f64> {
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.coverage))
            .chain(self.reference_line());
        match bounds(ys) {
            Some((min, max)) => {
                let span = span_of(min, max);
                (min - AXIS_MARGIN * span)..(max + 2.0 * AXIS_MARGIN * span)
            }
            None => 0.0..1.0,
        }
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn span_of(min: f64, max: f64) -> f64 {
    let span = max - min;
    if span > 0.0 {
        span
    } else if max != 0.0 {
        max.abs()
    } else {
        1.0
    }
}
