//! Coverage Report Library
//!
//! Turns the CSV results of fuzzing experiments into a single comparison chart
//! of coverage growth over iteration count.
//!
//! # Architecture
//!
//! One linear pass, no concurrency:
//! - [`loader`] reads each experiment CSV (`run_id`, `coverage`, optional `total_lines`)
//! - [`chart`] accumulates curves, colors, annotations and the coverage ceiling
//! - [`render`] draws the chart with plotters (bitmap or SVG)
//! - [`report`] drives the pass and prints warnings and summaries
//!
//! Missing, malformed and empty inputs are reported and skipped; the chart is
//! always saved.
//!
//! # Example Usage
//!
//! ```no_run
//! use coverage_report::{generate_report, ReportConfig};
//!
//! let config = ReportConfig::new()
//!     .with_series(Vec::new())
//!     .add_series("Simple (AFL)", "experiment_simple.csv")
//!     .add_series("Boosted", "experiment_boosted.csv")
//!     .with_output("experiment_results.png");
//!
//! let outcome = generate_report(&config).unwrap();
//! for series in &outcome.series {
//!     println!("{} reached {} lines", series.label, series.final_coverage);
//! }
//! ```

// Public modules
pub mod chart;
pub mod config;
pub mod loader;
pub mod report;
pub mod types;

// Re-export main types for convenience
pub use chart::{ChartModel, PlottedSeries, SeriesColor};
pub use config::{ChartStyle, LegendPosition, OutputConfig, ReportConfig, SeriesSpec};
pub use loader::load_series;
pub use report::{generate_report, ReportGenerator};
pub use types::{
    CoveragePoint, ReportError, ReportOutcome, Result, SeriesData, SeriesSummary,
    SkipReason, SkippedSeries, Timestamp,
};

// Internal modules (not exposed in public API)
mod render;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
