//! Coverage Report CLI Application
//!
//! Command-line front end for the coverage-report library. It adds:
//! - TOML configuration files
//! - Command-line overrides for series, output and title
//! - Logging setup
//! - JSON run summaries
//!
//! Run with no arguments to compare the three default experiments in the
//! current directory and write `experiment_results.png`.

use anyhow::Result;
use clap::Parser;
use coverage_report::{ReportConfig, SeriesSpec};
use std::path::PathBuf;

mod config;
mod summary;

/// Coverage Report - Plot fuzzing coverage growth for several experiments
#[derive(Parser, Debug)]
#[command(name = "coverage-report")]
#[command(about = "Plot coverage over iterations for fuzzing experiments", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Experiment to plot as LABEL=PATH (can be repeated; replaces the configured list)
    #[arg(short, long, value_name = "LABEL=PATH", value_parser = parse_series)]
    series: Vec<SeriesSpec>,

    /// Output image (.png, or .svg for vector output)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Chart title
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Output resolution in dots per inch
    #[arg(long, value_name = "DPI", value_parser = clap::value_parser!(u32).range(1..))]
    dpi: Option<u32>,

    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn parse_series(value: &str) -> std::result::Result<SeriesSpec, String> {
    SeriesSpec::parse(value).ok_or_else(|| format!("expected LABEL=PATH, got {:?}", value))
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Coverage Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", coverage_report::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            let config = config::load_config(path)?;
            log::debug!("Configuration loaded successfully");
            config
        }
        None => config::AppConfig::default(),
    };

    let (report_config, summary_path) = resolve_config(&args, &app_config);
    log::debug!(
        "Plotting {} series into {:?}",
        report_config.series.len(),
        report_config.output.path
    );

    let outcome = coverage_report::generate_report(&report_config)?;
    log::info!(
        "Report generated at {}",
        outcome.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(path) = summary_path {
        summary::write_summary(&outcome, &path)?;
    }

    Ok(())
}

/// Combine the config file with command-line overrides (flags win)
fn resolve_config(args: &Args, app_config: &config::AppConfig) -> (ReportConfig, Option<PathBuf>) {
    let mut report_config = app_config.to_report_config();

    if !args.series.is_empty() {
        report_config.series = args.series.clone();
    }
    if let Some(output) = &args.output {
        report_config.output.path = output.clone();
    }
    if let Some(title) = &args.title {
        report_config.chart.title = title.clone();
    }
    if let Some(dpi) = args.dpi {
        report_config.output.dpi = dpi;
    }

    let summary_path = args
        .summary
        .clone()
        .or_else(|| app_config.output.summary.clone());

    (report_config, summary_path)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let args = Args::try_parse_from(["coverage-report"]).unwrap();
        let (config, summary) = resolve_config(&args, &config::AppConfig::default());
        assert_eq!(config, ReportConfig::new());
        assert_eq!(summary, None);
    }

    #[test]
    fn test_flags_override_config_file() {
        let app_config: config::AppConfig = toml::from_str(
            r#"
            [[series]]
            label = "From file"
            path = "file.csv"

            [output]
            path = "file.png"
            dpi = 100
            summary = "file.json"
        "#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "coverage-report",
            "--series",
            "Boosted=runs/boosted.csv",
            "-s",
            "Fast (AFL++)=runs/fast.csv",
            "--output",
            "cli.svg",
            "--title",
            "CLI title",
            "--summary",
            "cli.json",
        ])
        .unwrap();

        let (config, summary) = resolve_config(&args, &app_config);
        assert_eq!(
            config.series,
            vec![
                SeriesSpec::new("Boosted", "runs/boosted.csv"),
                SeriesSpec::new("Fast (AFL++)", "runs/fast.csv"),
            ]
        );
        assert_eq!(config.output.path, PathBuf::from("cli.svg"));
        assert_eq!(config.output.dpi, 100);
        assert_eq!(config.chart.title, "CLI title");
        assert_eq!(summary, Some(PathBuf::from("cli.json")));
    }

    #[test]
    fn test_config_file_summary_is_used_without_flag() {
        let app_config: config::AppConfig =
            toml::from_str("[output]\nsummary = \"file.json\"\n").unwrap();
        let args = Args::try_parse_from(["coverage-report"]).unwrap();
        let (_, summary) = resolve_config(&args, &app_config);
        assert_eq!(summary, Some(PathBuf::from("file.json")));
    }

    #[test]
    fn test_invalid_series_argument() {
        assert!(Args::try_parse_from(["coverage-report", "--series", "no-separator"]).is_err());
        assert!(Args::try_parse_from(["coverage-report", "--dpi", "0"]).is_err());
    }
}
