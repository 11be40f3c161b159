//! Command-line parsing for the profile likelihood scan tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the scan/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{LEVEL_68, LEVEL_95, OtherScanSpec};
use crate::error::AppError;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "nllscan",
    version,
    about = "Confidence intervals and plots from 1D profile likelihood scans"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a scan: print the summary, plot, and optionally export.
    Scan(ScanArgs),
    /// Print the interval report only (useful for scripting).
    Intervals(ScanArgs),
    /// Write a synthetic demo scan CSV.
    Demo(DemoArgs),
}

/// Common options for `scan` and `intervals`.
#[derive(Debug, Parser, Clone)]
pub struct ScanArgs {
    /// Main input file(s) for the scan; several files are chained in order.
    #[arg(required = true)]
    pub main: Vec<PathBuf>,

    /// Use this parameter of interest (its column name in the inputs).
    #[arg(long, default_value = "r")]
    pub poi: String,

    /// JSON file with POI name translations.
    #[arg(long)]
    pub translate: Option<PathBuf>,

    /// Legend label for the main scan.
    #[arg(long, default_value = "Observed")]
    pub main_label: String,

    /// Remove points with -2 dln L above this cut before interpolating.
    #[arg(long, default_value_t = 7.0)]
    pub y_cut: f64,

    /// y-axis maximum for plots.
    #[arg(long, default_value_t = 6.5)]
    pub y_max: f64,

    /// Threshold levels in -2 dln L, nominal first.
    #[arg(long, num_args = 1.., default_values_t = [LEVEL_68, LEVEL_95])]
    pub levels: Vec<f64>,

    /// Secondary scans as FILE:LABEL[:COLOR].
    #[arg(long, num_args = 0..)]
    pub others: Vec<String>,

    /// Quadratic error subtraction labels (comma separated; one per scan,
    /// main first).
    #[arg(long)]
    pub breakdown: Option<String>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the ASCII plot.
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// ASCII plot width (characters).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Export the processed scan as JSON.
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Export the crossing intervals as CSV.
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Export an SVG chart.
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

/// Options for the synthetic demo scan.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Output CSV path.
    #[arg(default_value = "demo_scan.csv")]
    pub output: PathBuf,

    /// POI column name to write.
    #[arg(long, default_value = "r")]
    pub poi: String,

    /// Number of scan points.
    #[arg(long, default_value_t = 41)]
    pub points: usize,

    /// Random seed for the jitter.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// True minimum of the synthetic curve.
    #[arg(long, default_value_t = 0.0)]
    pub best_fit: f64,

    /// Width below the best fit.
    #[arg(long, default_value_t = 0.5)]
    pub sigma_lo: f64,

    /// Width above the best fit.
    #[arg(long, default_value_t = 0.5)]
    pub sigma_hi: f64,

    /// Scan range minimum.
    #[arg(long, default_value_t = -2.0)]
    pub x_min: f64,

    /// Scan range maximum.
    #[arg(long, default_value_t = 2.0)]
    pub x_max: f64,

    /// Gaussian y jitter (0 disables noise).
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,
}

/// Parse one `FILE:LABEL[:COLOR]` secondary-scan spec.
///
/// `default_color` is used when the COLOR field is absent (callers pass a
/// per-scan palette index so overlays get distinct strokes by default).
pub fn parse_other_spec(spec: &str, default_color: usize) -> Result<OtherScanSpec, AppError> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(AppError::input(format!(
            "Invalid --others spec '{spec}' (expected FILE:LABEL[:COLOR])."
        )));
    }

    let color = match parts.get(2) {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            AppError::input(format!("Invalid color index '{raw}' in --others spec '{spec}'."))
        })?,
        None => default_color,
    };

    Ok(OtherScanSpec {
        path: PathBuf::from(parts[0]),
        label: parts[1].to_string(),
        color,
    })
}
