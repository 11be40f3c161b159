//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while locating crossings
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Δ(-2 ln L) level whose crossings bound the 68% CL interval
/// (chi-square quantile, 1 degree of freedom).
pub const LEVEL_68: f64 = 0.98894648;

/// Δ(-2 ln L) level whose crossings bound the 95% CL interval
/// (chi-square quantile, 1 degree of freedom).
pub const LEVEL_95: f64 = 3.84145882;

/// A single scan observation: parameter value `x`, `-2 Δln L` value `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSample {
    pub x: f64,
    pub y: f64,
}

/// One maximal interval where the interpolated scan curve sits below a
/// threshold level.
///
/// `valid_lo` / `valid_hi` record whether the bound was found by an actual
/// root crossing inside the sampled range (`true`) or clipped to the range
/// edge because the curve never rises back above the level (`false`, an
/// open interval on that side).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingInterval {
    pub lo: f64,
    pub hi: f64,
    pub valid_lo: bool,
    pub valid_hi: bool,
    /// True iff `lo <= best_fit <= hi`.
    pub contains_bf: bool,
}

/// Central value with signed asymmetric errors derived from the best-fit
/// interval at one level.
///
/// `err_lo` is kept signed (`lo - value`, usually negative); reports take
/// the absolute value where appropriate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralValue {
    pub value: f64,
    pub err_hi: f64,
    pub err_lo: f64,
}

/// All crossing results for one threshold level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: f64,
    /// Maximal below-threshold intervals, disjoint and sorted by `lo`.
    pub intervals: Vec<CrossingInterval>,
    /// Central value from the interval containing the best fit, if any.
    pub central: Option<CentralValue>,
}

impl LevelSummary {
    /// The interval containing the best fit, if any.
    pub fn best_fit_interval(&self) -> Option<&CrossingInterval> {
        self.intervals.iter().find(|c| c.contains_bf)
    }

    /// Intervals *not* containing the best fit (secondary minima).
    pub fn other_intervals(&self) -> impl Iterator<Item = &CrossingInterval> {
        self.intervals.iter().filter(|c| !c.contains_bf)
    }
}

/// A secondary scan overlay (`--others FILE:LABEL[:COLOR]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherScanSpec {
    pub path: PathBuf,
    pub label: String,
    /// Palette index for the chart (0 = same as main).
    pub color: usize,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Main scan input file(s); several files are chained into one scan.
    pub main: Vec<PathBuf>,
    /// Secondary scans, each a single file with a label.
    pub others: Vec<OtherScanSpec>,

    /// Parameter-of-interest column name in the input CSVs.
    pub poi: String,
    /// Optional JSON file overriding the built-in POI label map.
    pub translate: Option<PathBuf>,
    /// Legend label for the main scan.
    pub main_label: String,

    /// Samples with `y > y_cut` are discarded before fitting the spline.
    pub y_cut: f64,
    /// y-axis maximum for plots.
    pub y_max: f64,
    /// Threshold levels, lowest first. The first level defines the nominal
    /// (68% CL) errors, the second (if present) the 2σ errors.
    pub levels: Vec<f64>,

    /// Comma-separated labels for quadratic error subtraction across the
    /// main scan and `others` (in order). Length must be `others + 1`.
    pub breakdown: Option<String>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub export_svg: Option<PathBuf>,
}

/// A saved scan file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFile {
    pub tool: String,
    pub generated: NaiveDate,
    pub poi: String,
    pub poi_label: String,
    pub y_cut: f64,
    pub n_points: usize,
    pub best_fit: f64,
    pub levels: Vec<LevelSummary>,
    pub grid: ScanGrid,
}

/// Interpolant sampled on a regular grid (for quick re-plotting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
