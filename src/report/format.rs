//! Formatted terminal output.
//!
//! Number formatting follows the convention downstream plots use: interval
//! bounds are rounded to two significant digits, printed with two decimals
//! below 1 and without padding above 10.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{CentralValue, ScanConfig};
use crate::error::AppError;
use crate::io::IngestedScan;
use crate::report::Breakdown;
use crate::scan::{CrossingFinder, ScanSummary};

/// Display label for a POI, from the built-in map or a user-supplied JSON
/// translation file (`{"name": "label", ...}`).
pub fn poi_label(poi: &str, translate: Option<&Path>) -> Result<String, AppError> {
    if let Some(path) = translate {
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::input(format!("Failed to open translation JSON '{}': {e}", path.display()))
        })?;
        let map: HashMap<String, String> = serde_json::from_reader(file)
            .map_err(|e| AppError::input(format!("Invalid translation JSON: {e}")))?;
        if let Some(label) = map.get(poi) {
            return Ok(label.clone());
        }
        return Ok(poi.to_string());
    }

    Ok(builtin_label(poi).unwrap_or(poi).to_string())
}

/// Built-in labels for common EFT operator coefficients.
fn builtin_label(poi: &str) -> Option<&'static str> {
    let label = match poi {
        "cbW" => "c_bW/Lambda^2",
        "cptb" => "c_phitb/Lambda^2",
        "cpt" => "c_phit/Lambda^2",
        "ctp" => "c_tphi/Lambda^2",
        "ctZ" => "c_tZ/Lambda^2",
        "ctW" => "c_tW/Lambda^2",
        "cpQ3" => "c_phiQ^3/Lambda^2",
        "cpQM" => "c_phiQ^-/Lambda^2",
        _ => return None,
    };
    Some(label)
}

/// Round to two significant digits.
fn round_2sig(v: f64) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let factor = 10f64.powi(1 - v.abs().log10().floor() as i32);
    (v * factor).round() / factor
}

/// Format an interval bound: two significant digits, two decimals below 1,
/// bare digits above 10.
pub fn fmt_bound(v: f64) -> String {
    let a = round_2sig(v.abs());
    if a < 1.0 {
        format!("{a:.2}")
    } else {
        format!("{a}")
    }
}

/// Signed interval-bound text, e.g. `-0.50` / `+1.4`.
fn fmt_signed_bound(v: f64) -> String {
    let sign = if v < 0.0 { '-' } else { '+' };
    format!("{sign}{}", fmt_bound(v))
}

/// One `NN% CL [lo, hi]` line from absolute interval endpoints.
pub fn format_cl_line(tag: &str, lo: f64, hi: f64) -> String {
    format!("{tag} CL [{}, {}]", fmt_signed_bound(lo), fmt_signed_bound(hi))
}

/// Format the full run summary (dataset stats + best fit + CL intervals).
pub fn format_run_summary(
    label: &str,
    ingest: &IngestedScan,
    finder: &CrossingFinder,
    summary: &ScanSummary,
    config: &ScanConfig,
) -> String {
    let curve = finder.curve();
    let mut out = String::new();

    out.push_str("=== nllscan - 1D profile likelihood scan ===\n");
    out.push_str(&format!("POI: {label}\n"));
    out.push_str(&format!(
        "Points: n={} (read {}, {} row errors) | x=[{:.4}, {:.4}] | y-cut={}\n",
        curve.len(),
        ingest.rows_read,
        ingest.row_errors.len(),
        curve.x_min(),
        curve.x_max(),
        config.y_cut,
    ));
    out.push_str(&format!("Best fit: {label} = {:.4}\n", summary.best_fit));

    if let Some(c) = summary.central() {
        out.push('\n');
        out.push_str(&format!(
            "{}\n",
            format_cl_line("68%", c.value + c.err_lo, c.value + c.err_hi)
        ));
    }
    if let Some(c) = summary.central_2sig() {
        out.push_str(&format!(
            "{}\n",
            format_cl_line("95%", c.value + c.err_lo, c.value + c.err_hi)
        ));
    }

    out.push('\n');
    out.push_str(&format_intervals(summary));

    out
}

/// Per-level interval table with open/closed bound markers.
pub fn format_intervals(summary: &ScanSummary) -> String {
    let mut out = String::new();
    out.push_str("Intervals:\n");
    for level in &summary.levels {
        if level.intervals.is_empty() {
            out.push_str(&format!(
                "  level {:.4}: none (below curve minimum)\n",
                level.level
            ));
            continue;
        }
        for c in &level.intervals {
            let lo_mark = if c.valid_lo { "" } else { " (open left)" };
            let hi_mark = if c.valid_hi { "" } else { " (open right)" };
            let bf_mark = if c.contains_bf { " *" } else { "" };
            out.push_str(&format!(
                "  level {:.4}: [{:.4}, {:.4}]{lo_mark}{hi_mark}{bf_mark}\n",
                level.level, c.lo, c.hi
            ));
        }
    }
    out
}

/// One-line central value with asymmetric errors.
pub fn format_central(label: &str, c: &CentralValue) -> String {
    format!(
        "{label} = {:.2} +{:.2}/-{:.2}",
        c.value,
        c.err_hi,
        c.err_lo.abs()
    )
}

/// Breakdown line, e.g. `r = 1.00 +0.40/-0.40 (syst) +0.30/-0.30 (stat)`.
pub fn format_breakdown(label: &str, value: f64, breakdown: &Breakdown) -> String {
    let mut out = format!("{label} = {value:.2}");
    for term in &breakdown.terms {
        out.push_str(&format!(" +{:.2}/-{:.2} ({})", term.hi, term.lo.abs(), term.label));
    }
    out
}
