//! Export crossing intervals to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per (level, interval).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::scan::ScanSummary;

/// Write a scan CSV in the fitting-engine layout (used by `demo`).
///
/// `points` carry y as `-2 Δln L`; the file stores `deltaNLL`, so y is
/// halved on the way out (the ingest doubles it back).
pub fn write_scan_csv(path: &Path, poi: &str, points: &[(f64, f64)]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create scan CSV '{}': {e}", path.display())))?;

    writeln!(file, "{poi},deltaNLL")
        .map_err(|e| AppError::input(format!("Failed to write scan CSV header: {e}")))?;
    for (x, y) in points {
        writeln!(file, "{x:.10},{:.10}", y / 2.0)
            .map_err(|e| AppError::input(format!("Failed to write scan CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the per-level intervals of one scan to a CSV file.
pub fn write_intervals_csv(path: &Path, label: &str, summary: &ScanSummary) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "scan,level,best_fit,lo,hi,valid_lo,valid_hi,contains_bf")
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for level in &summary.levels {
        for c in &level.intervals {
            writeln!(
                file,
                "{},{:.8},{:.10},{:.10},{:.10},{},{},{}",
                label,
                level.level,
                summary.best_fit,
                c.lo,
                c.hi,
                c.valid_lo,
                c.valid_hi,
                c.contains_bf,
            )
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}
