//! Read/write scan JSON files.
//!
//! Scan JSON is the "portable" representation of a processed scan:
//! - best fit + per-level intervals and central values
//! - run metadata (POI, label, y-cut, generation date)
//! - a precomputed interpolant grid for quick plotting
//!
//! The schema is defined by `domain::ScanFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{ScanFile, ScanGrid};
use crate::error::AppError;
use crate::scan::{CrossingFinder, ScanSummary};

/// Grid density for the exported interpolant.
const GRID_POINTS: usize = 101;

/// Write a scan JSON file.
pub fn write_scan_json(
    path: &Path,
    poi: &str,
    poi_label: &str,
    y_cut: f64,
    finder: &CrossingFinder,
    summary: &ScanSummary,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create scan JSON '{}': {e}", path.display())))?;

    let (x, y) = finder.grid(GRID_POINTS);
    let scan = ScanFile {
        tool: "nllscan".to_string(),
        generated: chrono::Local::now().date_naive(),
        poi: poi.to_string(),
        poi_label: poi_label.to_string(),
        y_cut,
        n_points: finder.curve().len(),
        best_fit: summary.best_fit,
        levels: summary.levels.clone(),
        grid: ScanGrid { x, y },
    };

    serde_json::to_writer_pretty(file, &scan)
        .map_err(|e| AppError::input(format!("Failed to write scan JSON: {e}")))?;

    Ok(())
}

/// Read a scan JSON file.
pub fn read_scan_json(path: &Path) -> Result<ScanFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open scan JSON '{}': {e}", path.display())))?;
    let scan: ScanFile =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid scan JSON: {e}")))?;
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CentralValue, CrossingInterval, LevelSummary};

    #[test]
    fn scan_file_round_trips_through_json() {
        let scan = ScanFile {
            tool: "nllscan".to_string(),
            generated: chrono::NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            poi: "r".to_string(),
            poi_label: "r".to_string(),
            y_cut: 7.0,
            n_points: 5,
            best_fit: 0.0,
            levels: vec![LevelSummary {
                level: 1.0,
                intervals: vec![CrossingInterval {
                    lo: -0.5,
                    hi: 0.5,
                    valid_lo: true,
                    valid_hi: true,
                    contains_bf: true,
                }],
                central: Some(CentralValue {
                    value: 0.0,
                    err_hi: 0.5,
                    err_lo: -0.5,
                }),
            }],
            grid: ScanGrid {
                x: vec![-1.0, 0.0, 1.0],
                y: vec![4.0, 0.0, 4.0],
            },
        };

        let json = serde_json::to_string(&scan).unwrap();
        let back: ScanFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.poi, "r");
        assert_eq!(back.levels.len(), 1);
        assert_eq!(back.levels[0].intervals[0].lo, -0.5);
        assert_eq!(back.grid.x.len(), 3);
        assert_eq!(back.generated, scan.generated);
    }
}
