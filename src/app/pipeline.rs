//! Shared scan pipeline used by the `scan` and `intervals` front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> curve curation -> interpolation -> crossings -> breakdown
//!
//! The front-ends then focus on presentation (reports, plots, exports).

use std::path::PathBuf;

use rayon::prelude::*;

use crate::domain::{CentralValue, ScanConfig};
use crate::error::AppError;
use crate::io::{IngestedScan, read_scan_points};
use crate::report::{Breakdown, quadratic_subtraction};
use crate::scan::{CrossingFinder, ScanCurve, ScanSummary, summarize};

/// One fully processed scan.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub label: String,
    /// Palette index for the chart.
    pub color: usize,
    pub ingest: IngestedScan,
    pub finder: CrossingFinder,
    pub summary: ScanSummary,
}

/// All computed outputs of a run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub main: ScanOutput,
    pub others: Vec<ScanOutput>,
    pub breakdown: Option<Breakdown>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_scan(config: &ScanConfig) -> Result<RunOutput, AppError> {
    let main = build_scan(&config.main, config.main_label.clone(), 0, config)?;

    // Secondary scans are independent of each other; process them in
    // parallel.
    let others: Vec<ScanOutput> = config
        .others
        .par_iter()
        .map(|o| build_scan(std::slice::from_ref(&o.path), o.label.clone(), o.color, config))
        .collect::<Result<_, _>>()?;

    let breakdown = match &config.breakdown {
        Some(labels) => Some(compute_breakdown(labels, &main, &others)?),
        None => None,
    };

    Ok(RunOutput {
        main,
        others,
        breakdown,
    })
}

/// Ingest, curate and summarize one scan.
pub fn build_scan(
    files: &[PathBuf],
    label: String,
    color: usize,
    config: &ScanConfig,
) -> Result<ScanOutput, AppError> {
    let ingest = read_scan_points(files, &config.poi)?;
    let curve = ScanCurve::build(&ingest.points, config.y_cut)?;
    let finder = CrossingFinder::new(curve)?;
    let summary = summarize(&finder, &config.levels)?;

    Ok(ScanOutput {
        label,
        color,
        ingest,
        finder,
        summary,
    })
}

fn compute_breakdown(
    labels: &str,
    main: &ScanOutput,
    others: &[ScanOutput],
) -> Result<Breakdown, AppError> {
    let labels: Vec<String> = labels.split(',').map(|s| s.trim().to_string()).collect();

    let mut centrals: Vec<CentralValue> = Vec::with_capacity(others.len() + 1);
    centrals.push(central_or_err(main)?);
    for other in others {
        centrals.push(central_or_err(other)?);
    }

    quadratic_subtraction(&labels, &centrals)
}

fn central_or_err(scan: &ScanOutput) -> Result<CentralValue, AppError> {
    scan.summary.central().ok_or_else(|| {
        AppError::empty(format!(
            "Scan '{}' has no best-fit interval at the nominal level; cannot compute breakdown.",
            scan.label
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DemoSpec, generate_scan};
    use crate::domain::{LEVEL_68, LEVEL_95};
    use crate::io::write_scan_csv;

    fn temp_csv(name: &str, points: &[(f64, f64)]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("nllscan-test-{}-{name}", std::process::id()));
        write_scan_csv(&path, "r", points).unwrap();
        path
    }

    fn demo_points(sigma: f64, seed: u64) -> Vec<(f64, f64)> {
        generate_scan(&DemoSpec {
            n_points: 81,
            seed,
            best_fit: 0.0,
            sigma_lo: sigma,
            sigma_hi: sigma,
            x_min: -2.0,
            x_max: 2.0,
            noise: 0.0,
        })
        .unwrap()
    }

    fn config(main: PathBuf) -> ScanConfig {
        ScanConfig {
            main: vec![main],
            others: Vec::new(),
            poi: "r".to_string(),
            translate: None,
            main_label: "Observed".to_string(),
            y_cut: 7.0,
            y_max: 6.5,
            levels: vec![LEVEL_68, LEVEL_95],
            breakdown: None,
            plot: false,
            plot_width: 72,
            plot_height: 24,
            export_json: None,
            export_csv: None,
            export_svg: None,
        }
    }

    #[test]
    fn end_to_end_gaussian_scan_recovers_sigma() {
        // y = (x/sigma)^2 crosses LEVEL_68 at x = ±sigma*sqrt(LEVEL_68).
        let path = temp_csv("e2e.csv", &demo_points(0.5, 1));
        let run = run_scan(&config(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        let c = run.main.summary.central().unwrap();
        let expected = 0.5 * LEVEL_68.sqrt();
        assert!(c.value.abs() < 1e-9);
        assert!((c.err_hi - expected).abs() < 5e-3, "err_hi = {}", c.err_hi);
        assert!((c.err_lo + expected).abs() < 5e-3, "err_lo = {}", c.err_lo);

        let c2 = run.main.summary.central_2sig().unwrap();
        assert!(c2.err_hi > c.err_hi);
    }

    #[test]
    fn breakdown_combines_main_and_other_scans() {
        let main_path = temp_csv("bd-main.csv", &demo_points(0.5, 1));
        let other_path = temp_csv("bd-other.csv", &demo_points(0.3, 1));

        let mut config = config(main_path.clone());
        config.others = vec![crate::domain::OtherScanSpec {
            path: other_path.clone(),
            label: "Stat only".to_string(),
            color: 1,
        }];
        config.breakdown = Some("syst,stat".to_string());

        let run = run_scan(&config).unwrap();
        std::fs::remove_file(&main_path).ok();
        std::fs::remove_file(&other_path).ok();

        let b = run.breakdown.unwrap();
        assert_eq!(b.terms.len(), 2);
        // sqrt(0.5^2 - 0.3^2) = 0.4, scaled by sqrt(LEVEL_68).
        let expected = 0.4 * LEVEL_68.sqrt();
        assert!((b.terms[0].hi - expected).abs() < 1e-2, "syst hi = {}", b.terms[0].hi);
        assert!(b.warnings.is_empty());
    }

    #[test]
    fn missing_input_file_is_an_input_error() {
        let err = run_scan(&config(PathBuf::from("/nonexistent/scan.csv"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
