//! Per-level classification of crossing intervals.
//!
//! The finder answers "where is the curve below this level"; this module
//! turns that into the quantities reports actually print:
//!
//! - the central value with signed asymmetric errors, from the interval
//!   containing the best fit
//! - any remaining intervals (secondary minima), kept for reporting

use crate::domain::{CentralValue, LevelSummary};
use crate::error::AppError;
use crate::scan::CrossingFinder;

/// All per-level results for one scan.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub best_fit: f64,
    /// One entry per requested level, in request order.
    pub levels: Vec<LevelSummary>,
}

impl ScanSummary {
    /// Central value at the first (nominal) level, if the best-fit interval
    /// exists there.
    pub fn central(&self) -> Option<CentralValue> {
        self.levels.first().and_then(|l| l.central)
    }

    /// Central value at the second level (2σ errors), if requested and found.
    pub fn central_2sig(&self) -> Option<CentralValue> {
        self.levels.get(1).and_then(|l| l.central)
    }
}

/// Run `find_crossings` for every level and classify the results.
///
/// The central value is `(best_fit, hi - best_fit, lo - best_fit)` from the
/// unique interval containing the best fit; `err_lo` stays signed. Levels
/// with no below-threshold region produce an empty interval list and no
/// central value.
pub fn summarize(finder: &CrossingFinder, levels: &[f64]) -> Result<ScanSummary, AppError> {
    let best_fit = finder.best_fit();
    let mut out = Vec::with_capacity(levels.len());

    for &level in levels {
        let intervals = finder.find_crossings(level)?;
        let central = intervals.iter().find(|c| c.contains_bf).map(|c| CentralValue {
            value: best_fit,
            err_hi: c.hi - best_fit,
            err_lo: c.lo - best_fit,
        });
        out.push(LevelSummary {
            level,
            intervals,
            central,
        });
    }

    Ok(ScanSummary {
        best_fit,
        levels: out,
    })
}
