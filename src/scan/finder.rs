//! Threshold-crossing search on an interpolated scan curve.
//!
//! Given a curated `ScanCurve`, the `CrossingFinder`:
//!
//! - fits a natural cubic spline through the samples (once, at construction)
//! - locates the best fit as the *sampled* minimum
//! - finds, for any threshold level, the maximal x-intervals where the
//!   spline sits below that level
//!
//! The finder is immutable after construction and `find_crossings` is a pure
//! query: repeated calls with the same level return identical results, and
//! concurrent read-only use is safe.

use crate::domain::CrossingInterval;
use crate::error::AppError;
use crate::math::{CubicSpline, bisect};
use crate::scan::ScanCurve;

/// Relative tolerance (fraction of the sampled x-span) for crossing
/// refinement.
const CROSSING_REL_TOL: f64 = 1e-12;

/// Interpolant + best fit for one scan, with crossing queries.
#[derive(Debug, Clone)]
pub struct CrossingFinder {
    curve: ScanCurve,
    spline: CubicSpline,
    best_fit: f64,
}

impl CrossingFinder {
    /// Build the interpolant and locate the best fit.
    ///
    /// The best fit is the x of the sample with the minimum *observed* y — a
    /// discrete minimum over the raw points, not the continuum minimum of
    /// the spline. With coarse sampling near the true minimum these differ;
    /// downstream consumers expect the sampled one. Ties keep the first
    /// (lowest-x) sample.
    ///
    /// Fails when the curve has fewer than two samples: a spline needs two
    /// knots, and a scan that sparse cannot bound anything.
    pub fn new(curve: ScanCurve) -> Result<Self, AppError> {
        if curve.len() < 2 {
            return Err(AppError::empty(format!(
                "Need at least two scan points to interpolate, got {}.",
                curve.len()
            )));
        }

        let xs: Vec<f64> = curve.samples().iter().map(|s| s.x).collect();
        let ys: Vec<f64> = curve.samples().iter().map(|s| s.y).collect();
        let spline = CubicSpline::natural(xs, ys)?;
        let best_fit = curve.min_sample().x;

        Ok(Self {
            curve,
            spline,
            best_fit,
        })
    }

    pub fn curve(&self) -> &ScanCurve {
        &self.curve
    }

    /// Best-fit parameter value (x of the minimum observed sample).
    pub fn best_fit(&self) -> f64 {
        self.best_fit
    }

    /// Evaluate the interpolant at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.spline.eval(x)
    }

    /// Sample the interpolant on a regular grid over the scanned range
    /// (for plotting and exports).
    pub fn grid(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        let n = n.max(2);
        let x0 = self.curve.x_min();
        let x1 = self.curve.x_max();
        let mut xs = Vec::with_capacity(n);
        let mut ys = Vec::with_capacity(n);
        for i in 0..n {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x0 + u * (x1 - x0);
            xs.push(x);
            ys.push(self.spline.eval(x));
        }
        (xs, ys)
    }

    /// Find all maximal below-threshold intervals for `level`.
    ///
    /// The walk visits consecutive sample pairs and watches the below/above
    /// state of the sampled y (which equals the spline at the knots). Each
    /// above→below transition opens an interval and each below→above
    /// transition closes one; the crossing x is refined by bisection on the
    /// spline within the transition segment. A curve already below the level
    /// at the first (last) sample opens (closes) the interval at the range
    /// edge with `valid_lo` (`valid_hi`) set to false.
    ///
    /// Returned intervals are disjoint, sorted by `lo`, and tagged with
    /// `contains_bf`. A level below the curve's minimum has no
    /// below-threshold region and yields an empty vector — that is the
    /// expected soft contract, not an error. A level exactly tangent to the
    /// minimum at a sample also yields an empty vector (the state never
    /// goes strictly below); tangency between samples may instead produce a
    /// near-zero-width interval. `hi >= lo` always holds.
    pub fn find_crossings(&self, level: f64) -> Result<Vec<CrossingInterval>, AppError> {
        if !level.is_finite() {
            return Err(AppError::input(format!("Threshold level must be finite, got {level}.")));
        }

        let samples = self.curve.samples();
        let tol = (self.curve.x_max() - self.curve.x_min()) * CROSSING_REL_TOL;

        let mut intervals = Vec::new();
        // Open interval state: (lo, valid_lo).
        let mut open: Option<(f64, bool)> = if samples[0].y < level {
            Some((samples[0].x, false))
        } else {
            None
        };

        for pair in samples.windows(2) {
            let below_a = pair[0].y < level;
            let below_b = pair[1].y < level;
            if below_a == below_b {
                continue;
            }

            let cross = bisect(
                |x| self.spline.eval(x) - level,
                pair[0].x,
                pair[1].x,
                tol,
            )?;

            if below_b {
                // Entering the below-threshold region.
                open = Some((cross, true));
            } else if let Some((lo, valid_lo)) = open.take() {
                intervals.push(self.interval(lo, cross.max(lo), valid_lo, true));
            }
        }

        if let Some((lo, valid_lo)) = open {
            intervals.push(self.interval(lo, self.curve.x_max(), valid_lo, false));
        }

        Ok(intervals)
    }

    fn interval(&self, lo: f64, hi: f64, valid_lo: bool, valid_hi: bool) -> CrossingInterval {
        CrossingInterval {
            lo,
            hi,
            valid_lo,
            valid_hi,
            contains_bf: lo <= self.best_fit && self.best_fit <= hi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finder(raw: &[(f64, f64)], y_cut: f64) -> CrossingFinder {
        CrossingFinder::new(ScanCurve::build(raw, y_cut).unwrap()).unwrap()
    }

    fn parabola() -> CrossingFinder {
        finder(&[(-1.0, 4.0), (-0.5, 1.0), (0.0, 0.0), (0.5, 1.0), (1.0, 4.0)], 10.0)
    }

    #[test]
    fn symmetric_parabola_level_one() {
        let f = parabola();
        assert_eq!(f.best_fit(), 0.0);

        let crossings = f.find_crossings(1.0).unwrap();
        assert_eq!(crossings.len(), 1);
        let c = crossings[0];
        assert!((c.lo - -0.5).abs() < 1e-6, "lo = {}", c.lo);
        assert!((c.hi - 0.5).abs() < 1e-6, "hi = {}", c.hi);
        assert!(c.valid_lo && c.valid_hi);
        assert!(c.contains_bf);
    }

    #[test]
    fn symmetric_parabola_level_half() {
        let f = parabola();
        let crossings = f.find_crossings(0.5).unwrap();
        assert_eq!(crossings.len(), 1);
        let c = crossings[0];
        assert!(c.lo > -0.5 && c.lo < 0.0, "lo = {}", c.lo);
        assert!(c.hi > 0.0 && c.hi < 0.5, "hi = {}", c.hi);
        assert!(c.valid_lo && c.valid_hi);
        assert!(c.contains_bf);
    }

    #[test]
    fn level_below_minimum_is_empty() {
        let f = parabola();
        assert!(f.find_crossings(-1.0).unwrap().is_empty());
    }

    #[test]
    fn level_at_minimum_is_empty_or_degenerate() {
        // Tangent exactly at the sampled minimum: no strictly-below region.
        let f = parabola();
        let crossings = f.find_crossings(0.0).unwrap();
        for c in &crossings {
            assert!(c.hi >= c.lo);
        }
        assert!(crossings.is_empty());
    }

    #[test]
    fn interior_crossings_both_valid() {
        let f = finder(&[(0.0, 3.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 4.0)], 10.0);
        let crossings = f.find_crossings(2.5).unwrap();
        assert_eq!(crossings.len(), 1);
        let c = crossings[0];
        assert!(c.valid_lo && c.valid_hi);
        assert!(c.lo > 0.0 && c.lo < 1.0);
        assert!(c.hi > 3.0 && c.hi < 4.0);
        assert!(c.contains_bf);
    }

    #[test]
    fn clipped_left_edge_is_invalid() {
        let f = finder(&[(0.0, 0.5), (1.0, 1.0), (2.0, 3.0)], 10.0);
        let crossings = f.find_crossings(2.0).unwrap();
        assert_eq!(crossings.len(), 1);
        let c = crossings[0];
        assert_eq!(c.lo, 0.0);
        assert!(!c.valid_lo);
        assert!(c.valid_hi);
        assert!(c.hi > 1.0 && c.hi < 2.0);
    }

    #[test]
    fn entirely_below_is_full_range_open_both_sides() {
        let f = parabola();
        let crossings = f.find_crossings(100.0).unwrap();
        assert_eq!(crossings.len(), 1);
        let c = crossings[0];
        assert_eq!(c.lo, -1.0);
        assert_eq!(c.hi, 1.0);
        assert!(!c.valid_lo && !c.valid_hi);
        assert!(c.contains_bf);
    }

    #[test]
    fn double_well_reports_two_intervals() {
        // Two minima separated by a barrier above the level.
        let raw = [
            (-2.0, 4.0),
            (-1.5, 0.5),
            (-1.0, 0.0),
            (-0.5, 0.5),
            (0.0, 3.0),
            (0.5, 0.8),
            (1.0, 0.3),
            (1.5, 0.9),
            (2.0, 4.0),
        ];
        let f = finder(&raw, 10.0);
        let crossings = f.find_crossings(1.0).unwrap();
        assert_eq!(crossings.len(), 2);
        assert!(crossings[0].lo < crossings[1].lo);
        assert!(crossings[0].hi <= crossings[1].lo);
        let n_bf = crossings.iter().filter(|c| c.contains_bf).count();
        assert_eq!(n_bf, 1);
        assert!(crossings[0].contains_bf, "best fit is in the deeper left well");
    }

    #[test]
    fn find_crossings_is_idempotent() {
        let f = parabola();
        let a = f.find_crossings(1.0).unwrap();
        let b = f.find_crossings(1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn intervals_are_sorted_and_disjoint() {
        let raw: Vec<(f64, f64)> = (0..41)
            .map(|i| {
                let x = -2.0 + 0.1 * i as f64;
                // W-shaped curve with two sub-threshold pockets.
                (x, (x * x - 1.0) * (x * x - 1.0))
            })
            .collect();
        let f = finder(&raw, 50.0);
        let crossings = f.find_crossings(0.5).unwrap();
        assert!(crossings.len() >= 2);
        for pair in crossings.windows(2) {
            assert!(pair[0].hi <= pair[1].lo);
        }
        for c in &crossings {
            assert!(c.hi >= c.lo);
        }
    }

    #[test]
    fn single_point_curve_is_rejected() {
        let curve = ScanCurve::build(&[(0.0, 0.0)], 10.0).unwrap();
        let err = CrossingFinder::new(curve).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn non_finite_level_is_rejected() {
        let f = parabola();
        let err = f.find_crossings(f64::NAN).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn best_fit_uses_sampled_minimum_not_spline_minimum() {
        // Asymmetric samples: the spline dips below the sampled minimum
        // between the two lowest points, but the best fit must stay on a
        // sampled x.
        let raw = [(-1.0, 3.0), (-0.25, 0.2), (0.25, 0.1), (1.0, 3.0)];
        let f = finder(&raw, 10.0);
        assert_eq!(f.best_fit(), 0.25);
    }
}
