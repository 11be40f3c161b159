//! Natural cubic spline interpolation.
//!
//! A likelihood scan samples the profile curve at a modest number of points;
//! the spline provides the smooth curve between them that threshold crossings
//! are solved against.
//!
//! Implementation choices:
//! - Natural boundary conditions (zero second derivative at both ends). The
//!   scan is expected to be parabola-like near the minimum, and the ends are
//!   where the curve is least trusted anyway (`y_cut` removes anything above
//!   the cut).
//! - The knot second derivatives solve a tridiagonal linear system. We
//!   assemble it as a dense `nalgebra` matrix and solve via LU; the system is
//!   strictly diagonally dominant, and scans are tens of points, so a dense
//!   solve is cheap and robust.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// A natural cubic spline through strictly-increasing knots.
///
/// Immutable after construction; evaluation is a pure query.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// Knot x values (strictly increasing).
    xs: Vec<f64>,
    /// Knot y values.
    ys: Vec<f64>,
    /// Second derivatives at each knot (computed during construction).
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Construct a natural cubic spline from knots.
    ///
    /// Requires at least two knots with strictly increasing, finite x.
    pub fn natural(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, AppError> {
        if xs.len() != ys.len() {
            return Err(AppError::input("Spline knot arrays differ in length."));
        }
        if xs.len() < 2 {
            return Err(AppError::empty("Spline needs at least two knots."));
        }
        for i in 0..xs.len() {
            if !(xs[i].is_finite() && ys[i].is_finite()) {
                return Err(AppError::input(format!("Non-finite spline knot at index {i}.")));
            }
            if i > 0 && xs[i] <= xs[i - 1] {
                return Err(AppError::input(format!(
                    "Spline knots must be strictly increasing (index {i}: {} <= {})",
                    xs[i],
                    xs[i - 1]
                )));
            }
        }

        let n = xs.len();

        // Two knots: the natural spline degenerates to a straight line.
        if n == 2 {
            return Ok(Self {
                xs,
                ys,
                y2s: vec![0.0; 2],
            });
        }

        // Tridiagonal system for the interior second derivatives:
        //
        //   (h_{i-1}/6) y2_{i-1} + ((h_{i-1}+h_i)/3) y2_i + (h_i/6) y2_{i+1}
        //     = (y_{i+1}-y_i)/h_i - (y_i-y_{i-1})/h_{i-1}
        //
        // with y2_0 = y2_{n-1} = 0 (natural boundary).
        let mut m = DMatrix::<f64>::zeros(n, n);
        let mut r = DVector::<f64>::zeros(n);
        m[(0, 0)] = 1.0;
        m[(n - 1, n - 1)] = 1.0;
        for i in 1..n - 1 {
            let h_prev = xs[i] - xs[i - 1];
            let h_next = xs[i + 1] - xs[i];
            m[(i, i - 1)] = h_prev / 6.0;
            m[(i, i)] = (h_prev + h_next) / 3.0;
            m[(i, i + 1)] = h_next / 6.0;
            r[i] = (ys[i + 1] - ys[i]) / h_next - (ys[i] - ys[i - 1]) / h_prev;
        }

        let y2s = m
            .lu()
            .solve(&r)
            .ok_or_else(|| AppError::numeric("Spline system is singular."))?;
        if !y2s.iter().all(|v| v.is_finite()) {
            return Err(AppError::numeric("Spline solve produced non-finite coefficients."));
        }

        Ok(Self {
            xs,
            ys,
            y2s: y2s.iter().copied().collect(),
        })
    }

    /// Knot x values.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Knot y values.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// First knot x.
    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    /// Last knot x.
    pub fn x_max(&self) -> f64 {
        *self.xs.last().unwrap_or(&f64::NAN)
    }

    /// Evaluate the spline at `x`.
    ///
    /// Outside the knot range the boundary segment's polynomial is used;
    /// callers in this crate only evaluate within `[x_min, x_max]`.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();

        // Binary search for the enclosing segment.
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }
}
