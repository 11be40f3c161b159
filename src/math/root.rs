//! Root refinement on a bracketed sign change.
//!
//! The crossing search walks the sampled points to find the segment where the
//! curve passes through a threshold level, then refines the crossing inside
//! that segment. Bisection is used because:
//!
//! - the bracket is guaranteed by the sign change at the segment ends
//! - it is deterministic and convergence is bounded a priori
//! - the spline is cheap to evaluate, so the extra iterations vs. Newton
//!   are irrelevant at scan sizes

use crate::error::AppError;

/// Hard cap on bisection iterations. The bracket halves every iteration, so
/// failing to reach tolerance within this bound indicates a non-finite
/// evaluation or a broken bracket, not a tight tolerance.
const MAX_ITERS: usize = 200;

/// Find a root of `f` in `[lo, hi]`, assuming `f(lo)` and `f(hi)` have
/// opposite signs (either may be exactly zero).
///
/// Returns an error when the endpoints do not bracket a sign change or the
/// iteration fails to converge to `tol` — both are numerical-quality
/// signals, distinct from "no crossing exists".
pub fn bisect(f: impl Fn(f64) -> f64, lo: f64, hi: f64, tol: f64) -> Result<f64, AppError> {
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(AppError::numeric(format!("Invalid root bracket [{lo}, {hi}].")));
    }

    let f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if !(f_lo.is_finite() && f_hi.is_finite()) || f_lo * f_hi > 0.0 {
        return Err(AppError::numeric(format!(
            "Root bracket [{lo}, {hi}] does not straddle a sign change (f: {f_lo}, {f_hi})."
        )));
    }

    let mut a = lo;
    let mut b = hi;
    let mut f_a = f_lo;
    for _ in 0..MAX_ITERS {
        let mid = 0.5 * (a + b);
        let f_mid = f(mid);
        if !f_mid.is_finite() {
            return Err(AppError::numeric(format!("Non-finite curve value at x = {mid}.")));
        }
        if f_mid == 0.0 || (b - a) <= tol {
            return Ok(mid);
        }
        if f_a * f_mid < 0.0 {
            b = mid;
        } else {
            a = mid;
            f_a = f_mid;
        }
    }

    Err(AppError::numeric(format!(
        "Root finding did not converge within {MAX_ITERS} iterations on [{lo}, {hi}]."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisect_finds_linear_root() {
        let x = bisect(|x| x - 0.25, 0.0, 1.0, 1e-12).unwrap();
        assert!((x - 0.25).abs() < 1e-10);
    }

    #[test]
    fn bisect_finds_cubic_root() {
        let x = bisect(|x| x * x * x - 2.0, 1.0, 2.0, 1e-12).unwrap();
        assert!((x - 2f64.cbrt()).abs() < 1e-10);
    }

    #[test]
    fn bisect_accepts_zero_endpoint() {
        assert_eq!(bisect(|x| x, 0.0, 1.0, 1e-12).unwrap(), 0.0);
    }

    #[test]
    fn bisect_rejects_missing_bracket() {
        let err = bisect(|x| x + 10.0, 0.0, 1.0, 1e-12).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn bisect_rejects_inverted_bracket() {
        let err = bisect(|x| x, 1.0, 0.0, 1e-12).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
