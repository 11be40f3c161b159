//! Quadratic error subtraction across scans.
//!
//! Given the nominal errors of the main scan and of secondary scans with
//! successively frozen uncertainty sources, each component's contribution is
//! isolated as `sqrt(err_i^2 - err_{i+1}^2)` per side. The last component
//! keeps its own errors unchanged.
//!
//! A later scan with *larger* errors than the one before it makes the
//! subtraction negative; that component is clamped to zero and reported as a
//! warning rather than failing the run (it usually signals scan quality
//! problems, not a usage error).

use crate::domain::CentralValue;
use crate::error::AppError;

/// One isolated uncertainty component.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownTerm {
    pub label: String,
    /// Positive-side error (>= 0).
    pub hi: f64,
    /// Negative-side error, kept signed (<= 0).
    pub lo: f64,
}

/// Breakdown result: components in label order plus any clamp warnings.
#[derive(Debug, Clone)]
pub struct Breakdown {
    pub terms: Vec<BreakdownTerm>,
    pub warnings: Vec<String>,
}

/// Isolate uncertainty components from the main + secondary central values.
///
/// `centrals[0]` is the main scan; `centrals[i]` has the first `i` sources
/// frozen. `labels` names the isolated components and must have exactly one
/// entry per central value.
pub fn quadratic_subtraction(labels: &[String], centrals: &[CentralValue]) -> Result<Breakdown, AppError> {
    if labels.is_empty() {
        return Err(AppError::input("Breakdown requires at least one label."));
    }
    if labels.len() != centrals.len() {
        return Err(AppError::input(format!(
            "Breakdown needs one label per scan: {} labels for {} scans.",
            labels.len(),
            centrals.len()
        )));
    }

    let mut terms = Vec::with_capacity(labels.len());
    let mut warnings = Vec::new();

    for (i, label) in labels.iter().enumerate() {
        let cur = centrals[i];
        let (hi, lo) = if i + 1 < centrals.len() {
            let next = centrals[i + 1];
            let hi = subtract_side(cur.err_hi, next.err_hi, label, "hi", &mut warnings);
            let lo = -subtract_side(cur.err_lo, next.err_lo, label, "lo", &mut warnings);
            (hi, lo)
        } else {
            (cur.err_hi, cur.err_lo)
        };
        terms.push(BreakdownTerm {
            label: label.clone(),
            hi,
            lo,
        });
    }

    Ok(Breakdown { terms, warnings })
}

fn subtract_side(outer: f64, inner: f64, label: &str, side: &str, warnings: &mut Vec<String>) -> f64 {
    if inner.abs() > outer.abs() {
        warnings.push(format!("Error subtraction is negative for {label} {side}; clamped to 0."));
        0.0
    } else {
        (outer * outer - inner * inner).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn central(err_hi: f64, err_lo: f64) -> CentralValue {
        CentralValue {
            value: 1.0,
            err_hi,
            err_lo,
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn subtracts_in_quadrature() {
        // total = 0.5, frozen-syst = 0.3 => syst component = 0.4.
        let b = quadratic_subtraction(
            &labels(&["syst", "stat"]),
            &[central(0.5, -0.5), central(0.3, -0.3)],
        )
        .unwrap();

        assert_eq!(b.terms.len(), 2);
        assert!((b.terms[0].hi - 0.4).abs() < 1e-12);
        assert!((b.terms[0].lo + 0.4).abs() < 1e-12);
        // Last component keeps its own errors.
        assert_eq!(b.terms[1].hi, 0.3);
        assert_eq!(b.terms[1].lo, -0.3);
        assert!(b.warnings.is_empty());
    }

    #[test]
    fn clamps_negative_subtraction_with_warning() {
        let b = quadratic_subtraction(
            &labels(&["syst", "stat"]),
            &[central(0.3, -0.3), central(0.5, -0.5)],
        )
        .unwrap();

        assert_eq!(b.terms[0].hi, 0.0);
        assert_eq!(b.terms[0].lo, 0.0);
        assert_eq!(b.warnings.len(), 2);
    }

    #[test]
    fn single_label_keeps_main_errors() {
        let b = quadratic_subtraction(&labels(&["total"]), &[central(0.5, -0.4)]).unwrap();
        assert_eq!(b.terms[0].hi, 0.5);
        assert_eq!(b.terms[0].lo, -0.4);
    }

    #[test]
    fn label_count_mismatch_is_rejected() {
        let err = quadratic_subtraction(&labels(&["a", "b", "c"]), &[central(0.5, -0.5)]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
