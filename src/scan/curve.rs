//! Scan curation: turn raw samples into a clean, sorted, deduplicated curve.
//!
//! The fitting engine that produces scan files may emit points out of order,
//! re-evaluate the same parameter value, or wander onto a bad fit branch with
//! huge `-2 Δln L`. All of that is handled here, once, so the interpolation
//! and crossing code can assume a well-formed curve.

use std::cmp::Ordering;

use crate::domain::ScanSample;
use crate::error::AppError;

/// An immutable, x-sorted, unique-x scan curve with all samples at or below
/// the configured y-cut.
///
/// Construction is the only way to obtain one; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct ScanCurve {
    samples: Vec<ScanSample>,
}

impl ScanCurve {
    /// Build a curve from raw (x, y) pairs.
    ///
    /// - non-finite pairs and pairs with `y > y_cut` are dropped
    /// - remaining samples are sorted ascending by x (stable)
    /// - exact x-duplicates keep the first occurrence in original input
    ///   order and drop the rest
    ///
    /// Fails with an empty-data error when nothing remains; an empty curve
    /// has no minimum and nothing downstream can use it.
    pub fn build(raw: &[(f64, f64)], y_cut: f64) -> Result<Self, AppError> {
        let mut samples: Vec<ScanSample> = raw
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite() && *y <= y_cut)
            .map(|&(x, y)| ScanSample { x, y })
            .collect();

        // Stable sort, so equal-x samples keep their input order and the
        // dedup below keeps the first-seen one.
        samples.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        samples.dedup_by(|cur, prev| cur.x == prev.x);

        if samples.is_empty() {
            return Err(AppError::empty(format!(
                "No scan points survive filtering (y-cut = {y_cut})."
            )));
        }

        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[ScanSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn x_min(&self) -> f64 {
        self.samples[0].x
    }

    pub fn x_max(&self) -> f64 {
        self.samples[self.samples.len() - 1].x
    }

    /// The sample with the smallest observed y.
    ///
    /// Ties keep the first (lowest-x) sample, consistent with the duplicate
    /// policy in `build`.
    pub fn min_sample(&self) -> ScanSample {
        let mut best = self.samples[0];
        for s in &self.samples[1..] {
            if s.y < best.y {
                best = *s;
            }
        }
        best
    }
}
