//! Core scan algorithm.
//!
//! Responsibilities:
//!
//! - curate raw (x, y) samples into an immutable `ScanCurve`
//! - interpolate the curve and locate the best fit (`CrossingFinder`)
//! - intersect the interpolant with threshold levels (`find_crossings`)
//! - classify intervals into central values and secondary minima (`summary`)

pub mod curve;
pub mod finder;
pub mod summary;

pub use curve::*;
pub use finder::*;
pub use summary::*;
