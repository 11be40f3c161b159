//! Mathematical utilities: cubic spline interpolation and root refinement.

pub mod root;
pub mod spline;

pub use root::*;
pub use spline::*;
