//! Plot rendering.
//!
//! - `ascii`: fixed-grid terminal plot for quick sanity checks
//! - `chart`: Plotters SVG export for publication-adjacent output

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;
