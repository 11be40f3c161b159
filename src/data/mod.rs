//! Synthetic scan generation for demos and quick trials.

pub mod synth;

pub use synth::*;
