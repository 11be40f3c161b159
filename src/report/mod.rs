//! Reporting utilities: terminal text and the error breakdown.
//!
//! We keep formatting code in one place so:
//! - the math/crossing code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod breakdown;
pub mod format;

pub use breakdown::*;
pub use format::*;
