//! Input/output helpers.
//!
//! - scan CSV ingest + validation (`ingest`)
//! - interval CSV export (`export`)
//! - scan JSON read/write (`scan_file`)

pub mod export;
pub mod ingest;
pub mod scan_file;

pub use export::*;
pub use ingest::*;
pub use scan_file::*;
