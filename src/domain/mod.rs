//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw scan samples and curated curves' building blocks (`ScanSample`)
//! - crossing results (`CrossingInterval`, `CentralValue`, `LevelSummary`)
//! - run configuration (`ScanConfig`, `OtherScanSpec`)
//! - the exported JSON schema (`ScanFile`, `ScanGrid`)

pub mod types;

pub use types::*;
