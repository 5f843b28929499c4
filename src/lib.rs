//! Climate Consolidator Library
//!
//! Consolidates per-station climate measurement files for one year into a
//! single table and exports it as a spreadsheet.
//!
//! This library provides tools for:
//! - Selecting station files by the two-digit year encoded in their names
//! - Extracting the value column of whitespace-separated data files
//! - Aligning stations by day of year and appending column means
//! - Writing the result to `.xlsx` or `.csv`

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;

// Re-export commonly used types
pub use config::{ClimateConfig, ExportFormat};
pub use error::{ClimateError, Result};
pub use models::{DataFile, MeasurementSeries, RunReport};
pub use processor::ClimateProcessor;
pub use processor::assembler::ConsolidatedTable;
