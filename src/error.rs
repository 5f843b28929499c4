//! Error handling for climate consolidation runs.
//!
//! Configuration problems and output failures are fatal to a run. Per-file
//! read failures are carried as values in the run report instead of being
//! propagated, so `FileRead` is usually constructed, logged, and recorded.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to load config file {path}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error("Base directory not found: {path}")]
    BaseDirectoryNotFound { path: PathBuf },

    #[error("Folder for station '{station}' not found at {path}")]
    StationDirectoryNotFound { station: String, path: PathBuf },

    #[error("Could not read {path} for station '{station}' (year {year}): {source}")]
    FileRead {
        station: String,
        year: i32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No data collected from any station for year {year}")]
    NoData { year: i32 },

    #[error("Failed to export table to {path}: {reason}")]
    Export { path: PathBuf, reason: String },
}

impl ClimateError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error aborts the whole run rather than a single file
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FileRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, ClimateError>;
