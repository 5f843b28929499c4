//! Core data structures for climate consolidation.
//!
//! Defines discovered data files, extracted measurement series, and the
//! statistics reported at the end of a run.

use std::fmt;
use std::path::{Path, PathBuf};

/// A station data file whose filename decodes to a full year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    pub path: PathBuf,
    pub year: i32,
}

impl DataFile {
    pub fn new(path: PathBuf, year: i32) -> Self {
        Self { path, year }
    }

    /// File name component for log and report messages
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Ordered second-column values of one file, one entry per day
///
/// Position `i` holds day index `i + 1`. `None` marks a value that was
/// absent or unparseable and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementSeries {
    values: Vec<Option<f64>>,
}

impl MeasurementSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn push(&mut self, value: Option<f64>) {
        self.values.push(value);
    }

    /// Append another series after this one, keeping its order
    pub fn extend(&mut self, other: MeasurementSeries) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<f64>> {
        self.values
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

/// Why the resolver passed over a directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    NoYearSuffix,
    UnrecognizedExtension(String),
    YearMismatch(i32),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Directory => write!(f, "it's a directory"),
            SkipReason::NoYearSuffix => write!(f, "year pattern (.XX) not found in filename"),
            SkipReason::UnrecognizedExtension(ext) => {
                write!(f, "extension '.{}' is not a recognized data extension", ext)
            }
            SkipReason::YearMismatch(year) => write!(f, "detected year {} does not match", year),
        }
    }
}

/// A directory entry the resolver did not select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: SkipReason,
}

/// Result of resolving one station directory
#[derive(Debug, Clone, Default)]
pub struct ResolvedFiles {
    /// Matching files in file name order
    pub files: Vec<DataFile>,
    pub skipped: Vec<SkippedEntry>,
}

/// A file that matched the target year but could not be read
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub station: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Per-station outcome of a run
#[derive(Debug, Clone, Default)]
pub struct StationSummary {
    pub name: String,
    pub files_used: usize,
    pub values: usize,
    pub missing: usize,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct RunReport {
    pub target_year: i32,
    pub files_processed: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
    pub data_rows: usize,
    pub stations: Vec<StationSummary>,
    pub failures: Vec<FileFailure>,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
