//! File discovery module for station directories
//!
//! Selects the data files of one station whose filename encodes the target
//! year. Station directories are flat:
//! ```text
//! base_dir/
//!   station_a/
//!     AS010319.92
//!     jan.92.txt
//!     feb.93.txt
//!   station_b/
//!     ...
//! ```
//! The two digits after the last (or next-to-last, when an extension
//! follows) dot are the year, decoded with a pivot at 50.

use crate::constants::{CENTURY_PIVOT, YEAR_SUFFIX_PATTERN};
use crate::error::Result;
use crate::models::{DataFile, ResolvedFiles, SkipReason, SkippedEntry};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;
use walkdir::WalkDir;

static YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(YEAR_SUFFIX_PATTERN).expect("year suffix pattern is valid"));

/// Expand a two-digit year: above 50 is 19xx, otherwise 20xx
pub fn decode_two_digit_year(suffix: u32) -> i32 {
    if suffix > CENTURY_PIVOT {
        1900 + suffix as i32
    } else {
        2000 + suffix as i32
    }
}

/// Inverse of [`decode_two_digit_year`] for years in 1951..=2050
pub fn encode_two_digit_year(year: i32) -> Option<u32> {
    let pivot = CENTURY_PIVOT as i32;
    if (1901 + pivot..=1999).contains(&year) {
        Some((year - 1900) as u32)
    } else if (2000..=2000 + pivot).contains(&year) {
        Some((year - 2000) as u32)
    } else {
        None
    }
}

/// Split a filename into its two-digit year and optional trailing extension
fn parse_year_suffix(file_name: &str) -> Option<(u32, Option<&str>)> {
    let captures = YEAR_SUFFIX.captures(file_name)?;
    let suffix = captures.get(1)?.as_str().parse().ok()?;
    let extension = captures.get(2).map(|m| m.as_str());
    Some((suffix, extension))
}

/// Decoded full year of a filename like `AS010319.92` or `jan.92.txt`
pub fn extract_year_from_filename(file_name: &str) -> Option<i32> {
    parse_year_suffix(file_name).map(|(suffix, _)| decode_two_digit_year(suffix))
}

/// Resolver for the year-matching data files of a station
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    /// Lowercased; empty accepts any extension
    extensions: Vec<String>,
}

impl FileDiscovery {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Decode a filename's year, or say why it is not a data file
    pub fn classify(&self, file_name: &str) -> std::result::Result<i32, SkipReason> {
        let (suffix, extension) = parse_year_suffix(file_name).ok_or(SkipReason::NoYearSuffix)?;

        if let Some(ext) = extension {
            if !self.is_recognized_extension(ext) {
                return Err(SkipReason::UnrecognizedExtension(ext.to_string()));
            }
        }

        Ok(decode_two_digit_year(suffix))
    }

    fn is_recognized_extension(&self, extension: &str) -> bool {
        self.extensions.is_empty() || self.extensions.contains(&extension.to_lowercase())
    }

    /// Find files in `station_dir` whose decoded year equals `target_year`
    ///
    /// Entries are visited in file name order so that several files for one
    /// year are returned in a deterministic order.
    pub fn resolve(&self, station_dir: &Path, target_year: i32) -> Result<ResolvedFiles> {
        let mut resolved = ResolvedFiles::default();

        let walker = WalkDir::new(station_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let name = entry.file_name().to_string_lossy().to_string();

            if entry.path().is_dir() {
                debug!("  - Skipping {}: {}", name, SkipReason::Directory);
                resolved.skipped.push(SkippedEntry {
                    name,
                    reason: SkipReason::Directory,
                });
                continue;
            }

            let reason = match self.classify(&name) {
                Ok(year) if year == target_year => {
                    debug!("  - Found file for target year ({}): {}", year, name);
                    resolved
                        .files
                        .push(DataFile::new(entry.into_path(), year));
                    continue;
                }
                Ok(year) => SkipReason::YearMismatch(year),
                Err(reason) => reason,
            };

            debug!("  - Skipping file {}: {}", name, reason);
            resolved.skipped.push(SkippedEntry { name, reason });
        }

        Ok(resolved)
    }
}
