//! Application constants for the climate consolidator
//!
//! Column labels, naming patterns, and default values shared across the
//! pipeline and the CLI.

// =============================================================================
// Table Layout
// =============================================================================

/// Name of the synthesized day index column
pub const DAY_OF_YEAR_COLUMN: &str = "Day_of_Year";

/// Label written into the day column of the summary row
pub const MEAN_ROW_LABEL: &str = "Mean";

// =============================================================================
// Filename Conventions
// =============================================================================

/// Two-digit year suffix, optionally followed by one more extension
///
/// Matches `AS010319.92`, `AS010319.92.txt` and `jan.92.txt`; capture 1 is
/// the year, capture 2 the trailing extension if any.
pub const YEAR_SUFFIX_PATTERN: &str = r"(?i)\.(\d{2})(?:\.([^.]*))?$";

/// Two-digit years above this pivot belong to the 1900s, the rest to the 2000s
pub const CENTURY_PIVOT: u32 = 50;

/// Data file extensions accepted after the year segment by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "dat", "asc"];

/// Export file stem; the target year and format extension are appended
pub const OUTPUT_FILE_PREFIX: &str = "processed_climate_data";

// =============================================================================
// Validation
// =============================================================================

/// Earliest target year accepted
pub const MIN_TARGET_YEAR: i32 = 1900;

/// Latest target year accepted
pub const MAX_TARGET_YEAR: i32 = 2099;

// =============================================================================
// Configuration Files
// =============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "climate-consolidator";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Base directory name used when none is given
pub const DEFAULT_BASE_DIR_NAME: &str = "climate data";
