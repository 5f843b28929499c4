//! Record extraction for whitespace-separated station files
//!
//! Each non-blank line contributes exactly one value: the second
//! whitespace-delimited field parsed as a float, or a missing marker when the
//! line is short or the field is not numeric.

use crate::error::{ClimateError, Result};
use crate::models::{DataFile, MeasurementSeries};
use std::fs;
use tracing::debug;

/// Parse one line's value column
///
/// Returns `None` for blank lines, which take no position in the series.
/// `Some(None)` is a line that occupies a day but holds no usable value.
pub fn parse_line(line: &str) -> Option<Option<f64>> {
    let mut fields = line.split_whitespace();
    fields.next()?;

    let value = fields
        .next()
        .and_then(|field| field.parse::<f64>().ok())
        .filter(|value| !value.is_nan());

    Some(value)
}

/// Extract the second column of `content`, one entry per non-blank line
pub fn parse_series(content: &str) -> MeasurementSeries {
    let mut series = MeasurementSeries::new();
    for value in content.lines().filter_map(parse_line) {
        series.push(value);
    }
    series
}

/// Read a data file into a series
///
/// Unreadable or non-UTF-8 files fail as a whole with
/// [`ClimateError::FileRead`]; bad lines never fail the file.
pub fn extract_series(station: &str, file: &DataFile) -> Result<MeasurementSeries> {
    let content = fs::read_to_string(&file.path).map_err(|source| ClimateError::FileRead {
        station: station.to_string(),
        year: file.year,
        path: file.path.clone(),
        source,
    })?;

    let series = parse_series(&content);
    debug!(
        "    Read {}: {} values, {} missing",
        file.file_name(),
        series.len(),
        series.missing_count()
    );

    Ok(series)
}
