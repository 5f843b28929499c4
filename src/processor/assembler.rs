//! Table assembly for consolidated station data
//!
//! Station columns are collected in supply order, padded to a common
//! length, and held in a polars `DataFrame` keyed by an explicit
//! `Day_of_Year` column. Column means are computed once, when the table is
//! finished, and kept beside the frame as the trailing `Mean` row.

use crate::constants::{DAY_OF_YEAR_COLUMN, MEAN_ROW_LABEL};
use crate::error::{ClimateError, Result};
use crate::models::MeasurementSeries;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use tracing::{debug, warn};

/// Accumulates station columns until the table is finalized
#[derive(Debug, Default)]
pub struct TableAssembler {
    columns: Vec<(String, MeasurementSeries)>,
}

impl TableAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station column built from its files' series, concatenated in order
    ///
    /// An empty `parts` list yields a column that is missing on every day.
    pub fn add_station(&mut self, name: impl Into<String>, parts: Vec<MeasurementSeries>) {
        let mut combined = MeasurementSeries::new();
        for part in parts {
            combined.extend(part);
        }
        self.columns.push((name.into(), combined));
    }

    pub fn station_count(&self) -> usize {
        self.columns.len()
    }

    /// Align all columns by day index and compute the mean row
    pub fn finish(self, target_year: i32) -> Result<ConsolidatedTable> {
        let rows = self
            .columns
            .iter()
            .map(|(_, series)| series.len())
            .max()
            .unwrap_or(0);

        if rows == 0 {
            return Err(ClimateError::NoData { year: target_year });
        }

        if let Some(days_in_year) = days_in_year(target_year) {
            debug!(
                "The year {} has {} days; consolidated table has {} rows",
                target_year, days_in_year, rows
            );
            if rows > days_in_year {
                warn!(
                    "{} rows exceed the {} days of {}; extra rows are kept",
                    rows, days_in_year, target_year
                );
            }
        }

        let days: Vec<u32> = (1..=rows as u32).collect();
        let mut frame_columns = Vec::with_capacity(self.columns.len() + 1);
        frame_columns.push(Column::new(DAY_OF_YEAR_COLUMN.into(), days));

        let mut stations = Vec::with_capacity(self.columns.len());
        for (name, series) in self.columns {
            let mut values = series.into_values();
            values.resize(rows, None);
            frame_columns.push(Column::new(name.as_str().into(), values));
            stations.push(name);
        }

        let frame = DataFrame::new(frame_columns)?;

        let means = stations
            .iter()
            .map(|name| -> Result<Option<f64>> { Ok(frame.column(name)?.f64()?.mean()) })
            .collect::<Result<Vec<_>>>()?;

        Ok(ConsolidatedTable {
            year: target_year,
            stations,
            frame,
            means,
        })
    }
}

/// Number of days in `year`, 365 or 366
pub fn days_in_year(year: i32) -> Option<usize> {
    NaiveDate::from_ymd_opt(year, 12, 31).map(|date| date.ordinal() as usize)
}

/// Finalized table: data rows plus the trailing mean row
#[derive(Debug, Clone)]
pub struct ConsolidatedTable {
    year: i32,
    stations: Vec<String>,
    frame: DataFrame,
    means: Vec<Option<f64>>,
}

impl ConsolidatedTable {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of day rows, excluding the mean row
    pub fn data_rows(&self) -> usize {
        self.frame.height()
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Data rows only: `Day_of_Year` followed by one column per station
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Mean row cells in station order
    pub fn means(&self) -> &[Option<f64>] {
        &self.means
    }

    /// Mean of one station, `None` if unknown or the column has no values
    pub fn mean_of(&self, station: &str) -> Option<f64> {
        let index = self.stations.iter().position(|s| s == station)?;
        self.means[index]
    }

    /// Day values of one station column
    pub fn station_values(&self, station: &str) -> Result<Vec<Option<f64>>> {
        Ok(self.frame.column(station)?.f64()?.into_iter().collect())
    }

    /// Frame with the mean row appended, `Day_of_Year` rendered as text
    ///
    /// The day column holds `1..=N` followed by the `Mean` label, so it is
    /// a string column in this view.
    pub fn to_export_frame(&self) -> Result<DataFrame> {
        let mut day_labels: Vec<String> =
            (1..=self.data_rows()).map(|day| day.to_string()).collect();
        day_labels.push(MEAN_ROW_LABEL.to_string());

        let mut columns = Vec::with_capacity(self.stations.len() + 1);
        columns.push(Column::new(DAY_OF_YEAR_COLUMN.into(), day_labels));

        for (name, mean) in self.stations.iter().zip(&self.means) {
            let mut values = self.station_values(name)?;
            values.push(*mean);
            columns.push(Column::new(name.as_str().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }
}
