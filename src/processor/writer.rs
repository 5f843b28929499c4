//! Spreadsheet export for consolidated tables
//!
//! Writes the day rows and the trailing mean row either as an Excel
//! workbook or as CSV. Missing values become empty cells in both formats.

use crate::config::ExportFormat;
use crate::constants::{DAY_OF_YEAR_COLUMN, MEAN_ROW_LABEL};
use crate::error::{ClimateError, Result};
use crate::processor::assembler::ConsolidatedTable;

use polars::prelude::{CsvWriter, SerWriter};
use rust_xlsxwriter::{Format, Workbook};
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

type ExportResult = std::result::Result<(), Box<dyn Error>>;

/// Table writer for one output file
#[derive(Debug)]
pub struct TableWriter {
    output_path: PathBuf,
    format: ExportFormat,
}

impl TableWriter {
    pub fn new(output_path: PathBuf, format: ExportFormat) -> Self {
        Self {
            output_path,
            format,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the table, creating the output directory if needed
    pub fn write(&self, table: &ConsolidatedTable) -> Result<()> {
        debug!(
            "Writing {} rows as {:?} to {}",
            table.data_rows() + 1,
            self.format,
            self.output_path.display()
        );

        let result = self.prepare_directory().and_then(|_| match self.format {
            ExportFormat::Xlsx => write_xlsx(table, &self.output_path),
            ExportFormat::Csv => write_csv(table, &self.output_path),
        });

        result.map_err(|e| ClimateError::Export {
            path: self.output_path.clone(),
            reason: e.to_string(),
        })
    }

    fn prepare_directory(&self) -> ExportResult {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

fn write_xlsx(table: &ConsolidatedTable, path: &Path) -> ExportResult {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(table.year().to_string())?;

    worksheet.write_string_with_format(0, 0, DAY_OF_YEAR_COLUMN, &header)?;
    let mut columns = Vec::with_capacity(table.stations().len());
    for (i, station) in table.stations().iter().enumerate() {
        worksheet.write_string_with_format(0, (i + 1) as u16, station, &header)?;
        columns.push(table.station_values(station)?);
    }

    let rows = table.data_rows();
    for row in 0..rows {
        let sheet_row = (row + 1) as u32;
        worksheet.write_number(sheet_row, 0, (row + 1) as f64)?;
        for (i, values) in columns.iter().enumerate() {
            if let Some(value) = values[row] {
                worksheet.write_number(sheet_row, (i + 1) as u16, value)?;
            }
        }
    }

    let mean_row = (rows + 1) as u32;
    worksheet.write_string(mean_row, 0, MEAN_ROW_LABEL)?;
    for (i, mean) in table.means().iter().enumerate() {
        if let Some(mean) = mean {
            worksheet.write_number(mean_row, (i + 1) as u16, *mean)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(table: &ConsolidatedTable, path: &Path) -> ExportResult {
    let mut frame = table.to_export_frame()?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(())
}
