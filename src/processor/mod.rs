//! Main processing engine.
//!
//! Orchestrates one consolidation run: file discovery per station, record
//! extraction per file, table assembly across stations, and export. Files
//! are processed one at a time; a file that cannot be read is reported and
//! left out while the run continues.

pub mod assembler;
pub mod discovery;
pub mod extractor;
pub mod writer;

#[cfg(test)]
mod tests;

use self::{
    assembler::{ConsolidatedTable, TableAssembler},
    discovery::FileDiscovery,
    extractor::extract_series,
    writer::TableWriter,
};

use crate::config::ClimateConfig;
use crate::error::Result;
use crate::models::{FileFailure, RunReport, StationSummary};

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{info, warn};

/// Processor for a single target year across the configured stations
#[derive(Debug)]
pub struct ClimateProcessor {
    config: ClimateConfig,
    target_year: i32,
    file_discovery: FileDiscovery,
    table_writer: TableWriter,
}

impl ClimateProcessor {
    /// Create a processor, validating the configuration and directory layout
    pub fn new(config: ClimateConfig) -> Result<Self> {
        config.validate()?;
        let target_year = config.year()?;

        Ok(Self {
            file_discovery: FileDiscovery::new(&config.extensions),
            table_writer: TableWriter::new(config.output_path(target_year), config.format),
            target_year,
            config,
        })
    }

    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    /// Resolve, extract, and assemble without writing anything
    pub fn build_table(&self) -> Result<(ConsolidatedTable, RunReport)> {
        let mut report = RunReport {
            target_year: self.target_year,
            output_path: self.table_writer.output_path().to_path_buf(),
            ..Default::default()
        };

        info!(
            "Processing data for year {} from {} stations",
            self.target_year,
            self.config.stations.len()
        );

        let mut assembler = TableAssembler::new();
        let progress_bar = self.create_progress_bar();

        for station in &self.config.stations {
            let station_dir = self.config.station_dir(station);
            let resolved = self.file_discovery.resolve(&station_dir, self.target_year)?;
            report.files_skipped += resolved.skipped.len();

            let mut summary = StationSummary {
                name: station.clone(),
                ..Default::default()
            };
            let mut parts = Vec::with_capacity(resolved.files.len());

            progress_bar.set_message(station.clone());
            progress_bar.inc_length(resolved.files.len() as u64);

            for file in &resolved.files {
                match extract_series(station, file) {
                    Ok(series) => {
                        summary.files_used += 1;
                        summary.values += series.len();
                        summary.missing += series.missing_count();
                        report.files_processed += 1;
                        parts.push(series);
                    }
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!("{}. Skipping this file.", e);
                        report.files_failed += 1;
                        report.failures.push(FileFailure {
                            station: station.clone(),
                            path: file.path.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
                progress_bar.inc(1);
            }

            if resolved.files.is_empty() {
                warn!(
                    "No files matching target year {} were found for station '{}'",
                    self.target_year, station
                );
            } else if parts.is_empty() {
                warn!(
                    "No valid data could be extracted from any files for station '{}' for year {}",
                    station, self.target_year
                );
            }

            assembler.add_station(station.clone(), parts);
            report.stations.push(summary);
        }

        progress_bar.finish_and_clear();

        let table = assembler.finish(self.target_year)?;
        report.data_rows = table.data_rows();

        Ok((table, report))
    }

    /// Main processing entry point
    pub fn run(&self) -> Result<RunReport> {
        let start_time = Instant::now();

        let (table, mut report) = self.build_table()?;
        self.table_writer.write(&table)?;

        info!(
            "Processed data successfully saved to: {}",
            report.output_path.display()
        );

        report.processing_time_ms = start_time.elapsed().as_millis();
        Ok(report)
    }

    fn create_progress_bar(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} files {msg}")
        {
            progress_bar.set_style(style.progress_chars("#>-"));
        }
        progress_bar
    }
}
