//! Integration tests for the processor module
//!
//! Tests the complete pipeline on station directory fixtures.


use crate::config::ClimateConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write `content` to `<base>/<station>/<file_name>`, creating the station folder
pub fn write_station_file(base: &Path, station: &str, file_name: &str, content: &str) {
    let station_dir = base.join(station);
    fs::create_dir_all(&station_dir).unwrap();
    fs::write(station_dir.join(file_name), content).unwrap();
}

/// Config over `temp_dir` with progress output disabled
pub fn test_config(temp_dir: &TempDir, stations: &[&str], year: i32) -> ClimateConfig {
    ClimateConfig::default()
        .with_base_dir(temp_dir.path())
        .with_stations(stations.iter().copied())
        .with_target_year(year)
        .with_progress(false)
}
