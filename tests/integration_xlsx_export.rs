//! Integration tests for the full consolidation run with xlsx output
//!
//! Builds station folders on disk, runs the processor, and reads the
//! workbook back to check the exported layout.

use calamine::{Data, Reader, Xlsx, open_workbook};
use climate_consolidator::{ClimateConfig, ClimateError, ClimateProcessor};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_station_file(base: &Path, station: &str, file_name: &str, content: &str) {
    let station_dir = base.join(station);
    fs::create_dir_all(&station_dir).unwrap();
    fs::write(station_dir.join(file_name), content).unwrap();
}

fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

#[test]
fn test_two_station_workbook_layout() {
    let temp_dir = TempDir::new().unwrap();
    write_station_file(temp_dir.path(), "Kew", "jan.92.txt", "1 1.0\n2 2.0\n3 NaN\n");
    write_station_file(
        temp_dir.path(),
        "Oxford",
        "AS010319.92",
        "1 2.0\n2 4.0\n3 6.0\n4 8.0\n5 10.0\n",
    );
    write_station_file(temp_dir.path(), "Oxford", "AS010319.93", "1 99.0\n");

    let config = ClimateConfig::default()
        .with_base_dir(temp_dir.path())
        .with_stations(["Kew", "Oxford"])
        .with_target_year(1992)
        .with_progress(false);

    let report = ClimateProcessor::new(config).unwrap().run().unwrap();
    let output = temp_dir.path().join("processed_climate_data_1992.xlsx");
    assert_eq!(report.output_path, output);
    assert_eq!(report.files_processed, 2);

    let rows = read_sheet(&output, "1992");
    assert_eq!(rows.len(), 7);

    assert_eq!(
        rows[0],
        vec![
            Data::String("Day_of_Year".to_string()),
            Data::String("Kew".to_string()),
            Data::String("Oxford".to_string()),
        ]
    );
    assert_eq!(
        rows[1],
        vec![Data::Float(1.0), Data::Float(1.0), Data::Float(2.0)]
    );
    assert_eq!(rows[3], vec![Data::Float(3.0), Data::Empty, Data::Float(6.0)]);
    assert_eq!(rows[5], vec![Data::Float(5.0), Data::Empty, Data::Float(10.0)]);

    assert_eq!(
        rows[6],
        vec![
            Data::String("Mean".to_string()),
            Data::Float(1.5),
            Data::Float(6.0),
        ]
    );
}

#[test]
fn test_station_with_no_matching_files_keeps_empty_column() {
    let temp_dir = TempDir::new().unwrap();
    write_station_file(temp_dir.path(), "A", "jan.05.txt", "1 3.0\n2 5.0\n");
    write_station_file(temp_dir.path(), "B", "jan.50.txt", "1 1.0\n");

    let config = ClimateConfig::default()
        .with_base_dir(temp_dir.path())
        .with_stations(["A", "B"])
        .with_target_year(2005)
        .with_progress(false);

    ClimateProcessor::new(config).unwrap().run().unwrap();

    let rows = read_sheet(
        &temp_dir.path().join("processed_climate_data_2005.xlsx"),
        "2005",
    );
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0][2], Data::String("B".to_string()));
    assert_eq!(rows[1][2], Data::Empty);
    assert_eq!(rows[3][0], Data::String("Mean".to_string()));
    assert_eq!(rows[3][1], Data::Float(4.0));
    assert_eq!(rows[3][2], Data::Empty);
}

#[test]
fn test_missing_station_folder_produces_no_export() {
    let temp_dir = TempDir::new().unwrap();
    write_station_file(temp_dir.path(), "A", "jan.92.txt", "1 1.0\n");

    let config = ClimateConfig::default()
        .with_base_dir(temp_dir.path())
        .with_stations(["A", "Missing"])
        .with_target_year(1992)
        .with_progress(false);

    assert!(matches!(
        ClimateProcessor::new(config),
        Err(ClimateError::StationDirectoryNotFound { .. })
    ));
    assert!(
        !temp_dir
            .path()
            .join("processed_climate_data_1992.xlsx")
            .exists()
    );
}
