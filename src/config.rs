//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then command-line overrides applied by the CLI through the `with_*`
//! builders. [`ClimateConfig::validate`] must pass before any file is read.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DAY_OF_YEAR_COLUMN, DEFAULT_BASE_DIR_NAME,
    DEFAULT_EXTENSIONS, MAX_TARGET_YEAR, MIN_TARGET_YEAR, OUTPUT_FILE_PREFIX,
};
use crate::error::{ClimateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Spreadsheet formats the consolidated table can be exported to
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook
    #[default]
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Settings for a single consolidation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Directory holding one subdirectory per station
    pub base_dir: PathBuf,

    /// Station names in output column order
    pub stations: Vec<String>,

    /// Year to consolidate
    pub target_year: Option<i32>,

    /// Extensions accepted after the year segment (empty = any)
    pub extensions: Vec<String>,

    pub format: ExportFormat,

    /// Where the export lands; defaults to `base_dir`
    pub output_dir: Option<PathBuf>,

    /// Show a progress bar while reading files
    pub show_progress: bool,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            base_dir: Self::default_base_dir(),
            stations: Vec::new(),
            target_year: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            format: ExportFormat::default(),
            output_dir: None,
            show_progress: true,
        }
    }
}

impl ClimateConfig {
    /// `<desktop>/climate data`, or `./climate data` without a desktop dir
    pub fn default_base_dir() -> PathBuf {
        dirs::desktop_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_BASE_DIR_NAME)
    }

    /// Location of the per-user config file, if the platform has one
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML config file; unspecified keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ClimateError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ClimateError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load from an explicit file, else the default file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading config file: {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_config_path().filter(|path| path.is_file()) {
            Some(path) => {
                debug!("Loading default config file: {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stations = stations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target_year(mut self, year: i32) -> Self {
        self.target_year = Some(year);
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The target year, or a configuration error if none was given
    pub fn year(&self) -> Result<i32> {
        self.target_year
            .ok_or_else(|| ClimateError::configuration("No target year given"))
    }

    pub fn station_dir(&self, station: &str) -> PathBuf {
        self.base_dir.join(station)
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.base_dir)
    }

    /// `<output_dir>/processed_climate_data_<year>.<ext>`
    pub fn output_path(&self, year: i32) -> PathBuf {
        self.output_dir().join(format!(
            "{}_{}.{}",
            OUTPUT_FILE_PREFIX,
            year,
            self.format.extension()
        ))
    }

    /// Check inputs and directory layout before processing starts
    pub fn validate(&self) -> Result<()> {
        if self.stations.is_empty() {
            return Err(ClimateError::configuration(
                "At least one station is required",
            ));
        }

        let mut seen = HashSet::new();
        for (i, station) in self.stations.iter().enumerate() {
            if station.trim().is_empty() {
                return Err(ClimateError::configuration(format!(
                    "Station {} has an empty name",
                    i + 1
                )));
            }
            if station == DAY_OF_YEAR_COLUMN {
                return Err(ClimateError::configuration(format!(
                    "Station name '{}' is reserved",
                    DAY_OF_YEAR_COLUMN
                )));
            }
            if !seen.insert(station.as_str()) {
                return Err(ClimateError::configuration(format!(
                    "Station '{}' is listed more than once",
                    station
                )));
            }
        }

        let year = self.year()?;
        if !(MIN_TARGET_YEAR..=MAX_TARGET_YEAR).contains(&year) {
            return Err(ClimateError::configuration(format!(
                "Target year {} is outside {}-{}",
                year, MIN_TARGET_YEAR, MAX_TARGET_YEAR
            )));
        }

        if !self.base_dir.is_dir() {
            return Err(ClimateError::BaseDirectoryNotFound {
                path: self.base_dir.clone(),
            });
        }

        for station in &self.stations {
            let path = self.station_dir(station);
            if !path.is_dir() {
                return Err(ClimateError::StationDirectoryNotFound {
                    station: station.clone(),
                    path,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn valid_config(temp_dir: &TempDir) -> ClimateConfig {
        fs::create_dir_all(temp_dir.path().join("A")).unwrap();
        fs::create_dir_all(temp_dir.path().join("B")).unwrap();
        ClimateConfig::default()
            .with_base_dir(temp_dir.path())
            .with_stations(["A", "B"])
            .with_target_year(1992)
    }

    #[test]
    fn test_valid_config_passes() {
        let temp_dir = TempDir::new().unwrap();
        assert!(valid_config(&temp_dir).validate().is_ok());
    }

    #[test]
    fn test_no_stations_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = valid_config(&temp_dir).with_stations(Vec::<String>::new());
        assert!(matches!(
            config.validate(),
            Err(ClimateError::Configuration { .. })
        ));
    }

    #[test]
    fn test_blank_duplicate_and_reserved_names_rejected() {
        let temp_dir = TempDir::new().unwrap();

        for stations in [vec!["A", "  "], vec!["A", "A"], vec!["A", "Day_of_Year"]] {
            let config = valid_config(&temp_dir).with_stations(stations);
            assert!(matches!(
                config.validate(),
                Err(ClimateError::Configuration { .. })
            ));
        }
    }

    #[test]
    fn test_year_required_and_in_range() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = valid_config(&temp_dir);
        config.target_year = None;
        assert!(config.validate().is_err());

        assert!(valid_config(&temp_dir).with_target_year(1899).validate().is_err());
        assert!(valid_config(&temp_dir).with_target_year(2100).validate().is_err());
        assert!(valid_config(&temp_dir).with_target_year(2099).validate().is_ok());
    }

    #[test]
    fn test_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nowhere");
        let config = valid_config(&temp_dir).with_base_dir(&missing);

        match config.validate().unwrap_err() {
            ClimateError::BaseDirectoryNotFound { path } => assert_eq!(path, missing),
            other => panic!("Expected BaseDirectoryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_station_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = valid_config(&temp_dir).with_stations(["A", "C"]);

        match config.validate().unwrap_err() {
            ClimateError::StationDirectoryNotFound { station, path } => {
                assert_eq!(station, "C");
                assert_eq!(path, temp_dir.path().join("C"));
            }
            other => panic!("Expected StationDirectoryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_output_path_pattern() {
        let config = ClimateConfig::default()
            .with_base_dir("/data/climate")
            .with_format(ExportFormat::Csv);
        assert_eq!(
            config.output_path(2005),
            PathBuf::from("/data/climate/processed_climate_data_2005.csv")
        );

        let config = config.with_output_dir("/tmp/out").with_format(ExportFormat::Xlsx);
        assert_eq!(
            config.output_path(1992),
            PathBuf::from("/tmp/out/processed_climate_data_1992.xlsx")
        );
    }

    #[test]
    fn test_from_file_keeps_defaults_for_missing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "base_dir = \"/srv/climate\"\nstations = [\"North\", \"South\"]\nformat = \"csv\"\n",
        )
        .unwrap();

        let config = ClimateConfig::from_file(&path).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/srv/climate"));
        assert_eq!(config.stations, vec!["North", "South"]);
        assert_eq!(config.format, ExportFormat::Csv);
        assert_eq!(config.target_year, None);
        assert_eq!(config.extensions, vec!["txt", "dat", "asc"]);
        assert!(config.show_progress);
    }

    #[test]
    fn test_from_file_reports_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "stations = 5").unwrap();

        assert!(matches!(
            ClimateConfig::from_file(&path),
            Err(ClimateError::ConfigFile { .. })
        ));
    }
}
