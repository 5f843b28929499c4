//! Command-line interface components.

pub mod input;

use crate::config::{ClimateConfig, ExportFormat};
use crate::models::RunReport;
use crate::processor::ClimateProcessor;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "climate-consolidator")]
#[command(about = "Consolidate per-station climate files for one year into a single spreadsheet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory containing one subfolder per station
    #[arg(value_name = "BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Year to consolidate (prompted for if omitted)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Station names, repeated or comma-separated (prompted for if omitted)
    #[arg(short, long = "station", value_name = "NAME", value_delimiter = ',')]
    pub stations: Vec<String>,

    /// Export format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Data file extensions accepted after the year suffix
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Directory for the exported file (defaults to BASE_DIR)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fail instead of prompting for missing stations or year
    #[arg(long)]
    pub no_input: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors, no progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Layer command-line values over a loaded configuration
    pub fn apply_overrides(&self, mut config: ClimateConfig) -> ClimateConfig {
        if let Some(base_dir) = &self.base_dir {
            config = config.with_base_dir(base_dir);
        }
        if let Some(year) = self.year {
            config = config.with_target_year(year);
        }
        if !self.stations.is_empty() {
            config = config.with_stations(self.stations.iter().map(|s| s.trim().to_string()));
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(extensions) = &self.extensions {
            config = config.with_extensions(extensions.iter().cloned());
        }
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if self.quiet {
            config = config.with_progress(false);
        }
        config
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("climate_consolidator={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Fill in stations and year interactively where still missing
fn complete_interactively(mut config: ClimateConfig, allow_prompt: bool) -> Result<ClimateConfig> {
    let needs_stations = config.stations.is_empty();
    let needs_year = config.target_year.is_none();
    if !needs_stations && !needs_year {
        return Ok(config);
    }
    if !allow_prompt {
        anyhow::bail!("Stations and target year must be given when --no-input is set");
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();

    if needs_stations {
        let count = input::prompt_station_count(&mut reader, &mut writer)?;
        let names = input::prompt_station_names(&mut reader, &mut writer, count)?;
        config = config.with_stations(names);
    }
    print_stations(&config.stations);

    if needs_year {
        config = config.with_target_year(input::prompt_target_year(&mut reader, &mut writer)?);
    }

    Ok(config)
}

fn print_stations(stations: &[String]) {
    println!("\n{}", "Confirmed Stations".bright_green().bold());
    for (i, station) in stations.iter().enumerate() {
        println!(
            "  {}. {}",
            (i + 1).to_string().bright_yellow().bold(),
            station.bright_cyan()
        );
    }
    println!();
}

fn print_summary(report: &RunReport) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Target year:".bright_cyan(),
        report.target_year.to_string().bright_white()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        report.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        report.files_processed.to_string().bright_white()
    );
    if report.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            report.files_failed.to_string().bright_red().bold()
        );
        for failure in &report.failures {
            println!(
                "    {} [{}] {}",
                "-".bright_red(),
                failure.station,
                failure.reason
            );
        }
    }
    println!(
        "  {} {}",
        "Data rows:".bright_cyan(),
        report.data_rows.to_string().bright_white().bold()
    );
    for station in &report.stations {
        println!(
            "  {} {} files, {} values, {} missing",
            format!("{}:", station.name).bright_cyan(),
            station.files_used,
            station.values,
            station.missing
        );
    }
    println!(
        "\n{} {}",
        "Processed data successfully saved to:".bright_green(),
        report.output_path.display()
    );
}

/// Run the CLI: load config, prompt for gaps, process, report
pub fn run(args: Args) -> Result<RunReport> {
    let config = ClimateConfig::load(args.config.as_deref())?;
    let config = args.apply_overrides(config);
    let config = complete_interactively(config, !args.no_input)?;
    debug!("Effective configuration: {:?}", config);

    let processor = ClimateProcessor::new(config).context("Input validation failed")?;
    info!("Consolidating data for year {}", processor.target_year());

    let report = processor
        .run()
        .with_context(|| format!("Processing year {} failed", processor.target_year()))?;

    if !args.quiet {
        print_summary(&report);
    }

    Ok(report)
}
