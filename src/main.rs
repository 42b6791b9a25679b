use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use avocado_irrigation::{
    analysis::{Estimator, HistorySummary},
    config::AppConfig,
    io::{CsvLog, LogRecord},
    models::{Coordinate, EtoReading, TreeProfile},
    visualization::{
        print_coefficients, print_estimate, print_eto_reading, print_history, print_water_chart,
    },
    weather::{EtoProvider, OpenMeteoClient},
};

#[derive(Parser)]
#[command(
    name = "avocado-irrigation",
    about = "Avocado Irrigation Estimator - daily water need per tree from ETo, age, canopy and soil",
    version,
    author
)]
struct Cli {
    /// Path to a TOML config file (defaults to ./irrigation.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the daily water need of one tree
    Estimate {
        /// Tree age in years (tabulated: 1, 2, 3, 5, 10)
        #[arg(short, long)]
        age: u32,

        /// Canopy diameter in meters (0.2-12.0)
        #[arg(short, long)]
        canopy: f64,

        /// Soil type, e.g. Αμμώδες, Αμμοπηλώδες, Πηλώδες (or sandy, sandy-loam, loam)
        #[arg(short, long)]
        soil: Option<String>,

        /// Manual ETo in mm/day; skips the weather API
        #[arg(short, long)]
        eto: Option<f64>,

        /// Latitude for the weather API
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude for the weather API
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Append the result to the irrigation log
        #[arg(long)]
        save: bool,

        /// Log file path (overrides config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Print the estimate as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fetch today's ETo for a location
    Eto {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Show logged estimates with summary statistics
    History {
        /// Log file path (overrides config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Also draw a bar chart of water need per entry
        #[arg(long)]
        chart: bool,
    },

    /// Show the crop coefficient and soil factor tables
    Coefficients,

    /// Start the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

fn coordinate(config: &AppConfig, lat: Option<f64>, lon: Option<f64>) -> Result<Coordinate> {
    let default = config.weather.coordinate();
    let coord = Coordinate::new(
        lat.unwrap_or(default.latitude),
        lon.unwrap_or(default.longitude),
    );
    coord.validate()?;
    Ok(coord)
}

fn resolve_eto(config: &AppConfig, coord: Coordinate) -> Result<EtoReading> {
    let client = OpenMeteoClient::new(&config.weather)?;
    let provider = EtoProvider::new(client, config.fallback.clone());
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(provider.resolve(coord, Local::now().date_naive())))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Estimate {
            age,
            canopy,
            soil,
            eto,
            lat,
            lon,
            save,
            log,
            json,
        } => {
            let profile = TreeProfile::new(age, canopy, soil);
            profile.validate()?;

            let reading = match eto {
                Some(value) => {
                    if !value.is_finite() || value < 0.0 {
                        anyhow::bail!("ETo must be non-negative, got {value}");
                    }
                    avocado_irrigation::weather::manual_reading(value, Local::now().date_naive())
                }
                None => resolve_eto(&config, coordinate(&config, lat, lon)?)?,
            };

            if let Some(warning) = reading.warning() {
                eprintln!("{}: {warning}", "Warning".yellow());
            }

            let estimator = Estimator::new(config.coefficients.clone());
            let estimate = estimator.estimate(&profile, &reading);

            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                println!(
                    "\n{}",
                    format!(
                        "A {age}-year-old tree needs about {:.1} liters/day",
                        estimate.water_liters_per_day
                    )
                    .bold()
                    .cyan()
                );
                print_estimate(&estimate);
            }

            if save {
                let log = CsvLog::new(log.unwrap_or_else(|| config.log.path.clone()));
                match log.append(&LogRecord::from_estimate(&estimate, &reading)) {
                    Ok(()) => eprintln!(
                        "{} Saved to {}",
                        "Success:".green().bold(),
                        log.path().display()
                    ),
                    Err(e) => eprintln!(
                        "{}: could not write {}: {e}",
                        "Error".red().bold(),
                        log.path().display()
                    ),
                }
            }
        }

        Commands::Eto { lat, lon } => {
            let reading = resolve_eto(&config, coordinate(&config, lat, lon)?)?;
            print_eto_reading(&reading);
        }

        Commands::History { log, chart } => {
            let log = CsvLog::new(log.unwrap_or_else(|| config.log.path.clone()));
            let records = log.records()?;
            let summary = HistorySummary::from_records(&records).ok();
            print_history(&records, summary.as_ref());
            if chart {
                print_water_chart(&records);
            }
        }

        Commands::Coefficients => {
            print_coefficients(&config.coefficients);
        }

        #[cfg(feature = "web")]
        Commands::Serve { port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(avocado_irrigation::web::start_server(port, config))?;
        }
    }

    Ok(())
}
