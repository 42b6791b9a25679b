pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;
pub mod weather;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::Estimator;
pub use config::AppConfig;
pub use error::IrrigationError;
pub use io::{CsvLog, LogRecord};
pub use models::{ClimateSample, Coordinate, EtoReading, EtoSource, IrrigationEstimate, TreeProfile};
pub use weather::{EtoProvider, OpenMeteoClient, WeatherClient};
