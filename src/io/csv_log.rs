use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::IrrigationError;
use crate::models::{EtoReading, IrrigationEstimate};

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "irrigation_log.csv";

/// One flattened row of the irrigation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub date: NaiveDate,
    pub age: u32,
    pub soil: String,
    pub canopy_diameter_m: f64,
    pub eto_mm: f64,
    pub eto_source: String,
    pub kc: f64,
    pub soil_factor: f64,
    pub water_liters_per_tree: f64,
}

impl LogRecord {
    /// Flatten an estimate and the reading it used. The row is dated by the reading.
    pub fn from_estimate(estimate: &IrrigationEstimate, reading: &EtoReading) -> Self {
        Self {
            date: reading.sample.date,
            age: estimate.profile.age_years,
            soil: estimate.profile.soil_label().to_string(),
            canopy_diameter_m: estimate.profile.canopy_diameter_m,
            eto_mm: estimate.eto_mm,
            eto_source: reading.source.to_string(),
            kc: estimate.kc,
            soil_factor: estimate.soil_factor,
            water_liters_per_tree: estimate.water_liters_per_day,
        }
    }
}

/// Append one row, writing the header first if the file is new or empty.
pub fn append_log(path: impl AsRef<Path>, record: &LogRecord) -> Result<(), IrrigationError> {
    let path = path.as_ref();
    let needs_header = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;

    info!(
        path = %path.display(),
        header = needs_header,
        liters = record.water_liters_per_tree,
        "appended irrigation log row"
    );
    Ok(())
}

/// Read every row in insertion order.
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<LogRecord>, IrrigationError> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: LogRecord = result?;
        records.push(record);
    }
    debug!(path = %path.display(), rows = records.len(), "read irrigation log");
    Ok(records)
}

/// Like [`read_log`], but a missing file reads as an empty log.
pub fn read_log_if_exists(path: impl AsRef<Path>) -> Result<Vec<LogRecord>, IrrigationError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_log(path)
}

/// Append-only CSV log at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvLog {
    path: PathBuf,
}

impl CsvLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &LogRecord) -> Result<(), IrrigationError> {
        append_log(&self.path, record)
    }

    pub fn records(&self) -> Result<Vec<LogRecord>, IrrigationError> {
        read_log_if_exists(&self.path)
    }
}

impl Default for CsvLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}
