use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Vatolakkos, Chania.
pub const DEFAULT_LATITUDE: f64 = 35.4239;
pub const DEFAULT_LONGITUDE: f64 = 23.9237;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn validate(&self) -> Result<(), crate::error::IrrigationError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(crate::error::IrrigationError::ValidationError(format!(
                "latitude must be in -90..=90, got {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(crate::error::IrrigationError::ValidationError(format!(
                "longitude must be in -180..=180, got {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Daily weather values for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSample {
    pub date: NaiveDate,
    /// `None` for manually entered ETo
    pub coordinate: Option<Coordinate>,
    /// Reference evapotranspiration in mm/day
    pub eto_mm: f64,
    /// Daily maximum air temperature at 2 m, °C
    pub max_temp_c: Option<f64>,
    /// Daily precipitation sum, mm
    pub precipitation_mm: Option<f64>,
}

/// Where an ETo value came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EtoSource {
    Manual,
    Api,
    /// The API could not be used; `reason` says why.
    Fallback { reason: String },
}

impl std::fmt::Display for EtoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EtoSource::Manual => write!(f, "manual"),
            EtoSource::Api => write!(f, "api"),
            EtoSource::Fallback { .. } => write!(f, "fallback"),
        }
    }
}

/// A resolved ETo value together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtoReading {
    pub sample: ClimateSample,
    pub source: EtoSource,
}

impl EtoReading {
    pub fn eto_mm(&self) -> f64 {
        self.sample.eto_mm
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, EtoSource::Fallback { .. })
    }

    /// User-facing warning, present only for fallback readings.
    pub fn warning(&self) -> Option<String> {
        match &self.source {
            EtoSource::Fallback { reason } => Some(format!(
                "Could not fetch ETo ({reason}); using default {:.1} mm/day",
                self.sample.eto_mm
            )),
            _ => None,
        }
    }
}
