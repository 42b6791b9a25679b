use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IrrigationError;
use crate::io::DEFAULT_LOG_FILE;
use crate::models::{Coefficients, Coordinate, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "irrigation.toml";

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Weather API endpoint and default location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl WeatherSettings {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Values substituted when the weather API cannot be used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    pub eto_mm: f64,
    pub max_temp_c: f64,
    pub precipitation_mm: f64,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            eto_mm: 5.0,
            max_temp_c: 25.0,
            precipitation_mm: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub path: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Top-level configuration, loaded from TOML. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub weather: WeatherSettings,
    pub fallback: FallbackSettings,
    pub coefficients: Coefficients,
    pub log: LogSettings,
}

impl AppConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, IrrigationError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IrrigationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, else `irrigation.toml` if present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, IrrigationError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), IrrigationError> {
        if self.weather.timeout_secs == 0 {
            return Err(IrrigationError::ValidationError(
                "weather.timeout_secs must be positive".to_string(),
            ));
        }
        if self.weather.base_url.trim().is_empty() {
            return Err(IrrigationError::ValidationError(
                "weather.base_url must not be empty".to_string(),
            ));
        }
        self.weather.coordinate().validate()?;
        if !self.fallback.eto_mm.is_finite() || self.fallback.eto_mm < 0.0 {
            return Err(IrrigationError::ValidationError(format!(
                "fallback.eto_mm must be non-negative, got {}",
                self.fallback.eto_mm
            )));
        }
        if self.fallback.precipitation_mm < 0.0 {
            return Err(IrrigationError::ValidationError(format!(
                "fallback.precipitation_mm must be non-negative, got {}",
                self.fallback.precipitation_mm
            )));
        }
        self.coefficients.validate()
    }
}
