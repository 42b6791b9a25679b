use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::FallbackSettings;
use crate::error::IrrigationError;
use crate::models::{ClimateSample, Coordinate, EtoReading, EtoSource};

use super::client::WeatherClient;
use super::forecast::parse_forecast;

/// Wrap a user-supplied ETo value. The value passes through unchanged.
pub fn manual_reading(eto_mm: f64, date: NaiveDate) -> EtoReading {
    EtoReading {
        sample: ClimateSample {
            date,
            coordinate: None,
            eto_mm,
            max_temp_c: None,
            precipitation_mm: None,
        },
        source: EtoSource::Manual,
    }
}

/// Resolves today's ETo, falling back to configured defaults when the API fails.
#[derive(Debug, Clone)]
pub struct EtoProvider<C> {
    client: C,
    fallback: FallbackSettings,
}

impl<C: WeatherClient> EtoProvider<C> {
    pub fn new(client: C, fallback: FallbackSettings) -> Self {
        Self { client, fallback }
    }

    pub fn manual(&self, eto_mm: f64, date: NaiveDate) -> EtoReading {
        manual_reading(eto_mm, date)
    }

    /// Fetch ETo for `coordinate`. Never fails: any error becomes a fallback reading.
    pub async fn resolve(&self, coordinate: Coordinate, today: NaiveDate) -> EtoReading {
        match self.fetch(coordinate, today).await {
            Ok(sample) => {
                info!(%coordinate, eto_mm = sample.eto_mm, "fetched ETo");
                EtoReading {
                    sample,
                    source: EtoSource::Api,
                }
            }
            Err(e) => {
                warn!(%coordinate, error = %e, "ETo fetch failed, using fallback");
                self.fallback_reading(Some(coordinate), today, e.to_string())
            }
        }
    }

    async fn fetch(
        &self,
        coordinate: Coordinate,
        today: NaiveDate,
    ) -> Result<ClimateSample, IrrigationError> {
        coordinate.validate()?;
        let body = self.client.fetch_daily(coordinate).await?;
        parse_forecast(&body, coordinate, today)
    }

    pub fn fallback_reading(
        &self,
        coordinate: Option<Coordinate>,
        date: NaiveDate,
        reason: String,
    ) -> EtoReading {
        EtoReading {
            sample: ClimateSample {
                date,
                coordinate,
                eto_mm: self.fallback.eto_mm,
                max_temp_c: Some(self.fallback.max_temp_c),
                precipitation_mm: Some(self.fallback.precipitation_mm),
            },
            source: EtoSource::Fallback { reason },
        }
    }
}
