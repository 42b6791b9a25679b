use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::WeatherSettings;
use crate::error::IrrigationError;
use crate::models::Coordinate;

use super::forecast::DAILY_FIELDS;

/// Source of raw daily forecast responses.
pub trait WeatherClient {
    /// Fetch the daily forecast body for a coordinate.
    ///
    /// Non-2xx responses are errors.
    fn fetch_daily(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<String, IrrigationError>> + Send;
}

/// Client for the Open-Meteo forecast API (<https://open-meteo.com>).
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(settings: &WeatherSettings) -> Result<Self, IrrigationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl WeatherClient for OpenMeteoClient {
    async fn fetch_daily(&self, coordinate: Coordinate) -> Result<String, IrrigationError> {
        debug!(url = %self.base_url, %coordinate, "requesting daily forecast");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IrrigationError::Weather(format!(
                "forecast request failed with HTTP {status}"
            )));
        }

        Ok(response.text().await?)
    }
}
