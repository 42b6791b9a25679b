use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::IrrigationError;
use crate::models::{ClimateSample, Coordinate};

/// Daily variables requested from the forecast endpoint.
///
/// Open-Meteo publishes daily reference ETo as `et0_fao_evapotranspiration`;
/// endpoints that only know that name reject this request and every reading
/// falls back. Both names are accepted when parsing the response.
pub const DAILY_FIELDS: &str = "evapotranspiration,temperature_2m_max,precipitation_sum";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default, alias = "et0_fao_evapotranspiration")]
    evapotranspiration: Option<Vec<Option<f64>>>,
    #[serde(default)]
    temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    precipitation_sum: Option<Vec<Option<f64>>>,
}

fn first(values: &Option<Vec<Option<f64>>>) -> Option<f64> {
    values.as_ref().and_then(|v| v.first().copied().flatten())
}

/// Parse a forecast response body into today's climate sample.
///
/// The first element of each daily array is today's value. ETo is required;
/// temperature and precipitation are optional. `today` dates the sample when
/// the response has no `daily.time` array.
pub fn parse_forecast(
    body: &str,
    coordinate: Coordinate,
    today: NaiveDate,
) -> Result<ClimateSample, IrrigationError> {
    let response: ForecastResponse = serde_json::from_str(body)?;

    if response.error {
        return Err(IrrigationError::Weather(
            response
                .reason
                .unwrap_or_else(|| "API reported an error".to_string()),
        ));
    }

    let daily = response
        .daily
        .ok_or_else(|| IrrigationError::Weather("response has no 'daily' block".to_string()))?;

    let eto_mm = first(&daily.evapotranspiration).ok_or_else(|| {
        IrrigationError::Weather("response has no evapotranspiration value for today".to_string())
    })?;
    if !eto_mm.is_finite() || eto_mm < 0.0 {
        return Err(IrrigationError::Weather(format!(
            "evapotranspiration must be non-negative, got {eto_mm}"
        )));
    }

    let date = daily
        .time
        .first()
        .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok())
        .unwrap_or(today);

    Ok(ClimateSample {
        date,
        coordinate: Some(coordinate),
        eto_mm,
        max_temp_c: first(&daily.temperature_2m_max),
        precipitation_mm: first(&daily.precipitation_sum),
    })
}
