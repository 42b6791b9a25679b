use actix_web::{web, HttpResponse};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::analysis::HistorySummary;
use crate::error::IrrigationError;
use crate::io::LogRecord;
use crate::models::{Coordinate, EtoReading, IrrigationEstimate, TreeProfile};
use crate::weather::manual_reading;

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(IrrigationError);

impl From<IrrigationError> for WebError {
    fn from(e: IrrigationError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            IrrigationError::ValidationError(_) | IrrigationError::ParseError(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request")
            }
            IrrigationError::InsufficientData(_) => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Entity",
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Requested coordinate, with missing components taken from the configured location.
fn requested_coordinate(
    state: &AppState,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Coordinate, IrrigationError> {
    let default = state.config.weather.coordinate();
    let coord = Coordinate::new(
        latitude.unwrap_or(default.latitude),
        longitude.unwrap_or(default.longitude),
    );
    coord.validate()?;
    Ok(coord)
}

// ---------------------------------------------------------------------------
// Estimate endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    age: u32,
    canopy_diameter_m: f64,
    soil: Option<String>,
    /// Manual ETo; when absent the weather API is queried
    eto_mm: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    save: bool,
}

#[derive(Debug, Serialize)]
struct EstimateResponse {
    estimate: IrrigationEstimate,
    water_m3_per_day: f64,
    eto_source: String,
    reading: EtoReading,
    warning: Option<String>,
    saved: bool,
    log_error: Option<String>,
}

pub async fn estimate(
    state: web::Data<AppState>,
    body: web::Json<EstimateRequest>,
) -> Result<HttpResponse, WebError> {
    let req = body.into_inner();
    let profile = TreeProfile::new(req.age, req.canopy_diameter_m, req.soil);
    profile.validate()?;

    let today = Local::now().date_naive();
    let reading = match req.eto_mm {
        Some(eto) => {
            if !eto.is_finite() || eto < 0.0 {
                return Err(IrrigationError::ValidationError(format!(
                    "ETo must be non-negative, got {eto}"
                ))
                .into());
            }
            manual_reading(eto, today)
        }
        None => {
            let coord = requested_coordinate(&state, req.latitude, req.longitude)?;
            state.provider.resolve(coord, today).await
        }
    };

    let estimate = state.estimator.estimate(&profile, &reading);

    let (saved, log_error) = if req.save {
        match state.log.append(&LogRecord::from_estimate(&estimate, &reading)) {
            Ok(()) => (true, None),
            Err(e) => {
                error!(path = %state.log.path().display(), error = %e, "failed to write irrigation log");
                (false, Some(e.to_string()))
            }
        }
    } else {
        (false, None)
    };

    Ok(HttpResponse::Ok().json(EstimateResponse {
        water_m3_per_day: estimate.water_m3_per_day(),
        warning: reading.warning(),
        eto_source: reading.source.to_string(),
        estimate,
        reading,
        saved,
        log_error,
    }))
}

// ---------------------------------------------------------------------------
// ETo endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EtoQuery {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

pub async fn eto(
    state: web::Data<AppState>,
    query: web::Query<EtoQuery>,
) -> Result<HttpResponse, WebError> {
    let coord = requested_coordinate(&state, query.latitude, query.longitude)?;
    let reading = state.provider.resolve(coord, Local::now().date_naive()).await;
    Ok(HttpResponse::Ok().json(reading))
}

// ---------------------------------------------------------------------------
// Log endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct LogResponse {
    records: Vec<LogRecord>,
    summary: Option<HistorySummary>,
}

pub async fn log_entries(state: web::Data<AppState>) -> Result<HttpResponse, WebError> {
    let records = state.log.records()?;
    let summary = HistorySummary::from_records(&records).ok();
    Ok(HttpResponse::Ok().json(LogResponse { records, summary }))
}

// ---------------------------------------------------------------------------
// Coefficients endpoint
// ---------------------------------------------------------------------------

pub async fn coefficients(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.estimator.coefficients())
}
