//! ETo from the weather API or from user input.
//!
//! [`EtoProvider::resolve`] never fails: network errors, non-2xx responses and
//! missing fields all produce an [`EtoReading`](crate::models::EtoReading) with a
//! fallback source and the reason attached.

mod client;
mod forecast;
mod provider;

pub use client::{OpenMeteoClient, WeatherClient};
pub use forecast::{parse_forecast, DAILY_FIELDS};
pub use provider::{manual_reading, EtoProvider};
