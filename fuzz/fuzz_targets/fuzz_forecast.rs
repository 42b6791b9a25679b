#![no_main]

use avocado_irrigation::{models::Coordinate, weather::parse_forecast};
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        if let Ok(sample) = parse_forecast(body, Coordinate::default(), today) {
            assert!(sample.eto_mm >= 0.0);
        }
    }
});
