#![no_main]

use avocado_irrigation::config::AppConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = AppConfig::from_toml_str(text) {
            assert!(config.weather.timeout_secs > 0);
        }
    }
});
