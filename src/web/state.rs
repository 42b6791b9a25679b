use crate::analysis::Estimator;
use crate::config::AppConfig;
use crate::error::IrrigationError;
use crate::io::CsvLog;
use crate::weather::{EtoProvider, OpenMeteoClient};

/// Shared, read-only server state. The log file is the only thing written.
pub struct AppState {
    pub config: AppConfig,
    pub estimator: Estimator,
    pub provider: EtoProvider<OpenMeteoClient>,
    pub log: CsvLog,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, IrrigationError> {
        let client = OpenMeteoClient::new(&config.weather)?;
        Ok(Self {
            estimator: Estimator::new(config.coefficients.clone()),
            provider: EtoProvider::new(client, config.fallback.clone()),
            log: CsvLog::new(config.log.path.clone()),
            config,
        })
    }
}
