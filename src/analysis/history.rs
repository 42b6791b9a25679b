use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

use crate::error::IrrigationError;
use crate::io::LogRecord;

/// Summary statistics over the irrigation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub entries: usize,
    pub mean_liters: f64,
    pub median_liters: f64,
    /// Sample standard deviation; `None` for a single entry
    pub std_dev_liters: Option<f64>,
    pub min_liters: f64,
    pub max_liters: f64,
    pub mean_eto_mm: f64,
    /// Entries whose ETo came from the fallback default
    pub fallback_entries: usize,
}

impl HistorySummary {
    pub fn from_records(records: &[LogRecord]) -> Result<Self, IrrigationError> {
        if records.is_empty() {
            return Err(IrrigationError::InsufficientData(
                "Irrigation log has no entries".to_string(),
            ));
        }

        let liters: Vec<f64> = records.iter().map(|r| r.water_liters_per_tree).collect();
        let eto: Vec<f64> = records.iter().map(|r| r.eto_mm).collect();

        let std_dev_liters = if liters.len() > 1 {
            Some(liters.iter().std_dev())
        } else {
            None
        };

        Ok(HistorySummary {
            entries: records.len(),
            mean_liters: liters.iter().mean(),
            median_liters: Data::new(liters.clone()).median(),
            std_dev_liters,
            min_liters: Statistics::min(liters.iter()),
            max_liters: Statistics::max(liters.iter()),
            mean_eto_mm: eto.iter().mean(),
            fallback_entries: records
                .iter()
                .filter(|r| r.eto_source == "fallback")
                .count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(liters: f64, eto: f64, source: &str) -> LogRecord {
        LogRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            age: 5,
            soil: String::new(),
            canopy_diameter_m: 2.0,
            eto_mm: eto,
            eto_source: source.to_string(),
            kc: 0.75,
            soil_factor: 1.0,
            water_liters_per_tree: liters,
        }
    }

    #[test]
    fn test_empty_log_is_insufficient() {
        let err = HistorySummary::from_records(&[]).unwrap_err();
        assert!(matches!(err, IrrigationError::InsufficientData(_)));
    }

    #[test]
    fn test_single_entry() {
        let s = HistorySummary::from_records(&[row(4.0, 5.0, "api")]).unwrap();
        assert_eq!(s.entries, 1);
        assert!((s.mean_liters - 4.0).abs() < 1e-12);
        assert!((s.median_liters - 4.0).abs() < 1e-12);
        assert!(s.std_dev_liters.is_none());
        assert_eq!(s.min_liters, 4.0);
        assert_eq!(s.max_liters, 4.0);
    }

    #[test]
    fn test_summary_values() {
        let rows = vec![
            row(2.0, 4.0, "api"),
            row(4.0, 5.0, "fallback"),
            row(9.0, 6.0, "manual"),
        ];
        let s = HistorySummary::from_records(&rows).unwrap();
        assert_eq!(s.entries, 3);
        assert!((s.mean_liters - 5.0).abs() < 1e-12);
        assert!((s.median_liters - 4.0).abs() < 1e-12);
        // sample variance: (9 + 1 + 16) / 2 = 13
        assert!((s.std_dev_liters.unwrap() - 13.0_f64.sqrt()).abs() < 1e-9);
        assert_eq!(s.min_liters, 2.0);
        assert_eq!(s.max_liters, 9.0);
        assert!((s.mean_eto_mm - 5.0).abs() < 1e-12);
        assert_eq!(s.fallback_entries, 1);
    }

    #[test]
    fn test_range_independent_of_order() {
        let rows = vec![
            row(6.5, 5.0, "api"),
            row(1.25, 5.0, "api"),
            row(11.0, 5.0, "api"),
            row(3.0, 5.0, "api"),
        ];
        let s = HistorySummary::from_records(&rows).unwrap();
        assert_eq!(s.min_liters, 1.25);
        assert_eq!(s.max_liters, 11.0);
    }
}
