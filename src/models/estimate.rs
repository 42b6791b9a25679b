use serde::{Deserialize, Serialize};

use super::profile::TreeProfile;

/// Daily water requirement for one tree and the inputs it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationEstimate {
    pub profile: TreeProfile,
    /// Reference evapotranspiration, mm/day
    pub eto_mm: f64,
    /// Crop coefficient applied
    pub kc: f64,
    /// Soil factor applied
    pub soil_factor: f64,
    /// Wetted area under the canopy, m²
    pub canopy_area_m2: f64,
    /// Liters per tree per day
    pub water_liters_per_day: f64,
}

impl IrrigationEstimate {
    /// Same requirement in cubic meters per tree per day.
    pub fn water_m3_per_day(&self) -> f64 {
        self.water_liters_per_day / 1000.0
    }

    /// Requirement for a block of `trees` identical trees, liters per day.
    pub fn water_liters_for(&self, trees: u32) -> f64 {
        self.water_liters_per_day * trees as f64
    }
}
