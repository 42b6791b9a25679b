use crate::models::{Coefficients, EtoReading, IrrigationEstimate, TreeProfile};

/// Crop coefficient for a tree age using the built-in table (0.8 for untabulated ages).
pub fn crop_coefficient(age: u32) -> f64 {
    crate::models::KC_BY_AGE
        .iter()
        .find(|(a, _)| *a == age)
        .map(|(_, kc)| *kc)
        .unwrap_or(crate::models::DEFAULT_KC)
}

/// Soil factor using the built-in table (1.0 for unknown or missing soil).
pub fn soil_factor(soil: Option<&str>) -> f64 {
    let Some(raw) = soil else {
        return crate::models::DEFAULT_SOIL_FACTOR;
    };
    match raw.parse::<crate::models::SoilType>() {
        Ok(soil) => crate::models::SOIL_FACTORS
            .iter()
            .find(|(s, _)| *s == soil)
            .map(|(_, f)| *f)
            .unwrap_or(crate::models::DEFAULT_SOIL_FACTOR),
        Err(_) => crate::models::DEFAULT_SOIL_FACTOR,
    }
}

/// Ground area covered by a circular canopy, m².
pub fn canopy_area_m2(canopy_diameter_m: f64) -> f64 {
    std::f64::consts::PI * (canopy_diameter_m / 2.0).powi(2)
}

/// Daily water need in liters per tree.
///
/// `ETo [mm/day] * Kc * area [m²] * soil_factor`; 1 mm over 1 m² is 1 liter.
/// Inputs are not validated and negative results are not clamped.
pub fn estimate_water_liters(
    eto_mm: f64,
    age: u32,
    canopy_diameter_m: f64,
    soil: Option<&str>,
) -> f64 {
    eto_mm * crop_coefficient(age) * canopy_area_m2(canopy_diameter_m) * soil_factor(soil)
}

/// Irrigation estimator bound to a set of coefficient tables.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    coefficients: Coefficients,
}

impl Estimator {
    pub fn new(coefficients: Coefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Estimate from a raw ETo value.
    pub fn estimate_with_eto(&self, profile: &TreeProfile, eto_mm: f64) -> IrrigationEstimate {
        let kc = self.coefficients.kc(profile.age_years);
        let soil_factor = self.coefficients.soil_factor(profile.soil.as_deref());
        let area = canopy_area_m2(profile.canopy_diameter_m);

        IrrigationEstimate {
            profile: profile.clone(),
            eto_mm,
            kc,
            soil_factor,
            canopy_area_m2: area,
            water_liters_per_day: eto_mm * kc * area * soil_factor,
        }
    }

    /// Estimate from a resolved ETo reading, whatever its source.
    pub fn estimate(&self, profile: &TreeProfile, reading: &EtoReading) -> IrrigationEstimate {
        self.estimate_with_eto(profile, reading.eto_mm())
    }
}
