use serde::{Deserialize, Serialize};

/// Smallest canopy diameter accepted from user input, in meters.
pub const MIN_CANOPY_DIAMETER_M: f64 = 0.2;
/// Largest canopy diameter accepted from user input, in meters.
pub const MAX_CANOPY_DIAMETER_M: f64 = 12.0;

/// Soil texture classes with a tabulated factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Sandy,
    SandyLoam,
    Loam,
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilType::Sandy => write!(f, "Αμμώδες"),
            SoilType::SandyLoam => write!(f, "Αμμοπηλώδες"),
            SoilType::Loam => write!(f, "Πηλώδες"),
        }
    }
}

impl std::str::FromStr for SoilType {
    type Err = crate::error::IrrigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "αμμώδες" | "sandy" | "sand" => Ok(SoilType::Sandy),
            "αμμοπηλώδες" | "sandy-loam" | "sandy_loam" | "sandy loam" => Ok(SoilType::SandyLoam),
            "πηλώδες" | "loam" | "loamy" | "clay" => Ok(SoilType::Loam),
            _ => Err(crate::error::IrrigationError::ParseError(format!(
                "Unknown soil type: '{s}'"
            ))),
        }
    }
}

impl SoilType {
    /// English label for table output.
    pub fn english_name(&self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::SandyLoam => "sandy loam",
            SoilType::Loam => "loam",
        }
    }
}

/// The tree being irrigated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeProfile {
    /// Tree age in years
    pub age_years: u32,
    /// Horizontal canopy extent in meters
    pub canopy_diameter_m: f64,
    /// Soil name; unknown names are allowed and get a neutral factor
    pub soil: Option<String>,
}

impl TreeProfile {
    pub fn new(age_years: u32, canopy_diameter_m: f64, soil: Option<String>) -> Self {
        Self {
            age_years,
            canopy_diameter_m,
            soil,
        }
    }

    /// Check the bounds enforced on user input.
    ///
    /// The estimator itself accepts any diameter; this only guards the CLI and web entry points.
    pub fn validate(&self) -> Result<(), crate::error::IrrigationError> {
        if self.age_years == 0 {
            return Err(crate::error::IrrigationError::ValidationError(
                "age must be at least 1 year".to_string(),
            ));
        }
        let d = self.canopy_diameter_m;
        if !d.is_finite() || !(MIN_CANOPY_DIAMETER_M..=MAX_CANOPY_DIAMETER_M).contains(&d) {
            return Err(crate::error::IrrigationError::ValidationError(format!(
                "canopy diameter must be in {MIN_CANOPY_DIAMETER_M}..={MAX_CANOPY_DIAMETER_M} m, got {d}"
            )));
        }
        Ok(())
    }

    /// Soil name as written in the log, empty when unspecified.
    pub fn soil_label(&self) -> &str {
        self.soil.as_deref().unwrap_or("")
    }
}
