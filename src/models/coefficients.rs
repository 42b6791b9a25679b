use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::profile::SoilType;

/// Crop coefficient (Kc) used when the tree age has no tabulated value.
pub const DEFAULT_KC: f64 = 0.8;

/// Soil factor used for unknown or unspecified soil types.
pub const DEFAULT_SOIL_FACTOR: f64 = 1.0;

/// Tabulated crop coefficients by tree age in years.
pub const KC_BY_AGE: [(u32, f64); 5] = [(1, 0.55), (2, 0.60), (3, 0.65), (5, 0.75), (10, 0.90)];

/// Tabulated soil factors, keyed by the canonical soil name.
pub const SOIL_FACTORS: [(SoilType, f64); 3] = [
    (SoilType::Sandy, 1.2),
    (SoilType::SandyLoam, 1.0),
    (SoilType::Loam, 0.8),
];

/// Lookup tables for the irrigation formula.
///
/// Water (l/day) = `ETo * kc(age) * area(canopy) * soil_factor(soil)`
///
/// Both lookups fall back to a default instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    /// Kc used when the age is not in `kc_by_age`
    pub default_kc: f64,
    /// Factor used when the soil is unknown or absent
    pub default_soil_factor: f64,
    /// Kc keyed by tree age in years
    #[serde(with = "age_table")]
    pub kc_by_age: BTreeMap<u32, f64>,
    /// Soil factors keyed by Greek soil name or English alias
    pub soil_factors: BTreeMap<String, f64>,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            default_kc: DEFAULT_KC,
            default_soil_factor: DEFAULT_SOIL_FACTOR,
            kc_by_age: KC_BY_AGE.iter().copied().collect(),
            soil_factors: SOIL_FACTORS
                .iter()
                .map(|(soil, factor)| (soil.to_string(), *factor))
                .collect(),
        }
    }
}

impl Coefficients {
    /// Crop coefficient for the given age, or `default_kc` on a miss.
    pub fn kc(&self, age: u32) -> f64 {
        self.kc_by_age
            .get(&age)
            .copied()
            .unwrap_or(self.default_kc)
    }

    /// Soil factor for the given soil name, or `default_soil_factor` on a miss.
    ///
    /// An exact key wins. Otherwise a known soil matches its canonical key, then
    /// any key naming the same soil (so `sandy = 1.3` serves "Αμμώδες" too).
    pub fn soil_factor(&self, soil: Option<&str>) -> f64 {
        let Some(raw) = soil.map(str::trim) else {
            return self.default_soil_factor;
        };
        if let Some(factor) = self.soil_factors.get(raw) {
            return *factor;
        }
        let Ok(soil) = raw.parse::<SoilType>() else {
            return self.default_soil_factor;
        };
        self.soil_factors
            .get(&soil.to_string())
            .or_else(|| {
                self.soil_factors
                    .iter()
                    .find(|(key, _)| key.parse::<SoilType>().ok() == Some(soil))
                    .map(|(_, factor)| factor)
            })
            .copied()
            .unwrap_or(self.default_soil_factor)
    }

    /// Ages with a tabulated Kc, in ascending order.
    pub fn supported_ages(&self) -> Vec<u32> {
        self.kc_by_age.keys().copied().collect()
    }

    /// Check that every coefficient is finite and non-negative.
    pub fn validate(&self) -> Result<(), crate::error::IrrigationError> {
        let bad = |v: f64| !v.is_finite() || v < 0.0;
        if bad(self.default_kc) {
            return Err(crate::error::IrrigationError::ValidationError(format!(
                "default_kc must be non-negative, got {}",
                self.default_kc
            )));
        }
        if bad(self.default_soil_factor) {
            return Err(crate::error::IrrigationError::ValidationError(format!(
                "default_soil_factor must be non-negative, got {}",
                self.default_soil_factor
            )));
        }
        if let Some((age, kc)) = self.kc_by_age.iter().find(|(_, kc)| bad(**kc)) {
            return Err(crate::error::IrrigationError::ValidationError(format!(
                "Kc for age {age} must be non-negative, got {kc}"
            )));
        }
        if let Some((soil, factor)) = self.soil_factors.iter().find(|(_, f)| bad(**f)) {
            return Err(crate::error::IrrigationError::ValidationError(format!(
                "Soil factor for '{soil}' must be non-negative, got {factor}"
            )));
        }
        Ok(())
    }
}

/// TOML keys are always strings, so the age table goes through string keys.
///
/// Accepts either a table (`[coefficients.kc_by_age]` with `1 = 0.55`) or an
/// array of tables (`[[coefficients.kc_by_age]]` with `age` and `kc`).
mod age_table {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    struct AgeRow {
        age: u32,
        kc: f64,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeTable {
        Map(BTreeMap<String, f64>),
        Rows(Vec<AgeRow>),
    }

    pub fn serialize<S: Serializer>(
        table: &BTreeMap<u32, f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        table
            .iter()
            .map(|(age, kc)| (age.to_string(), *kc))
            .collect::<BTreeMap<String, f64>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<u32, f64>, D::Error> {
        match AgeTable::deserialize(deserializer)? {
            AgeTable::Map(map) => map
                .into_iter()
                .map(|(age, kc)| {
                    age.trim()
                        .parse::<u32>()
                        .map(|age| (age, kc))
                        .map_err(|_| D::Error::custom(format!("invalid tree age '{age}'")))
                })
                .collect(),
            AgeTable::Rows(rows) => Ok(rows.into_iter().map(|row| (row.age, row.kc)).collect()),
        }
    }
}
