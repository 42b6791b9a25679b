mod climate;
mod coefficients;
mod estimate;
mod profile;

pub use climate::{
    ClimateSample, Coordinate, EtoReading, EtoSource, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
};
pub use coefficients::{
    Coefficients, DEFAULT_KC, DEFAULT_SOIL_FACTOR, KC_BY_AGE, SOIL_FACTORS,
};
pub use estimate::IrrigationEstimate;
pub use profile::{SoilType, TreeProfile, MAX_CANOPY_DIAMETER_M, MIN_CANOPY_DIAMETER_M};
