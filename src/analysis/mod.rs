mod estimator;
mod history;

pub use estimator::{
    canopy_area_m2, crop_coefficient, estimate_water_liters, soil_factor, Estimator,
};
pub use history::HistorySummary;
