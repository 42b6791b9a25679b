mod charts;
mod tables;

pub use charts::{format_water_chart, print_water_chart};
pub use tables::{
    format_coefficients, print_coefficients,
    format_estimate, print_estimate,
    format_eto_reading, print_eto_reading,
    format_history, print_history,
};
