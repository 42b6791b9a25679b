use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::HistorySummary;
use crate::io::LogRecord;
use crate::models::{Coefficients, EtoReading, IrrigationEstimate, SoilType, SOIL_FACTORS};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format the ETo reading as a string, with a warning line for fallbacks.
pub fn format_eto_reading(reading: &EtoReading) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Reference Evapotranspiration".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Field", "Value", "Unit"]);
    table.add_row(vec![
        Cell::new("Date"),
        Cell::new(reading.sample.date.to_string()),
        Cell::new(""),
    ]);
    if let Some(coord) = reading.sample.coordinate {
        table.add_row(vec![
            Cell::new("Location"),
            Cell::new(coord.to_string()),
            Cell::new("lat, lon"),
        ]);
    }
    table.add_row(vec![
        Cell::new("ETo"),
        Cell::new(format!("{:.2}", reading.sample.eto_mm)),
        Cell::new("mm/day"),
    ]);
    if let Some(t) = reading.sample.max_temp_c {
        table.add_row(vec![
            Cell::new("Max Temperature"),
            Cell::new(format!("{t:.1}")),
            Cell::new("°C"),
        ]);
    }
    if let Some(p) = reading.sample.precipitation_mm {
        table.add_row(vec![
            Cell::new("Precipitation"),
            Cell::new(format!("{p:.1}")),
            Cell::new("mm"),
        ]);
    }
    table.add_row(vec![
        Cell::new("Source"),
        Cell::new(reading.source.to_string()),
        Cell::new(""),
    ]);

    output.push_str(&format!("{table}\n"));
    if let Some(warning) = reading.warning() {
        output.push_str(&format!("{}: {warning}\n", "Warning".yellow()));
    }
    output
}

pub fn print_eto_reading(reading: &EtoReading) {
    print!("{}", format_eto_reading(reading));
}

/// Format an irrigation estimate as a string.
pub fn format_estimate(estimate: &IrrigationEstimate) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Daily Water Need".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let soil = match estimate.profile.soil.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    };

    let mut table = new_table();
    table.set_header(vec!["Input / Result", "Value", "Unit"]);
    table.add_row(vec![
        Cell::new("Tree Age"),
        Cell::new(estimate.profile.age_years.to_string()),
        Cell::new("years"),
    ]);
    table.add_row(vec![
        Cell::new("Canopy Diameter"),
        Cell::new(format!("{:.2}", estimate.profile.canopy_diameter_m)),
        Cell::new("m"),
    ]);
    table.add_row(vec![
        Cell::new("Canopy Area"),
        Cell::new(format!("{:.3}", estimate.canopy_area_m2)),
        Cell::new("m²"),
    ]);
    table.add_row(vec![Cell::new("Soil"), Cell::new(soil), Cell::new("")]);
    table.add_row(vec![
        Cell::new("ETo"),
        Cell::new(format!("{:.2}", estimate.eto_mm)),
        Cell::new("mm/day"),
    ]);
    table.add_row(vec![
        Cell::new("Kc"),
        Cell::new(format!("{:.2}", estimate.kc)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Soil Factor"),
        Cell::new(format!("{:.2}", estimate.soil_factor)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(format!("{:.1}", estimate.water_liters_per_day)),
        Cell::new("liters/tree/day"),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(format!("{:.4}", estimate.water_m3_per_day())),
        Cell::new("m³/tree/day"),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

pub fn print_estimate(estimate: &IrrigationEstimate) {
    print!("{}", format_estimate(estimate));
}

/// Format the Kc and soil factor tables in effect.
pub fn format_coefficients(coefficients: &Coefficients) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Crop Coefficients (Kc)".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut kc_table = new_table();
    kc_table.set_header(vec!["Age (years)", "Kc"]);
    for age in coefficients.supported_ages() {
        kc_table.add_row(vec![
            Cell::new(age.to_string()),
            Cell::new(format!("{:.2}", coefficients.kc(age))),
        ]);
    }
    kc_table.add_row(vec![
        Cell::new("other"),
        Cell::new(format!("{:.2}", coefficients.default_kc)),
    ]);
    output.push_str(&format!("{kc_table}\n"));

    output.push_str(&format!("\n{}\n", "Soil Factors".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut soil_table = new_table();
    soil_table.set_header(vec!["Soil", "Texture", "Factor"]);
    for (name, factor) in &coefficients.soil_factors {
        let texture = name
            .parse::<SoilType>()
            .map(|s| s.english_name())
            .unwrap_or("custom");
        soil_table.add_row(vec![
            Cell::new(name),
            Cell::new(texture),
            Cell::new(format!("{factor:.2}")),
        ]);
    }
    soil_table.add_row(vec![
        Cell::new("other"),
        Cell::new(""),
        Cell::new(format!("{:.2}", coefficients.default_soil_factor)),
    ]);
    output.push_str(&format!("{soil_table}\n"));

    let builtin: Vec<String> = SOIL_FACTORS
        .iter()
        .map(|(s, _)| format!("{} = {}", s.english_name(), s))
        .collect();
    output.push_str(&format!("{}\n", format!("Aliases: {}", builtin.join(", ")).dimmed()));
    output
}

pub fn print_coefficients(coefficients: &Coefficients) {
    print!("{}", format_coefficients(coefficients));
}

/// Format the log rows and their summary.
pub fn format_history(records: &[LogRecord], summary: Option<&HistorySummary>) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Irrigation Log".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    if records.is_empty() {
        output.push_str("  No entries logged.\n");
        return output;
    }

    let mut table = new_table();
    table.set_header(vec![
        "Date", "Age", "Soil", "Canopy (m)", "ETo (mm)", "Source", "Kc", "Soil F.", "Liters/tree",
    ]);
    for r in records {
        table.add_row(vec![
            Cell::new(r.date.to_string()),
            Cell::new(r.age.to_string()),
            Cell::new(if r.soil.is_empty() { "-" } else { r.soil.as_str() }),
            Cell::new(format!("{:.2}", r.canopy_diameter_m)),
            Cell::new(format!("{:.2}", r.eto_mm)),
            Cell::new(&r.eto_source),
            Cell::new(format!("{:.2}", r.kc)),
            Cell::new(format!("{:.2}", r.soil_factor)),
            Cell::new(format!("{:.1}", r.water_liters_per_tree)),
        ]);
    }
    output.push_str(&format!("{table}\n"));

    if let Some(s) = summary {
        output.push_str(&format!(
            "{}\n",
            format!(
                "Entries: {} | Mean: {:.1} l | Median: {:.1} l | Std Dev: {} | Range: {:.1}-{:.1} l | Mean ETo: {:.2} mm | Fallback ETo: {}",
                s.entries,
                s.mean_liters,
                s.median_liters,
                s.std_dev_liters
                    .map(|sd| format!("{sd:.2} l"))
                    .unwrap_or_else(|| "n/a".to_string()),
                s.min_liters,
                s.max_liters,
                s.mean_eto_mm,
                s.fallback_entries,
            )
            .dimmed()
        ));
    }
    output
}

pub fn print_history(records: &[LogRecord], summary: Option<&HistorySummary>) {
    print!("{}", format_history(records, summary));
}
