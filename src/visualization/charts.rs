use colored::Colorize;

use crate::io::LogRecord;

/// Format a text bar chart of logged water need per entry as a string.
pub fn format_water_chart(records: &[LogRecord]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Water Need per Entry".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if records.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_liters = records
        .iter()
        .map(|r| r.water_liters_per_tree)
        .fold(0.0f64, f64::max);

    let bar_width = 40;

    output.push_str(&format!(
        "  {:>10}  {:>3}  {:>8}  Liters/tree/day\n",
        "Date", "Age", "ETo"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(70)));

    for r in records {
        let bar_len = if max_liters > 0.0 && r.water_liters_per_tree > 0.0 {
            ((r.water_liters_per_tree / max_liters) * bar_width as f64).round() as usize
        } else {
            0
        };

        let bar = "\u{2588}".repeat(bar_len);
        let bar = if r.eto_source == "fallback" {
            bar.yellow()
        } else {
            bar.blue()
        };

        output.push_str(&format!(
            "  {:>10}  {:>3}  {:>8.2}  {} {:.1}\n",
            r.date.to_string(),
            r.age,
            r.eto_mm,
            bar,
            r.water_liters_per_tree
        ));
    }

    output.push('\n');
    output
}

/// Print a text bar chart of logged water need.
pub fn print_water_chart(records: &[LogRecord]) {
    print!("{}", format_water_chart(records));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, liters: f64, source: &str) -> LogRecord {
        LogRecord {
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            age: 5,
            soil: String::new(),
            canopy_diameter_m: 2.0,
            eto_mm: 5.5,
            eto_source: source.to_string(),
            kc: 0.75,
            soil_factor: 1.0,
            water_liters_per_tree: liters,
        }
    }

    #[test]
    fn test_format_chart_empty() {
        let output = format_water_chart(&[]);
        assert!(output.contains("No data available."));
        assert!(output.contains("Water Need per Entry"));
    }

    #[test]
    fn test_format_chart_with_data() {
        let output = format_water_chart(&[row(1, 10.0, "api"), row(2, 5.0, "fallback")]);
        assert!(output.contains("2024-07-01"));
        assert!(output.contains("2024-07-02"));
        assert!(output.contains("10.0"));
        assert!(output.contains("5.50"));
        assert!(output.contains(&"\u{2588}".repeat(20)));
    }

    #[test]
    fn test_format_chart_zero_values() {
        let output = format_water_chart(&[row(3, 0.0, "manual")]);
        assert!(output.contains("0.0"));
        assert!(!output.contains('\u{2588}'));
    }
}
