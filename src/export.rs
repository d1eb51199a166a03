use crate::conductance::{ConductanceMeasurement, DilutionMeasurement, TemperatureMeasurement};
use crate::constants::{CONCENTRATION_DISPLAY_DECIMALS, CONDUCTANCE_DISPLAY_DECIMALS, EMF_DISPLAY_DECIMALS};
use crate::electrochem::ElectrochemRow;
use std::fmt::Write;

const CONDUCTANCE_COLUMN: &str = "Conductance Λ (S·cm²·mol⁻¹)";
const TEMPERATURE_COLUMN: &str = "Temperature (K)";
const CONCENTRATION_COLUMN: &str = "Concentration (M)";

/// A ledger record that can be written as one CSV row.
///
/// Columns are in a fixed order matching the record's fields:
/// - standards: salt, conductance, temperature
/// - dilution: volume, concentration, conductance, temperature
/// - temperature sweep: temperature, conductance
/// - electrochemistry: label, concentration, ratio, ln ratio, EMF
pub trait CsvRecord {
    fn header() -> &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

/// Header row plus one row per record. Pure formatting; no engine state involved.
pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    let mut out = String::new();
    push_row(&mut out, R::header().iter().map(|h| h.to_string()));
    for record in records {
        push_row(&mut out, record.fields().into_iter());
    }
    out
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let row: Vec<String> = fields.map(|f| quote(&f)).collect();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", row.join(","));
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn fixed(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, value)
}

fn optional(value: Option<f64>, decimals: u32) -> String {
    value.map(|v| fixed(v, decimals)).unwrap_or_default()
}

impl CsvRecord for ConductanceMeasurement {
    fn header() -> &'static [&'static str] {
        &["Salt", CONDUCTANCE_COLUMN, TEMPERATURE_COLUMN]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.salt.to_string(),
            fixed(self.conductance, CONDUCTANCE_DISPLAY_DECIMALS),
            self.temperature_k.to_string(),
        ]
    }
}

impl CsvRecord for DilutionMeasurement {
    fn header() -> &'static [&'static str] {
        &["Volume (mL)", CONCENTRATION_COLUMN, CONDUCTANCE_COLUMN, TEMPERATURE_COLUMN]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.volume_ml.to_string(),
            fixed(self.concentration, CONCENTRATION_DISPLAY_DECIMALS),
            fixed(self.conductance, CONDUCTANCE_DISPLAY_DECIMALS),
            self.temperature_k.to_string(),
        ]
    }
}

impl CsvRecord for TemperatureMeasurement {
    fn header() -> &'static [&'static str] {
        &[TEMPERATURE_COLUMN, CONDUCTANCE_COLUMN]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.temperature_k.to_string(),
            fixed(self.conductance, CONDUCTANCE_DISPLAY_DECIMALS),
        ]
    }
}

impl CsvRecord for ElectrochemRow {
    fn header() -> &'static [&'static str] {
        &["Label", CONCENTRATION_COLUMN, "[Zn²⁺]/[Cu²⁺]", "ln([Zn²⁺]/[Cu²⁺])", "EMF (V)"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.label.to_string(),
            optional(self.concentration, CONCENTRATION_DISPLAY_DECIMALS),
            optional(self.ratio, CONCENTRATION_DISPLAY_DECIMALS),
            optional(self.ln_ratio, CONCENTRATION_DISPLAY_DECIMALS),
            fixed(self.emf, EMF_DISPLAY_DECIMALS),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::electrochem::{PointLabel, StandardSolution};
    use crate::salt::Salt;

    #[test]
    fn test_standards_table() {
        let records = vec![
            ConductanceMeasurement { salt: Salt::HCl, conductance: 362.854447, temperature_k: 298.0 },
            ConductanceMeasurement { salt: Salt::KCl, conductance: 105.728113, temperature_k: 298.0 },
        ];
        let csv = to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Salt,Conductance Λ (S·cm²·mol⁻¹),Temperature (K)");
        assert_eq!(lines[1], "HCl,362.85,298");
        assert_eq!(lines[2], "KCl,105.73,298");
    }

    #[test]
    fn test_dilution_row_precision() {
        let row = DilutionMeasurement {
            volume_ml: 24.0,
            concentration: 0.0833333333,
            conductance: 110.35898,
            temperature_k: 298.0,
        };
        assert_eq!(row.fields(), vec!["24", "0.0833", "110.36", "298"]);
    }

    #[test]
    fn test_empty_ledger_is_header_only() {
        let csv = to_csv::<TemperatureMeasurement>(&[]);
        assert_eq!(csv, "Temperature (K),Conductance Λ (S·cm²·mol⁻¹)\n");
    }

    #[test]
    fn test_sample_row_has_blank_ratio_fields() {
        let rows = vec![
            ElectrochemRow {
                label: PointLabel::Standard(StandardSolution::Hundredth),
                concentration: Some(0.01),
                ratio: Some(10.0),
                ln_ratio: Some(10f64.ln()),
                emf: 1.0704,
            },
            ElectrochemRow { label: PointLabel::Sample, concentration: None, ratio: None, ln_ratio: None, emf: 1.08 },
        ];
        let csv = to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[1], "0.01 M,0.0100,10.0000,2.3026,1.0704");
        assert_eq!(lines[2], "Sample,,,,1.0800");
    }

    #[test]
    fn test_quote_fields_with_separators() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
