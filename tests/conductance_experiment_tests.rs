// Conductance experiment tests
// Checks the square-root law, serial dilution and the temperature sweep through a lab session

use approx::assert_abs_diff_eq;
use electro_lab_sim::conductance::{ConductanceModel, DilutionStep};
use electro_lab_sim::constants::{REFERENCE_TEMP_K, TEMP_COEFFICIENT_PER_K};
use electro_lab_sim::electrochem::FixedSample;
use electro_lab_sim::math_utils::round_to;
use electro_lab_sim::salt::get_profile;
use electro_lab_sim::{LabConfig, LabError, LabSession, LabTable, Salt, Severity};
use more_asserts::{assert_gt, assert_le};

fn create_test_session() -> LabSession {
    LabSession::with_sample_source(LabConfig::default(), Box::new(FixedSample::constant(0.05)))
        .expect("default config is valid")
}

#[test]
fn test_limiting_law_at_reference_temperature() {
    println!("🧪 Testing Λ(C) = Λ0 - k·√C for every salt");

    let model = ConductanceModel::default();
    for salt in Salt::ALL {
        let profile = get_profile(salt).unwrap();
        for &c in &[0.0, 0.001, 0.01, 0.05, 0.1, 0.5] {
            let expected = profile.limiting_conductance - profile.kohlrausch_slope * f64::sqrt(c);
            let actual = model.conductance(salt, c, REFERENCE_TEMP_K).unwrap();
            assert_abs_diff_eq!(actual, expected, epsilon = 1e-10);
        }
        println!("   ✅ {} matches at T0", salt);
    }
}

#[test]
fn test_conductance_strictly_decreases_with_concentration() {
    println!("📉 Testing conductance falls as concentration rises");

    let model = ConductanceModel::default();
    for salt in Salt::ALL {
        let mut previous = model.conductance(salt, 0.0, REFERENCE_TEMP_K).unwrap();
        for step in 1..=50 {
            let current = model.conductance(salt, step as f64 * 0.004, REFERENCE_TEMP_K).unwrap();
            assert_gt!(previous, current, "{} must decrease at step {}", salt, step);
            previous = current;
        }
    }
}

#[test]
fn test_negative_concentration_is_domain_error() {
    let model = ConductanceModel::default();
    let result = model.conductance(Salt::KCl, -0.01, REFERENCE_TEMP_K);
    assert!(matches!(result, Err(LabError::Domain { .. })));
}

#[test]
fn test_unknown_salt_is_rejected_when_parsed() {
    let result: Result<Salt, _> = "LiCl".parse();
    assert!(matches!(result, Err(LabError::UnknownSalt(ref s)) if s == "LiCl"));
}

#[test]
fn test_standard_bench_ranks_hcl_highest() {
    println!("🏆 Testing the 0.1 M bench");

    let mut lab = create_test_session();
    for salt in [Salt::KCl, Salt::NaCl, Salt::HCl] {
        let m = lab.measure_standard_conductance(salt).unwrap();
        println!("   {}", m);
    }
    assert_eq!(lab.standards_records().len(), 3);
    assert_eq!(lab.highest_conducting_salt(), Some(Salt::HCl));

    // Repeats are appended, not merged
    lab.measure_standard_conductance(Salt::KCl).unwrap();
    assert_eq!(lab.standards_records().len(), 4);
}

#[test]
fn test_serial_dilution_sequence() {
    println!("💧 Testing serial dilution 20 mL → 40 mL");

    let mut lab = create_test_session();
    let expected = [0.1000, 0.0833, 0.0714, 0.0625, 0.0556, 0.0500];

    lab.measure_dilution().unwrap();
    for _ in 0..20 {
        let step = lab.add_diluent();
        assert_le!(lab.dilution_state().current_volume_ml, 40.0);
        if step.is_bounds_exceeded() {
            assert_eq!(step.severity(), Some(Severity::Warning));
            continue;
        }
        lab.measure_dilution().unwrap();
    }

    let records = lab.dilution_records();
    assert_eq!(records.len(), expected.len());
    for (record, &concentration) in records.iter().zip(&expected) {
        let state_concentration = 0.002 / (record.volume_ml / 1000.0);
        assert_abs_diff_eq!(record.concentration, state_concentration, epsilon = 1e-12);
        assert_eq!(round_to(record.concentration, 4), concentration);
        println!("   {} mL → {:.4} M, Λ = {:.2}", record.volume_ml, record.concentration, record.conductance);
    }
    assert_eq!(lab.report().conductance_rises_on_dilution, Some(true));
}

#[test]
fn test_bounds_exceeded_leaves_ledger_and_state() {
    let mut lab = create_test_session();
    while let DilutionStep::Added { .. } = lab.add_diluent() {}
    lab.measure_dilution().unwrap();

    let state = lab.dilution_state();
    let step = lab.add_diluent();
    assert_eq!(step, DilutionStep::BoundsExceeded { volume_ml: 40.0, max_volume_ml: 40.0 });
    assert_eq!(lab.dilution_state(), state);
    assert_eq!(lab.dilution_records().len(), 1);
}

#[test]
fn test_temperature_correction_ratio() {
    println!("🔥 Testing Λ(T)/Λ(T0) = 1 + α(T - T0) for 0.1 M KCl");

    let mut lab = create_test_session();
    let baseline = lab.measure_temperature(298.0).unwrap().conductance;
    for t in [303.0, 310.5, 320.0, 333.3, 338.0] {
        let m = lab.measure_temperature(t).unwrap();
        let ratio = m.conductance / baseline;
        assert_abs_diff_eq!(ratio, 1.0 + TEMP_COEFFICIENT_PER_K * (t - REFERENCE_TEMP_K), epsilon = 1e-12);
    }
    assert_eq!(lab.temperature_records().len(), 6);
    assert_eq!(lab.report().conductance_rises_with_temperature, Some(true));
}

#[test]
fn test_temperature_outside_sweep_is_rejected() {
    let mut lab = create_test_session();
    for t in [297.9, 338.1, f64::NAN] {
        assert!(matches!(lab.measure_temperature(t), Err(LabError::Domain { .. })));
    }
    assert!(lab.temperature_records().is_empty());
    // Still usable after a failure
    assert!(lab.measure_temperature(338.0).is_ok());
}

#[test]
fn test_reset_each_conductance_table() {
    let mut lab = create_test_session();
    lab.measure_standard_conductance(Salt::NaCl).unwrap();
    lab.add_diluent();
    lab.measure_dilution().unwrap();
    lab.measure_temperature(320.0).unwrap();

    lab.reset_table(LabTable::Dilution);
    assert!(lab.dilution_records().is_empty());
    assert_eq!(lab.dilution_state().current_volume_ml, 20.0);
    assert_abs_diff_eq!(lab.dilution_state().concentration(), 0.1, epsilon = 1e-12);

    lab.reset_table(LabTable::Temperature);
    lab.reset_table(LabTable::Standards);
    assert!(lab.temperature_records().is_empty());
    assert!(lab.standards_records().is_empty());
    assert_eq!(lab.highest_conducting_salt(), None);
}

#[test]
fn test_independent_constant_tables() {
    println!("🔧 Testing per-track constants");

    let json = r#"{ "temperature": { "conductance": { "temperature_coefficient": 0.02 } } }"#;
    let config = LabConfig::from_json_str(json).unwrap();
    let mut lab = LabSession::with_sample_source(config, Box::new(FixedSample::constant(0.05))).unwrap();

    let base = lab.measure_temperature(298.0).unwrap().conductance;
    let hot = lab.measure_temperature(308.0).unwrap().conductance;
    assert_abs_diff_eq!(hot / base, 1.2, epsilon = 1e-12);

    let m = lab.measure_dilution().unwrap();
    assert_eq!(m.temperature_k, 298.0);
}
