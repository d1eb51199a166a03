// Conductance laboratory (pedagogical values, not laboratory-accurate)
pub const REFERENCE_TEMP_K: f64 = 298.0;
pub const TEMP_COEFFICIENT_PER_K: f64 = 0.015; // α, fractional rise in Λ per kelvin
pub const STANDARD_CONCENTRATION_MOL_L: f64 = 0.1;

// Limiting molar conductance Λ0 (S·cm²·mol⁻¹) and Kohlrausch slope k per salt
pub const HCL_LIMITING_CONDUCTANCE: f64 = 426.1;
pub const NACL_LIMITING_CONDUCTANCE: f64 = 145.0;
pub const KCL_LIMITING_CONDUCTANCE: f64 = 150.0;
pub const HCL_KOHLRAUSCH_SLOPE: f64 = 200.0;
pub const NACL_KOHLRAUSCH_SLOPE: f64 = 120.0;
pub const KCL_KOHLRAUSCH_SLOPE: f64 = 140.0;

// Serial dilution: 20 mL of 0.1 M, +4 mL of water per step, stop at 40 mL
pub const DILUTION_INITIAL_CONCENTRATION_MOL_L: f64 = 0.1;
pub const DILUTION_INITIAL_VOLUME_ML: f64 = 20.0;
pub const DILUTION_STEP_ML: f64 = 4.0;
pub const DILUTION_MAX_VOLUME_ML: f64 = 40.0;
pub const ML_PER_L: f64 = 1000.0;

// Temperature sweep (hot plate range)
pub const TEMPERATURE_SWEEP_MIN_K: f64 = 298.0;
pub const TEMPERATURE_SWEEP_MAX_K: f64 = 338.0;

// Daniell cell: Zn | Zn²⁺ || Cu²⁺ | Cu
pub const DANIELL_STANDARD_POTENTIAL_V: f64 = 1.10;
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.314;
pub const FARADAY_C_PER_MOL: f64 = 96485.0;
pub const DANIELL_ELECTRONS: u32 = 2;
pub const CELL_TEMP_K: f64 = 298.0;
pub const ANODE_CONCENTRATION_MOL_L: f64 = 0.1; // [Zn²⁺]

// Range the hidden CuSO₄ sample concentration is drawn from
pub const SAMPLE_MIN_MOL_L: f64 = 0.001;
pub const SAMPLE_MAX_MOL_L: f64 = 0.1;

pub const CONDUCTANCE_DISPLAY_DECIMALS: u32 = 2;
pub const CONCENTRATION_DISPLAY_DECIMALS: u32 = 4;
pub const EMF_DISPLAY_DECIMALS: u32 = 4;

/// Calibration slopes smaller than this are treated as a degenerate line.
pub const SINGULAR_SLOPE_EPSILON: f64 = 1e-12;
pub const MIN_CALIBRATION_STANDARDS: usize = 2;
