use crate::constants::{
    CELL_TEMP_K, DANIELL_ELECTRONS, DANIELL_STANDARD_POTENTIAL_V, FARADAY_C_PER_MOL,
    GAS_CONSTANT_J_PER_MOL_K,
};
use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};

/// E = E0 - (R·T)/(n·F) · ln(anode / cathode)
///
/// Both concentrations must be strictly positive; the logarithm is undefined otherwise.
pub fn nernst_emf(
    standard_potential_v: f64,
    gas_constant: f64,
    temperature_k: f64,
    electrons: u32,
    faraday: f64,
    anode_concentration: f64,
    cathode_concentration: f64,
) -> Result<f64> {
    check_positive("anode concentration", anode_concentration)?;
    check_positive("cathode concentration", cathode_concentration)?;
    let slope = (gas_constant * temperature_k) / (electrons as f64 * faraday);
    Ok(standard_potential_v - slope * (anode_concentration / cathode_concentration).ln())
}

fn check_positive(quantity: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LabError::domain(quantity, "strictly positive", value))
    }
}

/// Fixed constants of one galvanic cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NernstModel {
    /// E0 in volts
    pub standard_potential_v: f64,
    /// R in J·mol⁻¹·K⁻¹
    pub gas_constant: f64,
    pub temperature_k: f64,
    /// n, electrons transferred per reaction
    pub electrons: u32,
    /// F in C·mol⁻¹
    pub faraday: f64,
}

impl Default for NernstModel {
    /// Daniell cell at 25 °C
    fn default() -> Self {
        Self {
            standard_potential_v: DANIELL_STANDARD_POTENTIAL_V,
            gas_constant: GAS_CONSTANT_J_PER_MOL_K,
            temperature_k: CELL_TEMP_K,
            electrons: DANIELL_ELECTRONS,
            faraday: FARADAY_C_PER_MOL,
        }
    }
}

impl NernstModel {
    pub fn emf(&self, anode_concentration: f64, cathode_concentration: f64) -> Result<f64> {
        nernst_emf(
            self.standard_potential_v,
            self.gas_constant,
            self.temperature_k,
            self.electrons,
            self.faraday,
            anode_concentration,
            cathode_concentration,
        )
    }

    /// RT/nF in volts: the magnitude of the EMF change per unit of ln ratio
    pub fn nernst_slope(&self) -> f64 {
        (self.gas_constant * self.temperature_k) / (self.electrons as f64 * self.faraday)
    }

    pub fn validate(&self) -> Result<()> {
        if self.electrons == 0 {
            return Err(LabError::InvalidConfig("cell must transfer at least one electron".to_string()));
        }
        for (name, value) in [
            ("gas constant", self.gas_constant),
            ("cell temperature", self.temperature_k),
            ("Faraday constant", self.faraday),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LabError::InvalidConfig(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !self.standard_potential_v.is_finite() {
            return Err(LabError::InvalidConfig("standard potential must be finite".to_string()));
        }
        Ok(())
    }
}
