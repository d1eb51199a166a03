//! Molar conductance of strong electrolytes.
//!
//! Λ(C, T) = (Λ0 - k·√C) · (1 + α·(T - T0))
//!
//! The square-root dependence is the empirical Kohlrausch law; the linear
//! temperature correction is a pedagogical approximation.

pub mod dilution;
pub mod standards;
pub mod temperature;

pub use dilution::{DilutionConfig, DilutionMeasurement, DilutionSequencer, DilutionState, DilutionStep};
pub use standards::{StandardSolutions, StandardsConfig};
pub use temperature::{TemperatureMeasurement, TemperatureSweep, TemperatureSweepConfig};

use crate::constants::{CONDUCTANCE_DISPLAY_DECIMALS, REFERENCE_TEMP_K, TEMP_COEFFICIENT_PER_K};
use crate::error::{LabError, Result};
use crate::math_utils::round_to;
use crate::salt::{SALT_PROFILES, Salt, SaltProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Conductance constants for one experiment track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConductanceModel {
    /// T0, the temperature at which the salt table applies
    pub reference_temperature_k: f64,
    /// α in K⁻¹
    pub temperature_coefficient: f64,
    pub salts: HashMap<Salt, SaltProfile>,
}

impl Default for ConductanceModel {
    fn default() -> Self {
        Self {
            reference_temperature_k: REFERENCE_TEMP_K,
            temperature_coefficient: TEMP_COEFFICIENT_PER_K,
            salts: (*SALT_PROFILES).clone(),
        }
    }
}

impl ConductanceModel {
    pub fn profile(&self, salt: Salt) -> Result<&SaltProfile> {
        self.salts
            .get(&salt)
            .ok_or_else(|| LabError::UnknownSalt(salt.to_string()))
    }

    /// Λ at the reference temperature.
    pub fn limiting_law(&self, salt: Salt, concentration: f64) -> Result<f64> {
        check_concentration(concentration)?;
        Ok(self.profile(salt)?.conductance_at(concentration))
    }

    /// Λ at `temperature_k`, full precision.
    pub fn conductance(&self, salt: Salt, concentration: f64, temperature_k: f64) -> Result<f64> {
        check_temperature(temperature_k)?;
        let at_reference = self.limiting_law(salt, concentration)?;
        Ok(at_reference * self.temperature_factor(temperature_k))
    }

    /// 1 + α·(T - T0)
    pub fn temperature_factor(&self, temperature_k: f64) -> f64 {
        1.0 + self.temperature_coefficient * (temperature_k - self.reference_temperature_k)
    }

    pub fn measure(&self, sample: &ElectrolyteSample) -> Result<ConductanceMeasurement> {
        let conductance = self.conductance(sample.salt, sample.concentration, sample.temperature_k)?;
        Ok(ConductanceMeasurement {
            salt: sample.salt,
            conductance,
            temperature_k: sample.temperature_k,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.reference_temperature_k.is_finite() && self.reference_temperature_k > 0.0) {
            return Err(LabError::InvalidConfig(format!(
                "reference temperature must be positive, got {}",
                self.reference_temperature_k
            )));
        }
        if !(self.temperature_coefficient.is_finite() && self.temperature_coefficient > 0.0) {
            return Err(LabError::InvalidConfig(format!(
                "temperature coefficient must be positive, got {}",
                self.temperature_coefficient
            )));
        }
        Ok(())
    }
}

fn check_concentration(concentration: f64) -> Result<()> {
    if concentration.is_finite() && concentration >= 0.0 {
        Ok(())
    } else {
        Err(LabError::domain("concentration", "a finite non-negative number", concentration))
    }
}

fn check_temperature(temperature_k: f64) -> Result<()> {
    if temperature_k.is_finite() && temperature_k > 0.0 {
        Ok(())
    } else {
        Err(LabError::domain("temperature", "a positive absolute temperature", temperature_k))
    }
}

/// A solution placed in the conductometer cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteSample {
    pub salt: Salt,
    /// mol/L
    pub concentration: f64,
    pub temperature_k: f64,
}

impl ElectrolyteSample {
    pub fn new(salt: Salt, concentration: f64, temperature_k: f64) -> Result<Self> {
        check_concentration(concentration)?;
        check_temperature(temperature_k)?;
        Ok(Self {
            salt,
            concentration,
            temperature_k,
        })
    }
}

/// One row of the standard-solutions table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductanceMeasurement {
    pub salt: Salt,
    /// Λ in S·cm²·mol⁻¹
    pub conductance: f64,
    pub temperature_k: f64,
}

impl fmt::Display for ConductanceMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Λ = {} S·cm²·mol⁻¹ at {}K",
            self.salt,
            round_to(self.conductance, CONDUCTANCE_DISPLAY_DECIMALS),
            self.temperature_k
        )
    }
}
