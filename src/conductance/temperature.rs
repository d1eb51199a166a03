use super::ConductanceModel;
use crate::constants::{STANDARD_CONCENTRATION_MOL_L, TEMPERATURE_SWEEP_MAX_K, TEMPERATURE_SWEEP_MIN_K};
use crate::error::{LabError, Result};
use crate::ledger::Ledger;
use crate::salt::Salt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSweepConfig {
    pub conductance: ConductanceModel,
    pub salt: Salt,
    pub concentration_mol_l: f64,
    pub min_k: f64,
    pub max_k: f64,
}

impl Default for TemperatureSweepConfig {
    fn default() -> Self {
        Self {
            conductance: ConductanceModel::default(),
            salt: Salt::KCl,
            concentration_mol_l: STANDARD_CONCENTRATION_MOL_L,
            min_k: TEMPERATURE_SWEEP_MIN_K,
            max_k: TEMPERATURE_SWEEP_MAX_K,
        }
    }
}

impl TemperatureSweepConfig {
    pub fn validate(&self) -> Result<()> {
        self.conductance.validate()?;
        if !(self.concentration_mol_l.is_finite() && self.concentration_mol_l >= 0.0) {
            return Err(LabError::InvalidConfig(format!(
                "sweep concentration must be non-negative, got {}",
                self.concentration_mol_l
            )));
        }
        if !(self.min_k > 0.0 && self.min_k < self.max_k && self.max_k.is_finite()) {
            return Err(LabError::InvalidConfig(format!(
                "temperature range [{}, {}] K is empty or not absolute",
                self.min_k, self.max_k
            )));
        }
        Ok(())
    }

    pub fn contains(&self, temperature_k: f64) -> bool {
        temperature_k >= self.min_k && temperature_k <= self.max_k
    }
}

/// One row of the temperature table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureMeasurement {
    pub temperature_k: f64,
    pub conductance: f64,
}

/// Heats one fixed solution through a bounded range of temperatures.
#[derive(Debug, Clone, Default)]
pub struct TemperatureSweep {
    config: TemperatureSweepConfig,
    ledger: Ledger<TemperatureMeasurement>,
}

impl TemperatureSweep {
    pub fn new(config: TemperatureSweepConfig) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
        }
    }

    pub fn config(&self) -> &TemperatureSweepConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger<TemperatureMeasurement> {
        &self.ledger
    }

    /// Out-of-range temperatures are rejected, never clamped.
    pub fn measure(&mut self, temperature_k: f64) -> Result<TemperatureMeasurement> {
        if !self.config.contains(temperature_k) {
            return Err(LabError::domain(
                "temperature",
                "inside the hot plate range",
                temperature_k,
            ));
        }

        let conductance = self.config.conductance.conductance(
            self.config.salt,
            self.config.concentration_mol_l,
            temperature_k,
        )?;
        Ok(*self.ledger.push(TemperatureMeasurement {
            temperature_k,
            conductance,
        }))
    }

    pub fn reset(&mut self) {
        self.ledger.clear();
    }
}
