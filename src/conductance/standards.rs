use super::{ConductanceMeasurement, ConductanceModel, ElectrolyteSample};
use crate::constants::STANDARD_CONCENTRATION_MOL_L;
use crate::error::{LabError, Result};
use crate::ledger::Ledger;
use crate::salt::Salt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardsConfig {
    pub conductance: ConductanceModel,
    pub concentration_mol_l: f64,
}

impl Default for StandardsConfig {
    fn default() -> Self {
        Self {
            conductance: ConductanceModel::default(),
            concentration_mol_l: STANDARD_CONCENTRATION_MOL_L,
        }
    }
}

impl StandardsConfig {
    pub fn validate(&self) -> Result<()> {
        self.conductance.validate()?;
        if !(self.concentration_mol_l.is_finite() && self.concentration_mol_l > 0.0) {
            return Err(LabError::InvalidConfig(format!(
                "standard concentration must be positive, got {}",
                self.concentration_mol_l
            )));
        }
        Ok(())
    }
}

/// Bench of equal-strength solutions of each salt, measured at the reference temperature.
#[derive(Debug, Clone, Default)]
pub struct StandardSolutions {
    config: StandardsConfig,
    ledger: Ledger<ConductanceMeasurement>,
}

impl StandardSolutions {
    pub fn new(config: StandardsConfig) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger<ConductanceMeasurement> {
        &self.ledger
    }

    /// Measure the standard solution of `salt` and append it. Repeats are kept.
    pub fn measure(&mut self, salt: Salt) -> Result<ConductanceMeasurement> {
        let model = &self.config.conductance;
        let sample = ElectrolyteSample::new(salt, self.config.concentration_mol_l, model.reference_temperature_k)?;
        let measurement = model.measure(&sample)?;
        Ok(*self.ledger.push(measurement))
    }

    /// Salt with the largest measured conductance; the first one wins a tie.
    pub fn highest_conducting(&self) -> Option<Salt> {
        self.ledger
            .iter()
            .fold(None::<&ConductanceMeasurement>, |best, m| match best {
                Some(b) if b.conductance >= m.conductance => Some(b),
                _ => Some(m),
            })
            .map(|m| m.salt)
    }

    pub fn reset(&mut self) {
        self.ledger.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_measure_appends_every_repeat() {
        let mut bench = StandardSolutions::default();
        bench.measure(Salt::NaCl).unwrap();
        bench.measure(Salt::NaCl).unwrap();
        let kcl = bench.measure(Salt::KCl).unwrap();

        assert_eq!(bench.ledger().len(), 3);
        assert_eq!(kcl.temperature_k, 298.0);
        assert_abs_diff_eq!(kcl.conductance, 105.728, epsilon = 1e-3);
    }

    #[test]
    fn test_highest_conducting_is_hcl() {
        let mut bench = StandardSolutions::default();
        assert_eq!(bench.highest_conducting(), None);
        for salt in [Salt::KCl, Salt::HCl, Salt::NaCl] {
            bench.measure(salt).unwrap();
        }
        assert_eq!(bench.highest_conducting(), Some(Salt::HCl));
    }

    #[test]
    fn test_reset_clears_table() {
        let mut bench = StandardSolutions::default();
        bench.measure(Salt::HCl).unwrap();
        bench.reset();
        assert!(bench.ledger().is_empty());
    }
}
