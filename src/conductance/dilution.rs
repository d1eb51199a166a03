use super::ConductanceModel;
use crate::constants::{
    DILUTION_INITIAL_CONCENTRATION_MOL_L, DILUTION_INITIAL_VOLUME_ML, DILUTION_MAX_VOLUME_ML,
    DILUTION_STEP_ML, ML_PER_L,
};
use crate::error::{LabError, Result, Severity};
use crate::ledger::Ledger;
use crate::salt::Salt;
use serde::{Deserialize, Serialize};

/// Serial dilution setup: a fixed amount of solute, diluted in equal water additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DilutionConfig {
    pub conductance: ConductanceModel,
    pub salt: Salt,
    pub initial_concentration_mol_l: f64,
    pub initial_volume_ml: f64,
    pub step_ml: f64,
    pub max_volume_ml: f64,
}

impl Default for DilutionConfig {
    fn default() -> Self {
        Self {
            conductance: ConductanceModel::default(),
            salt: Salt::NaCl,
            initial_concentration_mol_l: DILUTION_INITIAL_CONCENTRATION_MOL_L,
            initial_volume_ml: DILUTION_INITIAL_VOLUME_ML,
            step_ml: DILUTION_STEP_ML,
            max_volume_ml: DILUTION_MAX_VOLUME_ML,
        }
    }
}

impl DilutionConfig {
    /// Solute amount in mol, fixed for the whole experiment
    pub fn initial_moles(&self) -> f64 {
        self.initial_concentration_mol_l * self.initial_volume_ml / ML_PER_L
    }

    pub fn validate(&self) -> Result<()> {
        self.conductance.validate()?;
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(LabError::InvalidConfig(format!("dilution {} must be positive, got {}", name, value)))
            }
        };
        positive("initial concentration", self.initial_concentration_mol_l)?;
        positive("initial volume", self.initial_volume_ml)?;
        positive("step", self.step_ml)?;
        positive("max volume", self.max_volume_ml)?;
        if self.max_volume_ml < self.initial_volume_ml {
            return Err(LabError::InvalidConfig(format!(
                "dilution max volume {} mL is below the initial volume {} mL",
                self.max_volume_ml, self.initial_volume_ml
            )));
        }
        Ok(())
    }
}

/// Volume in the beaker and the solute it holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DilutionState {
    pub current_volume_ml: f64,
    pub initial_moles: f64,
}

impl DilutionState {
    /// mol/L; moles are conserved so this only falls as volume grows
    pub fn concentration(&self) -> f64 {
        self.initial_moles / (self.current_volume_ml / ML_PER_L)
    }
}

/// Result of one "add water" action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DilutionStep {
    Added { volume_ml: f64 },
    /// The beaker is already at its maximum; nothing changed.
    BoundsExceeded { volume_ml: f64, max_volume_ml: f64 },
}

impl DilutionStep {
    pub fn severity(&self) -> Option<Severity> {
        match self {
            DilutionStep::Added { .. } => None,
            DilutionStep::BoundsExceeded { .. } => Some(Severity::Warning),
        }
    }

    pub fn is_bounds_exceeded(&self) -> bool {
        matches!(self, DilutionStep::BoundsExceeded { .. })
    }

    pub fn volume_ml(&self) -> f64 {
        match *self {
            DilutionStep::Added { volume_ml } | DilutionStep::BoundsExceeded { volume_ml, .. } => volume_ml,
        }
    }
}

/// One row of the dilution table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DilutionMeasurement {
    pub volume_ml: f64,
    pub concentration: f64,
    pub conductance: f64,
    pub temperature_k: f64,
}

/// Tracks one serial dilution: its volume trajectory and the measurements taken along it.
#[derive(Debug, Clone)]
pub struct DilutionSequencer {
    config: DilutionConfig,
    state: DilutionState,
    ledger: Ledger<DilutionMeasurement>,
}

impl DilutionSequencer {
    pub fn new(config: DilutionConfig) -> Self {
        let state = DilutionState {
            current_volume_ml: config.initial_volume_ml,
            initial_moles: config.initial_moles(),
        };
        Self {
            config,
            state,
            ledger: Ledger::new(),
        }
    }

    pub fn state(&self) -> DilutionState {
        self.state
    }

    pub fn config(&self) -> &DilutionConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger<DilutionMeasurement> {
        &self.ledger
    }

    pub fn at_max_volume(&self) -> bool {
        self.state.current_volume_ml >= self.config.max_volume_ml
    }

    /// Add one step of diluent. The last step is clamped so the volume never
    /// passes the maximum; at the maximum this is a no-op reporting `BoundsExceeded`.
    pub fn add_diluent(&mut self) -> DilutionStep {
        if self.at_max_volume() {
            return DilutionStep::BoundsExceeded {
                volume_ml: self.state.current_volume_ml,
                max_volume_ml: self.config.max_volume_ml,
            };
        }

        let next = (self.state.current_volume_ml + self.config.step_ml).min(self.config.max_volume_ml);
        self.state.current_volume_ml = next;
        DilutionStep::Added { volume_ml: next }
    }

    /// Measure the current solution at the reference temperature and record it.
    pub fn measure(&mut self) -> Result<DilutionMeasurement> {
        let model = &self.config.conductance;
        let concentration = self.state.concentration();
        let temperature_k = model.reference_temperature_k;
        let conductance = model.conductance(self.config.salt, concentration, temperature_k)?;

        let measurement = DilutionMeasurement {
            volume_ml: self.state.current_volume_ml,
            concentration,
            conductance,
            temperature_k,
        };
        Ok(*self.ledger.push(measurement))
    }

    /// Clear the table and pour a fresh starting solution.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.state = DilutionState {
            current_volume_ml: self.config.initial_volume_ml,
            initial_moles: self.config.initial_moles(),
        };
    }
}

impl Default for DilutionSequencer {
    fn default() -> Self {
        Self::new(DilutionConfig::default())
    }
}
