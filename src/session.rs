//! One student's laboratory session.
//!
//! All mutable state lives here: the three conductance tables, the dilution
//! beaker, the electrochemistry readings and the hidden sample. Sessions share
//! nothing, so a host serving several users gives each its own `LabSession`.

use crate::conductance::{
    ConductanceMeasurement, DilutionMeasurement, DilutionSequencer, DilutionState, DilutionStep,
    StandardSolutions, TemperatureMeasurement, TemperatureSweep,
};
use crate::config::LabConfig;
use crate::electrochem::{
    CalibrationEngine, CalibrationResult, ElectrochemLedger, ElectrochemRow, RandomSample,
    SampleSource, StandardSolution,
};
use crate::error::Result;
use crate::export::to_csv;
use crate::math_utils::{LinearFit, least_squares};
use crate::report::LabReport;
use crate::salt::Salt;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// The four tables a session keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabTable {
    Standards,
    Dilution,
    Temperature,
    Electrochemistry,
}

impl fmt::Display for LabTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabTable::Standards => "standards",
            LabTable::Dilution => "dilution",
            LabTable::Temperature => "temperature",
            LabTable::Electrochemistry => "electrochemistry",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct LabSession {
    config: LabConfig,
    standards: StandardSolutions,
    dilution: DilutionSequencer,
    temperature: TemperatureSweep,
    electrochem: ElectrochemLedger,
    calibration: CalibrationEngine,
}

impl LabSession {
    /// New session whose hidden sample is drawn from OS entropy.
    pub fn new(config: LabConfig) -> Result<Self> {
        Self::with_sample_source(config, Box::new(RandomSample::from_os_rng()))
    }

    pub fn with_sample_source(config: LabConfig, source: Box<dyn SampleSource>) -> Result<Self> {
        config.validate()?;
        let calibration = CalibrationEngine::new(config.cell.anode_concentration_mol_l);
        Ok(Self {
            standards: StandardSolutions::new(config.standards.clone()),
            dilution: DilutionSequencer::new(config.dilution.clone()),
            temperature: TemperatureSweep::new(config.temperature.clone()),
            electrochem: ElectrochemLedger::new(config.cell.clone(), source),
            calibration,
            config,
        })
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    // --- conductance -------------------------------------------------------

    pub fn measure_standard_conductance(&mut self, salt: Salt) -> Result<ConductanceMeasurement> {
        let measurement = self.standards.measure(salt)?;
        debug!(salt = %salt, conductance = measurement.conductance, "standard solution measured");
        Ok(measurement)
    }

    pub fn add_diluent(&mut self) -> DilutionStep {
        let step = self.dilution.add_diluent();
        match step {
            DilutionStep::Added { volume_ml } => debug!(volume_ml, "diluent added"),
            DilutionStep::BoundsExceeded { volume_ml, max_volume_ml } => {
                warn!(volume_ml, max_volume_ml, "maximum dilution volume reached")
            }
        }
        step
    }

    pub fn measure_dilution(&mut self) -> Result<DilutionMeasurement> {
        let measurement = self.dilution.measure()?;
        debug!(
            volume_ml = measurement.volume_ml,
            concentration = measurement.concentration,
            conductance = measurement.conductance,
            "diluted solution measured"
        );
        Ok(measurement)
    }

    pub fn measure_temperature(&mut self, temperature_k: f64) -> Result<TemperatureMeasurement> {
        let measurement = self.temperature.measure(temperature_k)?;
        debug!(temperature_k, conductance = measurement.conductance, "heated solution measured");
        Ok(measurement)
    }

    /// Clear one table together with the state that depends on it.
    pub fn reset_table(&mut self, which: LabTable) {
        match which {
            LabTable::Standards => self.standards.reset(),
            LabTable::Dilution => self.dilution.reset(),
            LabTable::Temperature => self.temperature.reset(),
            LabTable::Electrochemistry => self.electrochem.clear(),
        }
        info!(table = %which, "table reset");
    }

    // --- electrochemistry --------------------------------------------------

    pub fn record_standard(&mut self, standard: StandardSolution) -> Result<ElectrochemRow> {
        let row = self.electrochem.record_standard(standard)?;
        debug!(label = %row.label, emf = row.emf, "standard EMF recorded");
        Ok(row)
    }

    /// Same as [`record_standard`](Self::record_standard), from a label such as "0.01 M".
    pub fn record_standard_label(&mut self, label: &str) -> Result<ElectrochemRow> {
        self.record_standard(label.parse()?)
    }

    pub fn record_sample(&mut self) -> Result<ElectrochemRow> {
        let row = self.electrochem.record_sample()?;
        debug!(emf = row.emf, "sample EMF recorded");
        Ok(row)
    }

    /// Empty the readings and swap in a new unknown sample.
    pub fn clear_electrochemistry(&mut self) {
        self.reset_table(LabTable::Electrochemistry);
    }

    pub fn infer_sample_concentration(&self) -> Result<CalibrationResult> {
        let result = self.calibrate()?;
        info!(
            estimate = result.estimated_concentration,
            slope = result.fit.slope,
            intercept = result.fit.intercept,
            standards = result.standards_used,
            "sample concentration inferred"
        );
        Ok(result)
    }

    /// Fit and estimate without logging; used by read-only summaries.
    pub(crate) fn calibrate(&self) -> Result<CalibrationResult> {
        self.calibration.fit_and_infer(self.electrochem.points())
    }

    pub fn reveal_sample_concentration(&self) -> f64 {
        self.electrochem.reveal_sample_concentration()
    }

    // --- queries -----------------------------------------------------------

    pub fn standards_records(&self) -> &[ConductanceMeasurement] {
        self.standards.ledger().records()
    }

    pub fn dilution_records(&self) -> &[DilutionMeasurement] {
        self.dilution.ledger().records()
    }

    pub fn temperature_records(&self) -> &[TemperatureMeasurement] {
        self.temperature.ledger().records()
    }

    pub fn electrochem_rows(&self) -> Vec<ElectrochemRow> {
        self.electrochem.rows()
    }

    pub fn dilution_state(&self) -> DilutionState {
        self.dilution.state()
    }

    pub fn highest_conducting_salt(&self) -> Option<Salt> {
        self.standards.highest_conducting()
    }

    /// Conductance against concentration over the dilution table.
    pub fn dilution_trend(&self) -> Option<LinearFit> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .dilution_records()
            .iter()
            .map(|m| (m.concentration, m.conductance))
            .unzip();
        least_squares(&xs, &ys)
    }

    /// Conductance against temperature over the sweep table.
    pub fn temperature_trend(&self) -> Option<LinearFit> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .temperature_records()
            .iter()
            .map(|m| (m.temperature_k, m.conductance))
            .unzip();
        least_squares(&xs, &ys)
    }

    pub fn export_csv(&self, which: LabTable) -> String {
        match which {
            LabTable::Standards => to_csv(self.standards_records()),
            LabTable::Dilution => to_csv(self.dilution_records()),
            LabTable::Temperature => to_csv(self.temperature_records()),
            LabTable::Electrochemistry => to_csv(&self.electrochem_rows()),
        }
    }

    pub fn report(&self) -> LabReport {
        LabReport::build(self)
    }
}
