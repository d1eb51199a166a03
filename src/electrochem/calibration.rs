use super::ElectrochemPoint;
use crate::constants::{MIN_CALIBRATION_STANDARDS, SINGULAR_SLOPE_EPSILON};
use crate::error::{LabError, Result};
use crate::math_utils::{LinearFit, least_squares};
use serde::Serialize;

/// Outcome of fitting the standards and reading the sample off the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationResult {
    /// Estimated cathode [Cu²⁺] of the sample, mol/L
    pub estimated_concentration: f64,
    /// EMF as a linear function of ln(anode / cathode)
    pub fit: LinearFit,
    pub sample_emf: f64,
    /// ln(anode / cathode) read off the line at `sample_emf`
    pub sample_ln_ratio: f64,
    pub standards_used: usize,
}

/// Calibration curve for a cell with a fixed anode concentration.
///
/// Fits EMF against ln(anode / standard) by ordinary least squares, then
/// inverts the line at a measured EMF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationEngine {
    anode_concentration: f64,
}

impl CalibrationEngine {
    pub fn new(anode_concentration: f64) -> Self {
        Self { anode_concentration }
    }

    pub fn anode_concentration(&self) -> f64 {
        self.anode_concentration
    }

    /// Fit `(concentration, emf)` standards.
    pub fn fit(&self, standards: &[(f64, f64)]) -> Result<LinearFit> {
        if standards.len() < MIN_CALIBRATION_STANDARDS {
            return Err(LabError::InsufficientData {
                required: MIN_CALIBRATION_STANDARDS,
                found: standards.len(),
            });
        }

        let mut xs = Vec::with_capacity(standards.len());
        let mut ys = Vec::with_capacity(standards.len());
        for &(concentration, emf) in standards {
            xs.push(self.ln_ratio(concentration)?);
            ys.push(emf);
        }

        let fit = least_squares(&xs, &ys).ok_or(LabError::SingularFit { slope: 0.0 })?;
        if !(fit.slope.abs() >= SINGULAR_SLOPE_EPSILON) {
            return Err(LabError::SingularFit { slope: fit.slope });
        }
        Ok(fit)
    }

    /// Concentration whose EMF the fitted line predicts to be `emf`.
    pub fn invert(&self, fit: &LinearFit, emf: f64) -> Result<f64> {
        let x = self.invert_ln_ratio(fit, emf)?;
        Ok(self.anode_concentration / x.exp())
    }

    /// Partition points into standards and the sample, fit, and estimate the sample.
    /// The ledger is only read.
    ///
    /// A missing sample is reported before a shortage of standards, so an empty
    /// bench yields the `MissingSample` warning.
    pub fn fit_and_infer(&self, points: &[ElectrochemPoint]) -> Result<CalibrationResult> {
        let sample_emf = points
            .iter()
            .find(|p| p.label.is_sample())
            .map(|p| p.emf)
            .ok_or(LabError::MissingSample)?;

        let standards: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| !p.label.is_sample())
            .map(|p| (p.concentration, p.emf))
            .collect();

        let fit = self.fit(&standards)?;
        let sample_ln_ratio = self.invert_ln_ratio(&fit, sample_emf)?;

        Ok(CalibrationResult {
            estimated_concentration: self.anode_concentration / sample_ln_ratio.exp(),
            fit,
            sample_emf,
            sample_ln_ratio,
            standards_used: standards.len(),
        })
    }

    fn ln_ratio(&self, concentration: f64) -> Result<f64> {
        if concentration.is_finite() && concentration > 0.0 {
            Ok((self.anode_concentration / concentration).ln())
        } else {
            Err(LabError::domain("standard concentration", "strictly positive", concentration))
        }
    }

    fn invert_ln_ratio(&self, fit: &LinearFit, emf: f64) -> Result<f64> {
        if fit.slope.abs() < SINGULAR_SLOPE_EPSILON {
            return Err(LabError::SingularFit { slope: fit.slope });
        }
        fit.solve_for_x(emf).ok_or(LabError::SingularFit { slope: fit.slope })
    }
}
