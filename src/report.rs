//! Summary of what a session's tables show.

use crate::electrochem::CalibrationResult;
use crate::error::Result;
use crate::math_utils::LinearFit;
use crate::salt::Salt;
use crate::session::LabSession;
use serde::Serialize;

/// Conclusions drawn from the current tables. Fields are `None` until the
/// table behind them holds enough data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabReport {
    pub highest_conducting_salt: Option<Salt>,
    /// Conductance against concentration
    pub dilution_trend: Option<LinearFit>,
    /// Conductance against temperature
    pub temperature_trend: Option<LinearFit>,
    /// Conductance grows as concentration falls
    pub conductance_rises_on_dilution: Option<bool>,
    pub conductance_rises_with_temperature: Option<bool>,
    pub sample_estimate: Option<CalibrationResult>,
}

impl LabReport {
    pub fn build(session: &LabSession) -> Self {
        let dilution_trend = session.dilution_trend();
        let temperature_trend = session.temperature_trend();
        Self {
            highest_conducting_salt: session.highest_conducting_salt(),
            dilution_trend,
            temperature_trend,
            conductance_rises_on_dilution: dilution_trend.map(|fit| fit.slope < 0.0),
            conductance_rises_with_temperature: temperature_trend.map(|fit| fit.slope > 0.0),
            sample_estimate: session.calibrate().ok(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
