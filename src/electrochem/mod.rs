//! Daniell-cell potentiometry: Nernst EMF, the measurement ledger, and
//! the calibration line used to recover an unknown Cu²⁺ concentration.

pub mod calibration;
pub mod ledger;
pub mod nernst;

pub use calibration::{CalibrationEngine, CalibrationResult};
pub use ledger::{ElectrochemLedger, FixedSample, RandomSample, SampleSource};
pub use nernst::{NernstModel, nernst_emf};

use crate::constants::{ANODE_CONCENTRATION_MOL_L, SAMPLE_MAX_MOL_L, SAMPLE_MIN_MOL_L};
use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// CuSO₄ standards available on the bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardSolution {
    Tenth,
    Hundredth,
    Thousandth,
}

impl StandardSolution {
    pub const ALL: [StandardSolution; 3] = [
        StandardSolution::Tenth,
        StandardSolution::Hundredth,
        StandardSolution::Thousandth,
    ];

    /// mol/L
    pub fn concentration(&self) -> f64 {
        match self {
            StandardSolution::Tenth => 0.1,
            StandardSolution::Hundredth => 0.01,
            StandardSolution::Thousandth => 0.001,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StandardSolution::Tenth => "0.1 M",
            StandardSolution::Hundredth => "0.01 M",
            StandardSolution::Thousandth => "0.001 M",
        }
    }
}

impl fmt::Display for StandardSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StandardSolution {
    type Err = LabError;

    /// Accepts "0.1 M", "0.1M" or a bare "0.1".
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let number = compact.strip_suffix('M').unwrap_or(&compact);
        match number {
            "0.1" => Ok(StandardSolution::Tenth),
            "0.01" => Ok(StandardSolution::Hundredth),
            "0.001" => Ok(StandardSolution::Thousandth),
            _ => Err(LabError::UnknownStandard(s.to_string())),
        }
    }
}

/// Key of an electrochemistry measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLabel {
    Standard(StandardSolution),
    Sample,
}

impl PointLabel {
    pub fn is_sample(&self) -> bool {
        matches!(self, PointLabel::Sample)
    }
}

impl fmt::Display for PointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointLabel::Standard(standard) => standard.fmt(f),
            PointLabel::Sample => f.write_str("Sample"),
        }
    }
}

impl Serialize for PointLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<StandardSolution> for PointLabel {
    fn from(standard: StandardSolution) -> Self {
        PointLabel::Standard(standard)
    }
}

/// A recorded cell reading. For the sample, `concentration` is the hidden ground truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectrochemPoint {
    pub label: PointLabel,
    /// Cathode [Cu²⁺] in mol/L
    pub concentration: f64,
    /// Volts
    pub emf: f64,
}

/// Read view of one point. Ratio and ln ratio are anode/cathode and are
/// recomputed on every read. The sample row leaves them empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElectrochemRow {
    pub label: PointLabel,
    pub concentration: Option<f64>,
    pub ratio: Option<f64>,
    pub ln_ratio: Option<f64>,
    pub emf: f64,
}

/// Cell constants plus the fixed anode solution and the hidden-sample range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    pub nernst: NernstModel,
    /// [Zn²⁺] in mol/L
    pub anode_concentration_mol_l: f64,
    pub sample_min_mol_l: f64,
    pub sample_max_mol_l: f64,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            nernst: NernstModel::default(),
            anode_concentration_mol_l: ANODE_CONCENTRATION_MOL_L,
            sample_min_mol_l: SAMPLE_MIN_MOL_L,
            sample_max_mol_l: SAMPLE_MAX_MOL_L,
        }
    }
}

impl CellConfig {
    pub fn validate(&self) -> Result<()> {
        self.nernst.validate()?;
        if !(self.anode_concentration_mol_l.is_finite() && self.anode_concentration_mol_l > 0.0) {
            return Err(LabError::InvalidConfig(format!(
                "anode concentration must be positive, got {}",
                self.anode_concentration_mol_l
            )));
        }
        if !(self.sample_min_mol_l > 0.0
            && self.sample_min_mol_l < self.sample_max_mol_l
            && self.sample_max_mol_l.is_finite())
        {
            return Err(LabError::InvalidConfig(format!(
                "sample range [{}, {}] mol/L must be positive and non-empty",
                self.sample_min_mol_l, self.sample_max_mol_l
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_labels_parse() {
        for standard in StandardSolution::ALL {
            assert_eq!(standard.as_str().parse::<StandardSolution>().unwrap(), standard);
        }
        assert_eq!("0.01M".parse::<StandardSolution>().unwrap(), StandardSolution::Hundredth);
        assert_eq!(" 0.001 ".parse::<StandardSolution>().unwrap(), StandardSolution::Thousandth);
        assert!(matches!(
            "0.5 M".parse::<StandardSolution>(),
            Err(LabError::UnknownStandard(_))
        ));
        assert!(matches!("Sample".parse::<StandardSolution>(), Err(LabError::UnknownStandard(_))));
    }

    #[test]
    fn test_point_label_display_and_json() {
        assert_eq!(PointLabel::Sample.to_string(), "Sample");
        assert_eq!(PointLabel::from(StandardSolution::Tenth).to_string(), "0.1 M");
        assert_eq!(serde_json::to_string(&PointLabel::Sample).unwrap(), "\"Sample\"");
        assert_eq!(
            serde_json::to_string(&PointLabel::Standard(StandardSolution::Hundredth)).unwrap(),
            "\"0.01 M\""
        );
    }

    #[test]
    fn test_cell_config_validation() {
        assert!(CellConfig::default().validate().is_ok());
        let inverted = CellConfig { sample_min_mol_l: 0.2, ..CellConfig::default() };
        assert!(matches!(inverted.validate(), Err(LabError::InvalidConfig(_))));
        let zero_anode = CellConfig { anode_concentration_mol_l: 0.0, ..CellConfig::default() };
        assert!(zero_anode.validate().is_err());
    }
}
