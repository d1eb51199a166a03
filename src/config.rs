//! Session configuration, loadable from JSON.
//!
//! Every section defaults to the classroom values, so a file only needs the
//! fields it overrides:
//!
//! ```
//! use electro_lab_sim::config::LabConfig;
//!
//! let config = LabConfig::from_json_str(r#"{ "dilution": { "step_ml": 5.0 } }"#).unwrap();
//! assert_eq!(config.dilution.step_ml, 5.0);
//! assert_eq!(config.dilution.max_volume_ml, 40.0);
//! ```

use crate::conductance::{DilutionConfig, StandardsConfig, TemperatureSweepConfig};
use crate::electrochem::CellConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Constants for every experiment track of one session.
///
/// Each conductance track carries its own constant table; they start out identical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub standards: StandardsConfig,
    pub dilution: DilutionConfig,
    pub temperature: TemperatureSweepConfig,
    pub cell: CellConfig,
}

impl LabConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load, parse and validate a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.standards.validate()?;
        self.dilution.validate()?;
        self.temperature.validate()?;
        self.cell.validate()?;
        Ok(())
    }
}
