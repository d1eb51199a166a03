// src/salt.rs - Electrolytes available on the bench and their conductance constants

use crate::constants::{
    HCL_KOHLRAUSCH_SLOPE, HCL_LIMITING_CONDUCTANCE, KCL_KOHLRAUSCH_SLOPE, KCL_LIMITING_CONDUCTANCE,
    NACL_KOHLRAUSCH_SLOPE, NACL_LIMITING_CONDUCTANCE,
};
use crate::error::LabError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Salt {
    HCl,
    NaCl,
    KCl,
}

impl Salt {
    pub const ALL: [Salt; 3] = [Salt::HCl, Salt::NaCl, Salt::KCl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Salt::HCl => "HCl",
            Salt::NaCl => "NaCl",
            Salt::KCl => "KCl",
        }
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Salt {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "HCl" => Ok(Salt::HCl),
            "NaCl" => Ok(Salt::NaCl),
            "KCl" => Ok(Salt::KCl),
            other => Err(LabError::UnknownSalt(other.to_string())),
        }
    }
}

/// Empirical square-root law constants: Λ(C) = Λ0 - k·√C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaltProfile {
    /// Λ0 in S·cm²·mol⁻¹
    pub limiting_conductance: f64,
    /// k in S·cm²·mol⁻¹·(mol/L)^-½
    pub kohlrausch_slope: f64,
}

impl SaltProfile {
    pub fn conductance_at(&self, concentration: f64) -> f64 {
        self.limiting_conductance - self.kohlrausch_slope * concentration.sqrt()
    }
}

pub static SALT_PROFILES: Lazy<HashMap<Salt, SaltProfile>> = Lazy::new(|| {
    use Salt::*;
    let mut m = HashMap::new();

    m.insert(HCl, SaltProfile {
        limiting_conductance: HCL_LIMITING_CONDUCTANCE,
        kohlrausch_slope: HCL_KOHLRAUSCH_SLOPE,
    });

    m.insert(NaCl, SaltProfile {
        limiting_conductance: NACL_LIMITING_CONDUCTANCE,
        kohlrausch_slope: NACL_KOHLRAUSCH_SLOPE,
    });

    m.insert(KCl, SaltProfile {
        limiting_conductance: KCL_LIMITING_CONDUCTANCE,
        kohlrausch_slope: KCL_KOHLRAUSCH_SLOPE,
    });

    m
});

pub fn get_profile(salt: Salt) -> Option<&'static SaltProfile> {
    SALT_PROFILES.get(&salt)
}
