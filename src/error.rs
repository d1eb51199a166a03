//! Laboratory engine errors

use serde::Serialize;
use thiserror::Error;

/// Engine result type
pub type Result<T> = std::result::Result<T, LabError>;

/// How the presentation layer should surface an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

/// Every failure is local to one session; the session stays usable afterwards.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("{quantity} must be {requirement}, got {value}")]
    Domain {
        quantity: &'static str,
        requirement: &'static str,
        value: f64,
    },

    #[error("unsupported electrolyte: {0}")]
    UnknownSalt(String),

    #[error("unknown standard solution: {0}")]
    UnknownStandard(String),

    #[error("at least {required} standard measurements are needed, found {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("no sample measurement recorded; add sample data to compute results")]
    MissingSample,

    #[error("calibration line is degenerate (slope {slope}); standards must span two distinct concentrations")]
    SingularFit { slope: f64 },

    #[error("session not found: {0}")]
    UnknownSession(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl LabError {
    pub fn severity(&self) -> Severity {
        match self {
            LabError::MissingSample => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Shorthand for rejecting a numeric input.
    pub(crate) fn domain(quantity: &'static str, requirement: &'static str, value: f64) -> Self {
        LabError::Domain {
            quantity,
            requirement,
            value,
        }
    }
}
