pub mod constants;
pub mod error;
pub mod salt;
pub mod math_utils;
pub mod ledger;
pub mod conductance;
pub mod electrochem;
pub mod config;
pub mod export;
pub mod report;
pub mod session;
pub mod session_registry;

pub use config::LabConfig;
pub use error::{LabError, Result, Severity};
pub use salt::Salt;
pub use session::{LabSession, LabTable};
pub use session_registry::{SessionId, SessionRegistry};
